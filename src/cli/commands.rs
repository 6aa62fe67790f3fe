//! Command implementations for the spacer validation service CLI

use crate::api;
use crate::app::adapters::sqlite_store::SqliteSpacerStore;
use crate::app::services::spacer_service::SpacerService;
use crate::cli::args::{Args, CommonArgs, Commands, InitDbArgs, ServeArgs};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Dispatch the selected subcommand
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Serve(serve)) => run_serve(serve).await,
        Some(Commands::InitDb(init)) => run_init_db(init),
        None => Ok(()),
    }
}

/// Open the store and serve the HTTP API until the process is stopped
async fn run_serve(args: ServeArgs) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);

    let config = args.load_config().context("Failed to load configuration")?;
    let addr = config.socket_addr()?;

    let store = SqliteSpacerStore::open(&config.database).with_context(|| {
        format!(
            "Failed to open database at {}",
            config.database.path.display()
        )
    })?;
    let service = SpacerService::new(Arc::new(store), config);
    let app = api::router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Spacer validation service listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;
    Ok(())
}

/// Create the schema and exit
fn run_init_db(args: InitDbArgs) -> Result<()> {
    setup_logging(&args.common)?;

    let config = args.load_config().context("Failed to load configuration")?;
    SqliteSpacerStore::open(&config.database).with_context(|| {
        format!(
            "Failed to initialize database at {}",
            config.database.path.display()
        )
    })?;

    println!("Initialized database at {}", config.database.path.display());
    Ok(())
}

fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter; RUST_LOG overrides the verbosity flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spacer_service={}", log_level)));

    // Set up subscriber with compact output on stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
