use clap::Parser;
use spacer_service::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the command until it finishes or Ctrl+C arrives
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // Without a signal handler, run until the command finishes
                std::future::pending::<()>().await;
            }
        };

        // Run the main command, racing it against the shutdown signal
        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Ok(())
            }
        }
    });

    match result {
        // Success - the command has already logged its outcome
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Spacer Validation Service");
    println!("=========================");
    println!();
    println!("Maintain, audit and verify spacer validation data per device side.");
    println!();
    println!("USAGE:");
    println!("    spacer-service <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Run the HTTP API");
    println!("    init-db     Create the database schema and exit");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Serve on the default address with ./spacer.db:");
    println!("    spacer-service serve");
    println!();
    println!("    # Serve with a config file and a different database:");
    println!("    spacer-service serve --config spacer.json --database /var/lib/spacer/spacer.db");
    println!();
    println!("For detailed help on any command, use:");
    println!("    spacer-service <COMMAND> --help");
}
