//! Command-line argument definitions for the spacer validation service
//!
//! Settings are layered: defaults, then an optional JSON config file, then the
//! flags below.

use crate::Result;
use crate::config::ServiceConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the spacer validation service
#[derive(Debug, Clone, Parser)]
#[command(
    name = "spacer-service",
    version,
    about = "Record and verify spacer validation data for manufacturing equipment",
    long_about = "An HTTP service that maintains the current spacer validation parameters of \
                  each device side, keeps an append-only history of every change, and verifies \
                  operator readings against the maintained values."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Create the database schema and exit
    InitDb(InitDbArgs),
}

/// Flags shared by every command
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// JSON configuration file; missing keys take their defaults
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// SQLite database file, overriding the configuration
    #[arg(short = 'd', long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Only log errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Load the config file (if any) and apply the shared overrides
    pub fn load_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config_file {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(database) = &self.database {
            config = config.with_database_path(database.clone());
        }

        Ok(config)
    }
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Socket address to listen on, e.g. 0.0.0.0:8080
    #[arg(short = 'b', long = "bind", value_name = "ADDR")]
    pub bind: Option<String>,

    /// Compare verification fields ignoring ASCII case
    #[arg(long = "case-insensitive-verification")]
    pub case_insensitive_verification: bool,

    /// Page size for history queries that omit maxResultCount
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<i64>,
}

impl ServeArgs {
    /// Fully resolved and validated configuration
    pub fn load_config(&self) -> Result<ServiceConfig> {
        let mut config = self.common.load_config()?;

        if let Some(bind) = &self.bind {
            config = config.with_bind_address(bind.clone());
        }
        if self.case_insensitive_verification {
            config = config.with_case_insensitive_verification();
        }
        if let Some(size) = self.page_size {
            config = config.with_default_page_size(size);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the init-db command
#[derive(Debug, Clone, Parser)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl InitDbArgs {
    pub fn load_config(&self) -> Result<ServiceConfig> {
        let config = self.common.load_config()?;
        config.validate()?;
        Ok(config)
    }
}
