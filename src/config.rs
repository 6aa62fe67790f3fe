//! Configuration management and validation.
//!
//! Provides the service configuration passed explicitly into the persistence
//! gateway and the API layer at startup. Nothing here is global state.

use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DATABASE_PATH, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
use crate::error::{Result, SpacerError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// SQLite storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Busy timeout in milliseconds for contended writes
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// Verification comparison settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Compare core parameters case-sensitively (trimmed either way)
    pub case_sensitive: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// Paged query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Page size used when `maxResultCount` is omitted
    pub default_max_result_count: i64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_max_result_count: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Top-level configuration for the spacer validation service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to
    pub bind_address: String,

    pub database: DatabaseConfig,

    pub verification: VerificationConfig,

    pub paging: PagingConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database: DatabaseConfig::default(),
            verification: VerificationConfig::default(),
            paging: PagingConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServiceConfig = serde_json::from_str(&contents).map_err(|e| {
            SpacerError::configuration(format!(
                "Invalid configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the HTTP bind address
    pub fn with_bind_address(mut self, bind_address: impl Into<String>) -> Self {
        self.bind_address = bind_address.into();
        self
    }

    /// Set the database file path
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database.path = path.into();
        self
    }

    /// Switch verification to case-insensitive comparison
    pub fn with_case_insensitive_verification(mut self) -> Self {
        self.verification.case_sensitive = false;
        self
    }

    /// Set the default page size for history queries
    pub fn with_default_page_size(mut self, size: i64) -> Self {
        self.paging.default_max_result_count = size;
        self
    }

    /// Parsed bind address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address.parse().map_err(|_| {
            SpacerError::configuration(format!("Invalid bind address '{}'", self.bind_address))
        })
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if self.database.path.as_os_str().is_empty() {
            return Err(SpacerError::configuration("Database path must not be empty"));
        }

        let page_size = self.paging.default_max_result_count;
        if page_size <= 0 || page_size > MAX_PAGE_SIZE {
            return Err(SpacerError::configuration(format!(
                "Default page size {} must be between 1 and {}",
                page_size, MAX_PAGE_SIZE
            )));
        }

        Ok(())
    }
}
