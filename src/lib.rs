//! Spacer Validation Service Library
//!
//! Maintains the current spacer validation parameters for each side (A/B) of a
//! manufacturing device, records every change in an append-only history, and
//! verifies operator readings against the maintained values.
//!
//! This library provides tools for:
//! - Validating submitted readings, reporting every violation at once
//! - Rejecting updates that repeat the maintained core parameters
//! - Verifying readings field by field against the maintained row
//! - Querying history within a time window with dynamic sorting and paging
//! - Atomic insert/update of the current row together with its history entry
//! - Serving all of the above over an axum HTTP API backed by SQLite

pub mod api;
pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod consistency;
        pub mod record_query;
        pub mod spacer_service;
        pub mod validation;
    }
    pub mod adapters {
        pub mod sqlite_store;
        pub mod store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AbSite, SpacerHistoryEntry, SpacerValidationData, SpacerValidationRecord};
pub use app::services::spacer_service::SpacerService;
pub use config::ServiceConfig;
pub use error::{Result, SpacerError};
