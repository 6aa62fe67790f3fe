//! Tests for the spacer service workflows


use crate::app::adapters::sqlite_store::SqliteSpacerStore;
use crate::app::services::spacer_service::SpacerService;
use crate::config::ServiceConfig;
use std::sync::Arc;

/// Service backed by a fresh in-memory store
pub fn create_test_service() -> SpacerService {
    create_test_service_with(ServiceConfig::default())
}

pub fn create_test_service_with(config: ServiceConfig) -> SpacerService {
    let store = SqliteSpacerStore::open_in_memory().unwrap();
    SpacerService::new(Arc::new(store), config)
}
