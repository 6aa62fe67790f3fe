//! Tests for history queries

pub mod paging_tests;

use crate::app::adapters::sqlite_store::SqliteSpacerStore;
use crate::app::adapters::store::SpacerStore;
use crate::app::models::SpacerHistoryEntry;
use crate::app::services::consistency::tests::create_test_parameters;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

/// Create a history entry `minutes` after a fixed base time
pub fn create_history_entry(minutes: i64, model_pn: &str, date: &str) -> SpacerHistoryEntry {
    let mut parameters = create_test_parameters("EQ-001", "A");
    parameters.model_pn = model_pn.to_string();
    parameters.date = date.to_string();

    SpacerHistoryEntry {
        id: Uuid::new_v4(),
        parameters,
        creation_time: Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap()
            + Duration::minutes(minutes),
        creator_id: None,
    }
}

/// In-memory store holding `count` history entries for one device side
///
/// The first write is an insert, every following write an update with a
/// distinct thickness so the duplicate guard never trips.
pub fn create_populated_store(resource_id: &str, count: usize) -> SqliteSpacerStore {
    let store = SqliteSpacerStore::open_in_memory().unwrap();
    for i in 0..count {
        let mut parameters = create_test_parameters(resource_id, "A");
        parameters.thickness = format!("0.{}", i + 1);
        if i == 0 {
            store.insert(&parameters, None).unwrap();
        } else {
            store.update(&parameters, None).unwrap();
        }
    }
    store
}

/// Window wide enough to cover anything written during the test run
pub fn surrounding_window() -> (DateTime<Utc>, DateTime<Utc>) {
    let now = Utc::now();
    (now - Duration::hours(1), now + Duration::hours(1))
}
