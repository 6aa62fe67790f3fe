//! Tests for duplicate and verification checks

pub mod duplicate_tests;
pub mod verification_tests;

use crate::app::models::{SpacerParameters, SpacerValidationRecord};
use crate::app::services::validation::tests::create_valid_data;
use crate::app::services::validation::validate;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

/// Create normalized parameters for a device side from the shared fixture
pub fn create_test_parameters(resource_id: &str, ab_site: &str) -> SpacerParameters {
    validate(&create_valid_data(resource_id, ab_site)).unwrap()
}

/// Wrap parameters in a current-state record
pub fn create_test_record(parameters: SpacerParameters) -> SpacerValidationRecord {
    SpacerValidationRecord {
        id: Uuid::new_v4(),
        parameters,
        creation_time: Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap(),
        creator_id: None,
        last_modification_time: None,
        last_modifier_id: None,
    }
}
