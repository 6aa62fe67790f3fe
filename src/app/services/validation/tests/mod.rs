//! Tests for the validation service
//!
//! Fixture builders here are shared with the other service test modules.


use crate::app::models::SpacerValidationData;

/// Create a complete, valid submission for the given device side
pub fn create_valid_data(resource_id: &str, ab_site: &str) -> SpacerValidationData {
    SpacerValidationData {
        site: Some("S01".to_string()),
        resource_id: Some(resource_id.to_string()),
        operator: Some("OP1234".to_string()),
        model_pn: Some("PN-4680".to_string()),
        date: Some("20250115".to_string()),
        big_coating_width: Some("374.4".to_string()),
        small_coating_width: Some("370.2".to_string()),
        white_space_width: Some("12.5".to_string()),
        at11_width: Some("7.3".to_string()),
        thickness: Some("0.2".to_string()),
        ab_site: Some(ab_site.to_string()),
    }
}

/// Create a submission with every field absent
pub fn create_empty_data() -> SpacerValidationData {
    SpacerValidationData::default()
}
