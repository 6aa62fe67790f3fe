//! Tests for verification against maintained values

use super::*;
use crate::app::services::consistency::{Comparison, find_mismatches, verify_against_maintained};
use crate::config::VerificationConfig;
use crate::error::ErrorKind;

#[test]
fn test_matching_input_verifies() {
    let maintained = create_test_record(create_test_parameters("EQ-001", "A"));
    let input = create_valid_data("EQ-001", "A");

    assert!(
        verify_against_maintained(&input, Some(&maintained), "EQ-001", Comparison::CaseSensitive)
            .is_ok()
    );
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let maintained = create_test_record(create_test_parameters("EQ-001", "A"));
    let mut input = create_valid_data("EQ-001", " a ");
    input.thickness = Some(" 0.2 ".to_string());

    assert!(find_mismatches(&input, &maintained.parameters, Comparison::CaseSensitive).is_empty());
}

#[test]
fn test_missing_maintained_row_is_not_found() {
    let input = create_valid_data("EQ-404", "A");
    let err = verify_against_maintained(&input, None, "EQ-404", Comparison::CaseSensitive)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.message().contains("EQ-404"));
}

#[test]
fn test_every_mismatch_is_reported() {
    let maintained = create_test_record(create_test_parameters("EQ-001", "A"));
    let mut input = create_valid_data("EQ-001", "A");
    input.big_coating_width = Some("375.0".to_string());
    input.thickness = Some("0.25".to_string());

    let err = verify_against_maintained(&input, Some(&maintained), "EQ-001", Comparison::CaseSensitive)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnprocessableEntity);
    assert_eq!(
        err.details(),
        Some(
            "BigCoatingWidth: maintained '374.4' != input '375.0'; \
             Thickness: maintained '0.2' != input '0.25'"
        )
    );
}

#[test]
fn test_absent_input_field_is_a_mismatch() {
    let maintained = create_test_record(create_test_parameters("EQ-001", "A"));
    let mut input = create_valid_data("EQ-001", "A");
    input.date = None;

    let mismatches = find_mismatches(&input, &maintained.parameters, Comparison::CaseSensitive);
    assert_eq!(mismatches, vec!["Date: maintained '20250115' != input ''".to_string()]);
}

#[test]
fn test_case_policy_is_configurable() {
    let maintained = create_test_record(create_test_parameters("EQ-001", "A"));
    let mut input = create_valid_data("EQ-001", "A");
    input.model_pn = Some("pn-4680".to_string());

    let strict = Comparison::from(&VerificationConfig { case_sensitive: true });
    let lenient = Comparison::from(&VerificationConfig { case_sensitive: false });

    assert_eq!(find_mismatches(&input, &maintained.parameters, strict).len(), 1);
    assert!(find_mismatches(&input, &maintained.parameters, lenient).is_empty());
}
