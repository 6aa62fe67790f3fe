//! Tests for duplicate detection

use super::*;
use crate::app::models::AbSite;
use crate::app::services::consistency::{
    check_not_duplicate, core_parameters_identical, describe_core_parameters,
};
use crate::error::ErrorKind;

#[test]
fn test_first_record_is_accepted() {
    let params = create_test_parameters("EQ-001", "A");
    assert!(check_not_duplicate(&params, None).is_ok());
}

#[test]
fn test_identical_core_parameters_conflict() {
    let params = create_test_parameters("EQ-001", "A");
    let latest = create_test_record(params.clone());

    let err = check_not_duplicate(&params, Some(&latest)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let details = err.details().unwrap();
    assert!(details.starts_with("Identical core parameters: ModelPn: PN-4680; Date: 20250115"));
    assert!(details.ends_with("ABSite: A"));
}

#[test]
fn test_metadata_changes_alone_still_conflict() {
    let params = create_test_parameters("EQ-001", "A");
    let latest = create_test_record(params.clone());

    let mut changed = params;
    changed.site = "S99".to_string();
    changed.operator = "OP9999".to_string();
    assert!(check_not_duplicate(&changed, Some(&latest)).is_err());
}

#[test]
fn test_any_single_core_change_is_accepted() {
    let base = create_test_parameters("EQ-001", "A");
    let latest = create_test_record(base.clone());

    let variants: Vec<Box<dyn Fn(&mut SpacerParameters)>> = vec![
        Box::new(|p| p.model_pn = "PN-4681".to_string()),
        Box::new(|p| p.date = "20250116".to_string()),
        Box::new(|p| p.big_coating_width = "374.5".to_string()),
        Box::new(|p| p.small_coating_width = "370.3".to_string()),
        Box::new(|p| p.white_space_width = "12.6".to_string()),
        Box::new(|p| p.at11_width = "7.4".to_string()),
        Box::new(|p| p.thickness = "0.3".to_string()),
        Box::new(|p| p.ab_site = AbSite::B),
    ];

    for change in variants {
        let mut params = base.clone();
        change(&mut params);
        assert!(check_not_duplicate(&params, Some(&latest)).is_ok());
    }
}

#[test]
fn test_comparison_is_case_sensitive() {
    let base = create_test_parameters("EQ-001", "A");
    let mut lower = base.clone();
    lower.model_pn = "pn-4680".to_string();

    assert!(!core_parameters_identical(&base, &lower));
}

#[test]
fn test_describe_lists_all_core_fields() {
    let params = create_test_parameters("EQ-001", "B");
    let description = describe_core_parameters(&params);
    for name in [
        "ModelPn",
        "Date",
        "BigCoatingWidth",
        "SmallCoatingWidth",
        "WhiteSpaceWidth",
        "AT11Width",
        "Thickness",
        "ABSite",
    ] {
        assert!(description.contains(name), "{}", name);
    }
}
