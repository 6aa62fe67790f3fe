//! Field-level validation rules
//!
//! Rules are evaluated in a fixed order (presence, optional fields, format,
//! length, numeric) and every violation is reported.

use crate::app::models::SpacerValidationData;
use crate::constants::{MAX_RESOURCE_ID_LENGTH, MAX_SITE_LENGTH};

/// Check every rule and return one human-readable message per violation
pub fn collect_field_errors(data: &SpacerValidationData) -> Vec<String> {
    let mut errors = Vec::new();

    let required = [
        ("ResourceId", &data.resource_id),
        ("ModelPn", &data.model_pn),
        ("Date", &data.date),
        ("BigCoatingWidth", &data.big_coating_width),
        ("SmallCoatingWidth", &data.small_coating_width),
        ("WhiteSpaceWidth", &data.white_space_width),
        ("AT11Width", &data.at11_width),
        ("Thickness", &data.thickness),
        ("ABSite", &data.ab_site),
    ];
    for (name, value) in required {
        if is_blank(value) {
            errors.push(format!("{} must not be empty", name));
        }
    }

    // Optional metadata may be absent, but not present-and-blank
    for (name, value) in [("Site", &data.site), ("Operator", &data.operator)] {
        if let Some(v) = value {
            if v.trim().is_empty() {
                errors.push(format!("{} must not be blank when provided", name));
            }
        }
    }

    if let Some(ab_site) = non_blank(&data.ab_site) {
        let normalized = ab_site.to_uppercase();
        if normalized != "A" && normalized != "B" {
            errors.push("ABSite must be 'A' or 'B'".to_string());
        }
    }

    if let Some(site) = non_blank(&data.site) {
        if site.chars().count() > MAX_SITE_LENGTH {
            errors.push(format!(
                "Site must not exceed {} characters",
                MAX_SITE_LENGTH
            ));
        }
    }

    if let Some(resource_id) = non_blank(&data.resource_id) {
        if resource_id.chars().count() > MAX_RESOURCE_ID_LENGTH {
            errors.push(format!(
                "ResourceId must not exceed {} characters",
                MAX_RESOURCE_ID_LENGTH
            ));
        }
    }

    let numeric = [
        ("BigCoatingWidth", &data.big_coating_width),
        ("SmallCoatingWidth", &data.small_coating_width),
        ("WhiteSpaceWidth", &data.white_space_width),
        ("AT11Width", &data.at11_width),
        ("Thickness", &data.thickness),
    ];
    for (name, value) in numeric {
        if let Some(v) = non_blank(value) {
            if !is_valid_number(v) {
                errors.push(format!("{} must be a valid number", name));
            }
        }
    }

    errors
}

/// Check whether a string parses as a finite floating-point number after trimming
pub fn is_valid_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

fn is_blank(value: &Option<String>) -> bool {
    non_blank(value).is_none()
}

/// Trimmed value when present and not whitespace-only
fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
