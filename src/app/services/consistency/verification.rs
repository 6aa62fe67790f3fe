//! Verification of operator readings against maintained values

use crate::Result;
use crate::app::models::{CoreField, SpacerParameters, SpacerValidationData, SpacerValidationRecord};
use crate::config::VerificationConfig;
use crate::error::SpacerError;
use tracing::{debug, warn};

/// String comparison policy for verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    CaseSensitive,
    CaseInsensitive,
}

impl Comparison {
    pub fn matches(&self, maintained: &str, input: &str) -> bool {
        let (maintained, input) = (maintained.trim(), input.trim());
        match self {
            Comparison::CaseSensitive => maintained == input,
            Comparison::CaseInsensitive => maintained.eq_ignore_ascii_case(input),
        }
    }
}

impl From<&VerificationConfig> for Comparison {
    fn from(config: &VerificationConfig) -> Self {
        if config.case_sensitive {
            Comparison::CaseSensitive
        } else {
            Comparison::CaseInsensitive
        }
    }
}

/// List every core parameter whose input differs from the maintained value
///
/// Each entry reads `"<field>: maintained '<x>' != input '<y>'"`.
pub fn find_mismatches(
    input: &SpacerValidationData,
    maintained: &SpacerParameters,
    comparison: Comparison,
) -> Vec<String> {
    CoreField::ALL
        .iter()
        .filter_map(|field| {
            let expected = field.value_in(maintained);
            let actual = field.raw_value_in(input);
            if comparison.matches(expected, &actual) {
                None
            } else {
                Some(format!(
                    "{}: maintained '{}' != input '{}'",
                    field.name(),
                    expected,
                    actual
                ))
            }
        })
        .collect()
}

/// Verify input against the maintained row for `resource_id`
///
/// # Errors
///
/// * `NotFound` when no maintained row exists
/// * `UnprocessableEntity` with the joined mismatch list when any field differs
pub fn verify_against_maintained(
    input: &SpacerValidationData,
    maintained: Option<&SpacerValidationRecord>,
    resource_id: &str,
    comparison: Comparison,
) -> Result<()> {
    let Some(maintained) = maintained else {
        return Err(SpacerError::not_found(format!(
            "No spacer data maintained for device {}",
            resource_id
        )));
    };

    let mismatches = find_mismatches(input, &maintained.parameters, comparison);
    if !mismatches.is_empty() {
        warn!(
            "Verification failed for device {} side {}: {} mismatched fields",
            resource_id,
            maintained.parameters.ab_site,
            mismatches.len()
        );
        return Err(SpacerError::unprocessable(
            format!("Spacer verification failed for device {}", resource_id),
            mismatches.join("; "),
        ));
    }

    debug!(
        "Verification passed for device {} side {}",
        resource_id, maintained.parameters.ab_site
    );
    Ok(())
}
