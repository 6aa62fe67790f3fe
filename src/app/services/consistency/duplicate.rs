//! Duplicate detection for writes against the current-state row

use crate::Result;
use crate::app::models::{CoreField, SpacerParameters, SpacerValidationRecord};
use crate::error::SpacerError;
use tracing::info;

/// Reject `new` when its core parameters equal those of `latest`
///
/// An absent `latest` means this is the first record for the device side and is
/// always accepted.
///
/// # Errors
///
/// `Conflict` whose details list the identical core parameters.
pub fn check_not_duplicate(
    new: &SpacerParameters,
    latest: Option<&SpacerValidationRecord>,
) -> Result<()> {
    let Some(latest) = latest else {
        info!(
            "First spacer parameters for device {} side {}",
            new.resource_id, new.ab_site
        );
        return Ok(());
    };

    if core_parameters_identical(new, &latest.parameters) {
        return Err(SpacerError::conflict_with(
            "Duplicate data: all 8 core parameters are identical to the latest record",
            describe_core_parameters(new),
        ));
    }

    info!(
        "Spacer parameters for device {} side {} differ from the latest record",
        new.resource_id, new.ab_site
    );
    Ok(())
}

/// Exact, case-sensitive comparison of the trimmed core parameters
pub fn core_parameters_identical(a: &SpacerParameters, b: &SpacerParameters) -> bool {
    CoreField::ALL
        .iter()
        .all(|field| field.value_in(a).trim() == field.value_in(b).trim())
}

/// Render the core parameters as `"Identical core parameters: Field: value; ..."`
pub fn describe_core_parameters(params: &SpacerParameters) -> String {
    let listing = CoreField::ALL
        .iter()
        .map(|field| format!("{}: {}", field.name(), field.value_in(params)))
        .collect::<Vec<_>>()
        .join("; ");
    format!("Identical core parameters: {}", listing)
}
