//! Trimming and normalization of validated input

use crate::Result;
use crate::app::models::{AbSite, SpacerParameters, SpacerValidationData};

/// Build the normalized parameter set from client input
///
/// Every string field is trimmed, absent optional fields become empty strings and
/// ABSite is upper-cased. Only fails when ABSite is not "A" or "B", which
/// [`super::validate`] has already rejected for validated input.
pub fn normalize(data: &SpacerValidationData) -> Result<SpacerParameters> {
    let ab_site: AbSite = trimmed(&data.ab_site).parse()?;

    Ok(SpacerParameters {
        site: trimmed(&data.site),
        resource_id: trimmed(&data.resource_id),
        operator: trimmed(&data.operator),
        model_pn: trimmed(&data.model_pn),
        date: trimmed(&data.date),
        big_coating_width: trimmed(&data.big_coating_width),
        small_coating_width: trimmed(&data.small_coating_width),
        white_space_width: trimmed(&data.white_space_width),
        at11_width: trimmed(&data.at11_width),
        thickness: trimmed(&data.thickness),
        ab_site,
    })
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}
