//! Field validation for submitted spacer validation data
//!
//! Validation accumulates every violation instead of stopping at the first, so an
//! operator sees the complete list of problems in one response.
//!
//! # Architecture
//!
//! - [`rules`] - Presence, format, length and numeric rules producing messages
//! - [`normalize`] - Trimming and normalization into [`SpacerParameters`]
//!
//! # Example Usage
//!
//! ```rust
//! use spacer_service::app::models::SpacerValidationData;
//! use spacer_service::app::services::validation::validate;
//!
//! let data = SpacerValidationData {
//!     resource_id: Some(" EQ-001 ".to_string()),
//!     model_pn: Some("PN-7".to_string()),
//!     date: Some("20250101".to_string()),
//!     big_coating_width: Some("374.4".to_string()),
//!     small_coating_width: Some("370.2".to_string()),
//!     white_space_width: Some("12.5".to_string()),
//!     at11_width: Some("7.3".to_string()),
//!     thickness: Some("0".to_string()),
//!     ab_site: Some("a".to_string()),
//!     ..Default::default()
//! };
//!
//! let params = validate(&data).unwrap();
//! assert_eq!(params.resource_id, "EQ-001");
//! assert_eq!(params.ab_site.as_str(), "A");
//! ```
//!
//! [`SpacerParameters`]: crate::app::models::SpacerParameters

pub mod normalize;
pub mod rules;

#[cfg(test)]
pub mod tests;

pub use normalize::normalize;
pub use rules::{collect_field_errors, is_valid_number};

use crate::Result;
use crate::app::models::{SpacerParameters, SpacerValidationData};
use crate::error::SpacerError;
use tracing::debug;

/// Validate client input and return its trimmed, normalized copy
///
/// Fails with a `BadRequest` ("Data validation failed") whose details join every
/// field-level violation with `"; "`.
pub fn validate(data: &SpacerValidationData) -> Result<SpacerParameters> {
    let errors = collect_field_errors(data);
    if !errors.is_empty() {
        debug!("Validation rejected input with {} errors", errors.len());
        return Err(SpacerError::validation_failed(&errors));
    }

    normalize(data)
}
