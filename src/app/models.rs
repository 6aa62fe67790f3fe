//! Data models for spacer validation data
//!
//! This module contains the transport shape submitted by operators, the normalized
//! parameter set that enters persistence, and the two stored variants: the
//! mutable current-state record and the immutable history entry.

use crate::{Result, SpacerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// Device Side
// =============================================================================

/// One of the two physical sides of a device, tracked independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbSite {
    A,
    B,
}

impl AbSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbSite::A => "A",
            AbSite::B => "B",
        }
    }
}

impl FromStr for AbSite {
    type Err = SpacerError;

    /// Parse after trimming and upper-casing; only "A" and "B" are accepted
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(AbSite::A),
            "B" => Ok(AbSite::B),
            _ => Err(SpacerError::bad_request(format!(
                "ABSite must be 'A' or 'B', got '{}'",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for AbSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Transport Shape
// =============================================================================

/// Spacer validation data as submitted by a client
///
/// Every field is optional at the transport level so that validation can report
/// all missing fields at once instead of failing on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerValidationData {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub model_pn: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub big_coating_width: Option<String>,
    #[serde(default)]
    pub small_coating_width: Option<String>,
    #[serde(default)]
    pub white_space_width: Option<String>,
    #[serde(default, alias = "aT11Width")]
    pub at11_width: Option<String>,
    #[serde(default)]
    pub thickness: Option<String>,
    #[serde(default, alias = "aBSite")]
    pub ab_site: Option<String>,
}

// =============================================================================
// Normalized Parameters
// =============================================================================

/// Trimmed and normalized field set shared by both stored variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerParameters {
    pub site: String,
    pub resource_id: String,
    pub operator: String,
    pub model_pn: String,
    pub date: String,
    pub big_coating_width: String,
    pub small_coating_width: String,
    pub white_space_width: String,
    pub at11_width: String,
    pub thickness: String,
    pub ab_site: AbSite,
}

// =============================================================================
// Stored Variants
// =============================================================================

/// Current-state row: the single maintained record per (ResourceId, ABSite)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerValidationRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub parameters: SpacerParameters,
    pub creation_time: DateTime<Utc>,
    pub creator_id: Option<Uuid>,
    pub last_modification_time: Option<DateTime<Utc>>,
    pub last_modifier_id: Option<Uuid>,
}

impl SpacerValidationRecord {
    /// Time of the most recent write to this row
    pub fn last_written(&self) -> DateTime<Utc> {
        self.last_modification_time.unwrap_or(self.creation_time)
    }
}

/// Append-only snapshot taken on every insert or update; never modified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerHistoryEntry {
    pub id: Uuid,
    #[serde(flatten)]
    pub parameters: SpacerParameters,
    pub creation_time: DateTime<Utc>,
    pub creator_id: Option<Uuid>,
}

// =============================================================================
// Core Parameters
// =============================================================================

/// The 8 dimensional/process fields used for duplicate and consistency checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreField {
    ModelPn,
    Date,
    BigCoatingWidth,
    SmallCoatingWidth,
    WhiteSpaceWidth,
    At11Width,
    Thickness,
    AbSite,
}

impl CoreField {
    /// All core fields in reporting order
    pub const ALL: [CoreField; 8] = [
        CoreField::ModelPn,
        CoreField::Date,
        CoreField::BigCoatingWidth,
        CoreField::SmallCoatingWidth,
        CoreField::WhiteSpaceWidth,
        CoreField::At11Width,
        CoreField::Thickness,
        CoreField::AbSite,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CoreField::ModelPn => "ModelPn",
            CoreField::Date => "Date",
            CoreField::BigCoatingWidth => "BigCoatingWidth",
            CoreField::SmallCoatingWidth => "SmallCoatingWidth",
            CoreField::WhiteSpaceWidth => "WhiteSpaceWidth",
            CoreField::At11Width => "AT11Width",
            CoreField::Thickness => "Thickness",
            CoreField::AbSite => "ABSite",
        }
    }

    /// Value of this field in a normalized parameter set
    pub fn value_in<'a>(&self, params: &'a SpacerParameters) -> &'a str {
        match self {
            CoreField::ModelPn => &params.model_pn,
            CoreField::Date => &params.date,
            CoreField::BigCoatingWidth => &params.big_coating_width,
            CoreField::SmallCoatingWidth => &params.small_coating_width,
            CoreField::WhiteSpaceWidth => &params.white_space_width,
            CoreField::At11Width => &params.at11_width,
            CoreField::Thickness => &params.thickness,
            CoreField::AbSite => params.ab_site.as_str(),
        }
    }

    /// Trimmed value of this field in raw client input ("" when absent)
    ///
    /// ABSite is additionally upper-cased since it is a lookup key, not a measurement.
    pub fn raw_value_in(&self, data: &SpacerValidationData) -> String {
        let raw = match self {
            CoreField::ModelPn => &data.model_pn,
            CoreField::Date => &data.date,
            CoreField::BigCoatingWidth => &data.big_coating_width,
            CoreField::SmallCoatingWidth => &data.small_coating_width,
            CoreField::WhiteSpaceWidth => &data.white_space_width,
            CoreField::At11Width => &data.at11_width,
            CoreField::Thickness => &data.thickness,
            CoreField::AbSite => &data.ab_site,
        };
        let trimmed = raw.as_deref().map(str::trim).unwrap_or_default();
        match self {
            CoreField::AbSite => trimmed.to_uppercase(),
            _ => trimmed.to_string(),
        }
    }
}

impl fmt::Display for CoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ab_site_parse_normalizes_case_and_whitespace() {
        assert_eq!(" a ".parse::<AbSite>().unwrap(), AbSite::A);
        assert_eq!("B".parse::<AbSite>().unwrap(), AbSite::B);
        assert!("C".parse::<AbSite>().is_err());
        assert!("AB".parse::<AbSite>().is_err());
        assert!("".parse::<AbSite>().is_err());
    }

    #[test]
    fn test_transport_accepts_legacy_field_spellings() {
        let json = r#"{"resourceId":"R1","aT11Width":"7.3","aBSite":"A"}"#;
        let data: SpacerValidationData = serde_json::from_str(json).unwrap();
        assert_eq!(data.at11_width.as_deref(), Some("7.3"));
        assert_eq!(data.ab_site.as_deref(), Some("A"));
        assert!(data.site.is_none());
    }

    #[test]
    fn test_raw_value_trims_and_uppercases_ab_site() {
        let data = SpacerValidationData {
            model_pn: Some("  PN-1 ".to_string()),
            ab_site: Some(" b".to_string()),
            ..Default::default()
        };
        assert_eq!(CoreField::ModelPn.raw_value_in(&data), "PN-1");
        assert_eq!(CoreField::AbSite.raw_value_in(&data), "B");
        assert_eq!(CoreField::Thickness.raw_value_in(&data), "");
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = SpacerValidationRecord {
            id: Uuid::nil(),
            parameters: SpacerParameters {
                site: String::new(),
                resource_id: "R1".to_string(),
                operator: String::new(),
                model_pn: "PN".to_string(),
                date: "20250101".to_string(),
                big_coating_width: "374.4".to_string(),
                small_coating_width: "370.1".to_string(),
                white_space_width: "12".to_string(),
                at11_width: "7.3".to_string(),
                thickness: "0.2".to_string(),
                ab_site: AbSite::A,
            },
            creation_time: Utc::now(),
            creator_id: None,
            last_modification_time: None,
            last_modifier_id: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["resourceId"], "R1");
        assert_eq!(value["abSite"], "A");
        assert_eq!(value["at11Width"], "7.3");
        assert_eq!(record.last_written(), record.creation_time);
    }
}
