//! Dynamic sort-field selection for history queries
//!
//! Sort expressions are comma-separated `"<field> [ASC|DESC]"` clauses applied in
//! order. Field names map onto a closed set of comparators; anything else is
//! rejected rather than silently ignored.

use crate::Result;
use crate::app::models::SpacerHistoryEntry;
use crate::constants::DEFAULT_SORTING;
use crate::error::SpacerError;
use std::cmp::Ordering;

/// Fields history entries can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreationTime,
    Date,
    ModelPn,
    ResourceId,
    Site,
    Operator,
    BigCoatingWidth,
    SmallCoatingWidth,
    WhiteSpaceWidth,
    At11Width,
    Thickness,
    AbSite,
}

impl SortField {
    pub const SUPPORTED: [SortField; 12] = [
        SortField::CreationTime,
        SortField::Date,
        SortField::ModelPn,
        SortField::ResourceId,
        SortField::Site,
        SortField::Operator,
        SortField::BigCoatingWidth,
        SortField::SmallCoatingWidth,
        SortField::WhiteSpaceWidth,
        SortField::At11Width,
        SortField::Thickness,
        SortField::AbSite,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortField::CreationTime => "CreationTime",
            SortField::Date => "Date",
            SortField::ModelPn => "ModelPn",
            SortField::ResourceId => "ResourceId",
            SortField::Site => "Site",
            SortField::Operator => "Operator",
            SortField::BigCoatingWidth => "BigCoatingWidth",
            SortField::SmallCoatingWidth => "SmallCoatingWidth",
            SortField::WhiteSpaceWidth => "WhiteSpaceWidth",
            SortField::At11Width => "AT11Width",
            SortField::Thickness => "Thickness",
            SortField::AbSite => "ABSite",
        }
    }

    /// Case-insensitive lookup by field name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::SUPPORTED
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }

    /// Comma-separated list of supported field names
    pub fn supported_names() -> String {
        Self::SUPPORTED
            .iter()
            .map(SortField::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Ascending comparison of two entries on this field
    pub fn compare(&self, a: &SpacerHistoryEntry, b: &SpacerHistoryEntry) -> Ordering {
        let (pa, pb) = (&a.parameters, &b.parameters);
        match self {
            SortField::CreationTime => a.creation_time.cmp(&b.creation_time),
            SortField::Date => pa.date.cmp(&pb.date),
            SortField::ModelPn => pa.model_pn.cmp(&pb.model_pn),
            SortField::ResourceId => pa.resource_id.cmp(&pb.resource_id),
            SortField::Site => pa.site.cmp(&pb.site),
            SortField::Operator => pa.operator.cmp(&pb.operator),
            SortField::BigCoatingWidth => {
                compare_numeric(&pa.big_coating_width, &pb.big_coating_width)
            }
            SortField::SmallCoatingWidth => {
                compare_numeric(&pa.small_coating_width, &pb.small_coating_width)
            }
            SortField::WhiteSpaceWidth => {
                compare_numeric(&pa.white_space_width, &pb.white_space_width)
            }
            SortField::At11Width => compare_numeric(&pa.at11_width, &pb.at11_width),
            SortField::Thickness => compare_numeric(&pa.thickness, &pb.thickness),
            SortField::AbSite => pa.ab_site.cmp(&pb.ab_site),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One `"<field> [ASC|DESC]"` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortClause {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortClause {
    pub fn compare(&self, a: &SpacerHistoryEntry, b: &SpacerHistoryEntry) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Parse a sort expression; blank, absent or clause-less input yields `CreationTime DESC`
///
/// # Errors
///
/// `BadRequest` for an unknown field (naming the supported set), an unknown
/// direction, or a clause with extra tokens.
pub fn parse_sorting(sorting: Option<&str>) -> Result<Vec<SortClause>> {
    let expression = match sorting.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => DEFAULT_SORTING,
    };

    let mut clauses = Vec::new();
    for clause in expression.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let mut tokens = clause.split_whitespace();
        let field_name = tokens.next().unwrap_or_default();
        let field = SortField::from_name(field_name).ok_or_else(|| {
            SpacerError::bad_request_with(
                format!("Unsupported sort field '{}'", field_name),
                format!("Supported fields: {}", SortField::supported_names()),
            )
        })?;

        let direction = match tokens.next() {
            None => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("ASC") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("DESC") => SortDirection::Desc,
            Some(d) => {
                return Err(SpacerError::bad_request(format!(
                    "Invalid sort direction '{}' for field {}; expected ASC or DESC",
                    d,
                    field.name()
                )));
            }
        };

        if tokens.next().is_some() {
            return Err(SpacerError::bad_request(format!(
                "Invalid sort clause '{}'; expected '<field> [ASC|DESC]'",
                clause
            )));
        }

        clauses.push(SortClause { field, direction });
    }

    // Only separators, e.g. " , "
    if clauses.is_empty() {
        return parse_sorting(None);
    }

    Ok(clauses)
}

/// Stable multi-key sort: primary clause first, later clauses break ties
pub fn sort_entries(entries: &mut [SpacerHistoryEntry], clauses: &[SortClause]) {
    entries.sort_by(|a, b| {
        clauses
            .iter()
            .map(|clause| clause.compare(a, b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

/// Numeric order when both values parse, otherwise plain string order
fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or_else(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}
