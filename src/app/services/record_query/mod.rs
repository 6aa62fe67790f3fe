//! Time-window history queries with dynamic sorting and pagination
//!
//! # Architecture
//!
//! - [`paging`] - Query parameters, preconditions and the paged result shape
//! - [`sorting`] - Sort expression parsing and the field comparator table
//!
//! # Processing Pipeline
//!
//! 1. **Validate**: resource id present, window ordered, paging bounds sane
//! 2. **Parse sorting**: fail fast on unsupported fields before touching storage
//! 3. **Filter**: history entries for the device created within `[start, end]`
//! 4. **Sort, skip, take**: an empty window is `NotFound`, not an empty page

pub mod paging;
pub mod sorting;

#[cfg(test)]
pub mod tests;

pub use paging::{PagedRecords, RecordsQuery, paginate};
pub use sorting::{SortClause, SortDirection, SortField, parse_sorting, sort_entries};

use crate::Result;
use crate::app::adapters::store::SpacerStore;
use crate::app::models::SpacerHistoryEntry;
use crate::error::SpacerError;
use chrono::SecondsFormat;
use tracing::debug;

/// Run a paged history query against the store
///
/// # Errors
///
/// * `BadRequest` for invalid preconditions or sort expressions
/// * `NotFound` when no history entry falls inside the window
pub fn query_records(
    store: &dyn SpacerStore,
    query: &RecordsQuery,
) -> Result<PagedRecords<SpacerHistoryEntry>> {
    query.validate()?;
    let clauses = parse_sorting(query.sorting.as_deref())?;

    let resource_id = query.resource_id.trim();
    let mut entries = store.find_history_in_window(resource_id, query.start_time, query.end_time)?;
    let total_count = entries.len() as i64;

    if total_count == 0 {
        return Err(SpacerError::not_found_with(
            format!(
                "No spacer records found for device {} in the requested time window",
                resource_id
            ),
            format!(
                "Window: {} to {}",
                query.start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
                query.end_time.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
        ));
    }

    sort_entries(&mut entries, &clauses);
    let page = paginate(entries, query.skip_count, query.max_result_count);

    debug!(
        "History query for {}: {} matches, returning {} (skip {}, take {})",
        resource_id,
        total_count,
        page.len(),
        query.skip_count,
        query.max_result_count
    );

    Ok(PagedRecords::new(
        page,
        total_count,
        query.skip_count,
        query.max_result_count,
    ))
}
