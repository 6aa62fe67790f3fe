//! Query parameters and paged results for history queries

use crate::Result;
use crate::constants::{MAX_PAGE_SIZE, MAX_SKIP_COUNT};
use crate::error::SpacerError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Parameters of a time-window history query
#[derive(Debug, Clone)]
pub struct RecordsQuery {
    pub resource_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub sorting: Option<String>,
    pub skip_count: i64,
    pub max_result_count: i64,
}

impl RecordsQuery {
    /// Check the query preconditions
    pub fn validate(&self) -> Result<()> {
        if self.resource_id.trim().is_empty() {
            return Err(SpacerError::bad_request("ResourceId must not be empty"));
        }

        if self.start_time > self.end_time {
            return Err(SpacerError::bad_request(
                "StartTime must not be later than EndTime",
            ));
        }

        if self.skip_count < 0 {
            return Err(SpacerError::bad_request("SkipCount must not be negative"));
        }

        if self.skip_count > MAX_SKIP_COUNT {
            return Err(SpacerError::bad_request(format!(
                "SkipCount must not exceed {}",
                MAX_SKIP_COUNT
            )));
        }

        if self.max_result_count <= 0 || self.max_result_count > MAX_PAGE_SIZE {
            return Err(SpacerError::bad_request(format!(
                "MaxResultCount must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(())
    }
}

/// One page of results plus derived paging metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedRecords<T> {
    pub data: Vec<T>,
    pub total_count: i64,
    pub skip_count: i64,
    pub max_result_count: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedRecords<T> {
    /// Build a page; `max_result_count` must already be validated as positive
    pub fn new(data: Vec<T>, total_count: i64, skip_count: i64, max_result_count: i64) -> Self {
        let current_page = (skip_count / max_result_count).saturating_add(1);
        let total_pages = total_count / max_result_count
            + i64::from(total_count % max_result_count != 0);

        Self {
            data,
            total_count,
            skip_count,
            max_result_count,
            current_page,
            total_pages,
            has_previous_page: current_page > 1,
            has_next_page: current_page < total_pages,
        }
    }
}

/// Apply `skip` then `take` to already-sorted items
pub fn paginate<T>(items: Vec<T>, skip_count: i64, max_result_count: i64) -> Vec<T> {
    let skip = usize::try_from(skip_count).unwrap_or(0);
    let take = usize::try_from(max_result_count).unwrap_or(0);
    items.into_iter().skip(skip).take(take).collect()
}
