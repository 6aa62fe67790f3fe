//! Request parameter parsing shared by the handlers

use crate::Result;
use crate::app::services::record_query::RecordsQuery;
use crate::constants::ACTOR_HEADER;
use crate::error::SpacerError;
use axum::http::HeaderMap;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// `?abSite=` on device lookups
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSideParams {
    pub ab_site: Option<String>,
}

/// Query string of the paged history endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsParams {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub sorting: Option<String>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}

impl RecordsParams {
    /// Resolve into a query, applying the configured page size when omitted
    pub fn into_query(self, resource_id: String, default_page_size: i64) -> Result<RecordsQuery> {
        let start_time = parse_time("StartTime", required("StartTime", self.start_time)?.as_str())?;
        let end_time = parse_time("EndTime", required("EndTime", self.end_time)?.as_str())?;

        Ok(RecordsQuery {
            resource_id,
            start_time,
            end_time,
            sorting: self.sorting,
            skip_count: self.skip_count.unwrap_or(0),
            max_result_count: self.max_result_count.unwrap_or(default_page_size),
        })
    }
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SpacerError::bad_request(format!("{} is required", name)))
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]` or `YYYY-MM-DD`; naive forms are UTC
pub fn parse_time(name: &str, value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(time.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
        .ok_or_else(|| {
            SpacerError::bad_request_with(
                format!("{} is not a valid timestamp: '{}'", name, value),
                "Expected RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD",
            )
        })
}

/// Parse a path id
pub fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| SpacerError::bad_request(format!("Invalid id '{}'", value)))
}

/// Acting user from the optional `x-user-id` header
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Uuid>> {
    let Some(value) = headers.get(ACTOR_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .map(Some)
        .ok_or_else(|| {
            SpacerError::bad_request(format!("Header {} must be a UUID", ACTOR_HEADER))
        })
}
