//! Route handlers
//!
//! The service and store are synchronous, so every call runs on the blocking
//! pool. Extractor rejections are folded into `BadRequest` so clients always see
//! the JSON error shape.

use super::params::{DeviceSideParams, RecordsParams, actor_from_headers, parse_id};
use crate::Result;
use crate::app::models::{SpacerHistoryEntry, SpacerValidationData, SpacerValidationRecord};
use crate::app::services::record_query::PagedRecords;
use crate::app::services::spacer_service::SpacerService;
use crate::constants::API_PREFIX;
use crate::error::SpacerError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: String,
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| SpacerError::internal(format!("Request task failed: {}", e)))?
}

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        SpacerError::bad_request_with("Malformed request body", rejection.body_text())
    })
}

fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query.map(|Query(value)| value).map_err(|rejection| {
        SpacerError::bad_request_with("Malformed query string", rejection.body_text())
    })
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_by_id(
    State(service): State<SpacerService>,
    Path(id): Path<String>,
) -> Result<Json<SpacerValidationRecord>> {
    let id = parse_id(&id)?;
    blocking(move || service.get(id)).await.map(Json)
}

pub async fn get_by_device(
    State(service): State<SpacerService>,
    Path(resource_id): Path<String>,
    query: std::result::Result<Query<DeviceSideParams>, QueryRejection>,
) -> Result<Json<SpacerValidationRecord>> {
    let ab_site = query_params(query)?
        .ab_site
        .filter(|side| !side.trim().is_empty())
        .ok_or_else(|| SpacerError::bad_request("ABSite is required"))?;

    blocking(move || service.get_by_device(&resource_id, &ab_site))
        .await
        .map(Json)
}

pub async fn get_latest(
    State(service): State<SpacerService>,
    Path(resource_id): Path<String>,
) -> Result<Json<SpacerValidationRecord>> {
    blocking(move || service.get_latest(&resource_id))
        .await
        .map(Json)
}

pub async fn insert(
    State(service): State<SpacerService>,
    headers: HeaderMap,
    body: std::result::Result<Json<SpacerValidationData>, JsonRejection>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<SpacerValidationRecord>)> {
    let actor = actor_from_headers(&headers)?;
    let data = json_body(body)?;

    let record = blocking(move || service.insert(&data, actor)).await?;
    let location = format!("{}/spacer-validation-data/{}", API_PREFIX, record.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(record)))
}

pub async fn update(
    State(service): State<SpacerService>,
    headers: HeaderMap,
    body: std::result::Result<Json<SpacerValidationData>, JsonRejection>,
) -> Result<Json<SpacerValidationRecord>> {
    let actor = actor_from_headers(&headers)?;
    let data = json_body(body)?;

    blocking(move || service.update(&data, actor))
        .await
        .map(Json)
}

pub async fn verify(
    State(service): State<SpacerService>,
    body: std::result::Result<Json<SpacerValidationData>, JsonRejection>,
) -> Result<Json<VerifyResponse>> {
    let data = json_body(body)?;
    let resource_id = data
        .resource_id
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    blocking(move || service.verify(&data)).await?;
    Ok(Json(VerifyResponse {
        message: format!("Spacer data verified for device {}", resource_id),
    }))
}

pub async fn get_record(
    State(service): State<SpacerService>,
    Path(id): Path<String>,
) -> Result<Json<SpacerHistoryEntry>> {
    let id = parse_id(&id)?;
    blocking(move || service.get_record(id)).await.map(Json)
}

pub async fn get_records(
    State(service): State<SpacerService>,
    Path(resource_id): Path<String>,
    query: std::result::Result<Query<RecordsParams>, QueryRejection>,
) -> Result<Json<PagedRecords<SpacerHistoryEntry>>> {
    let default_page_size = service.config().paging.default_max_result_count;
    let query = query_params(query)?.into_query(resource_id, default_page_size)?;

    blocking(move || service.get_paged_records(&query))
        .await
        .map(Json)
}
