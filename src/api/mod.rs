//! HTTP surface of the spacer validation service
//!
//! All resource routes are mounted under `/api/v1`:
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | GET  | `/spacer-validation-data/{id}` | current row |
//! | GET  | `/spacer-validation-data/devices/{resourceId}/data?abSite=A\|B` | current row for a side |
//! | GET  | `/spacer-validation-data/devices/{resourceId}/latest` | latest row across sides |
//! | POST | `/spacer-validation-data` | 201 + created row, `Location` header |
//! | PUT  | `/spacer-validation-data` | updated row |
//! | POST | `/spacer-validation-data/verify` | verification message |
//! | GET  | `/spacer-validation-data-records/{id}` | history entry |
//! | GET  | `/spacer-validation-data-records/devices/{resourceId}/records` | paged history |
//!
//! `GET /healthz` sits outside the prefix. Failures render as
//! `{"error": {"code", "message", "details"}}` with the status of their kind.

pub mod error;
pub mod handlers;
pub mod params;

use crate::app::services::spacer_service::SpacerService;
use crate::constants::API_PREFIX;
use axum::Router;
use axum::routing::{get, post};

/// Build the application router around a shared service
pub fn router(service: SpacerService) -> Router {
    let api = Router::new()
        .route(
            "/spacer-validation-data",
            post(handlers::insert).put(handlers::update),
        )
        .route("/spacer-validation-data/verify", post(handlers::verify))
        .route("/spacer-validation-data/:id", get(handlers::get_by_id))
        .route(
            "/spacer-validation-data/devices/:resource_id/data",
            get(handlers::get_by_device),
        )
        .route(
            "/spacer-validation-data/devices/:resource_id/latest",
            get(handlers::get_latest),
        )
        .route(
            "/spacer-validation-data-records/:id",
            get(handlers::get_record),
        )
        .route(
            "/spacer-validation-data-records/devices/:resource_id/records",
            get(handlers::get_records),
        );

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .nest(API_PREFIX, api)
        .with_state(service)
}
