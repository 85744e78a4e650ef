//! Route handlers.

use axum::{
    extract::State,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::request::RequestIdExt;
use crate::http::response::outcome_response;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Database status: one guarded fetch, reported as JSON.
pub async fn database_report(State(state): State<AppState>, parts: Parts) -> Response {
    let outcome = state.query.run().await;
    tracing::debug!(
        request_id = %parts.request_id(),
        success = outcome.is_success(),
        error_type = ?outcome.error_type(),
        "Database report served"
    );
    outcome_response(outcome)
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
