//! Response construction.
//!
//! # Responsibilities
//! - Build the gate's redirect: `302 Found`, `Location`, empty body
//! - Serialize query outcomes for presentation code
//!
//! # Design Decisions
//! - `302` rather than axum's `Redirect::to` (which answers `303`)
//! - Outcome reports are always `200`; the category lives in the body

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::db::{QueryOutcome, QueryReport};

/// `302 Found` to `location` with an empty body.
pub fn redirect_response(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let mut response = StatusCode::FOUND.into_response();
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        Err(e) => {
            tracing::error!(location = %location, error = %e, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// JSON body for a query outcome.
pub fn outcome_response(outcome: QueryOutcome) -> Response {
    (StatusCode::OK, Json(QueryReport::from(outcome))).into_response()
}
