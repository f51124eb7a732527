//! # REST API Interface Layer
//!
//! HTTP endpoints for the payer rotation. This layer handles:
//! - JSON request/response serialization
//! - Translating domain errors into HTTP status codes
//! - Request logging
//!
//! It holds no business logic; handlers call into the domain services and
//! map the results with the mappers.

pub mod mappers;
pub mod member_apis;
pub mod payer_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDate;
use shared::{ErrorResponse, HealthResponse};
use tracing::{error, warn};

use crate::domain::QueueError;

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// JSON body describing a domain error
pub fn error_body(e: &QueueError) -> ErrorResponse {
    ErrorResponse {
        error: e.kind().to_string(),
        message: e.to_string(),
    }
}

/// Convert a domain error into a JSON error response
pub fn error_response(e: QueueError) -> Response {
    let status = match &e {
        QueueError::Validation(_) => StatusCode::BAD_REQUEST,
        QueueError::InvalidRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        QueueError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    error!("Request failed ({}): {}", status, e);

    (status, Json(error_body(&e))).into_response()
}

/// 400 response for malformed input caught before reaching the domain
pub fn bad_request(message: String) -> Response {
    warn!("Rejected request: {}", message);

    let body = ErrorResponse {
        error: "validation_error".to_string(),
        message,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// Parse a `YYYY-MM-DD` query parameter
pub fn parse_date(value: &str) -> Result<NaiveDate, Response> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| bad_request(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}
