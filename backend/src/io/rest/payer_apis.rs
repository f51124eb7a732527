//! # REST API for Payer Queries

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use serde::Deserialize;
use tracing::info;

use super::mappers::MemberMapper;
use super::{bad_request, error_response, parse_date};
use crate::domain::commands::payer::UpcomingPayersQuery;
use crate::AppState;

pub const DEFAULT_UPCOMING_DAYS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct PayerDateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub from: Option<String>,
    pub days: Option<usize>,
}

/// Queue and payer for today
pub async fn get_today(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/payer/today");

    match state.payer_service.current_overview().await {
        Ok(overview) => {
            (StatusCode::OK, Json(MemberMapper::to_overview_dto(overview))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Queue and payer for `?date=YYYY-MM-DD` (today when omitted)
pub async fn get_payer_for_date(
    State(state): State<AppState>,
    query: Result<Query<PayerDateQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    info!("GET /api/payer - query: {:?}", query);

    let date = match query.date.as_deref() {
        Some(value) => match parse_date(value) {
            Ok(date) => date,
            Err(response) => return response,
        },
        None => Local::now().date_naive(),
    };

    match state.payer_service.queue_overview(date).await {
        Ok(overview) => {
            (StatusCode::OK, Json(MemberMapper::to_overview_dto(overview))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Payers for the next `?days=N` business days from `?from=YYYY-MM-DD`
pub async fn get_upcoming(
    State(state): State<AppState>,
    query: Result<Query<UpcomingQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    info!("GET /api/payer/upcoming - query: {:?}", query);

    let from = match query.from.as_deref() {
        Some(value) => match parse_date(value) {
            Ok(date) => date,
            Err(response) => return response,
        },
        None => Local::now().date_naive(),
    };

    let days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    if days == 0 {
        return bad_request("days must be at least 1".to_string());
    }

    let request = UpcomingPayersQuery { from, days };

    match state.payer_service.upcoming(request).await {
        Ok(days) => {
            (StatusCode::OK, Json(MemberMapper::to_upcoming_dto(days))).into_response()
        }
        Err(e) => error_response(e),
    }
}
