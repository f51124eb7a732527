//! # REST API for the Member Queue
//!
//! Endpoints for listing the queue and appending members.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{info, warn};

use super::mappers::MemberMapper;
use super::{bad_request, error_body, error_response};
use crate::domain::commands::members::AppendMemberCommand;
use crate::AppState;
use shared::{CreateMemberRequest, CreateMemberResponse};

/// List all members in rotation order
pub async fn list_members(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/members");

    match state.member_service.list_members().await {
        Ok(members) => {
            (StatusCode::OK, Json(MemberMapper::to_member_list_dto(members))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Append a member and return the recomputed queue for today.
///
/// Once the member is stored the response is always 201; a failure to
/// recompute the queue is reported in `overview_error` so clients do not
/// retry an append that already happened.
pub async fn create_member(
    State(state): State<AppState>,
    payload: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    info!("POST /api/members - request: {:?}", request);

    let remote_weekday = match request.remote_weekday {
        Some(input) => match MemberMapper::weekday_input_to_domain(input) {
            Ok(day) => Some(day),
            Err(e) => return bad_request(e.to_string()),
        },
        None => None,
    };

    let command = AppendMemberCommand {
        name: request.name,
        remote_weekday,
    };

    let member = match state.member_service.append_member(command).await {
        Ok(member) => member,
        Err(e) => return error_response(e),
    };

    let (overview, overview_error) = match state.payer_service.current_overview().await {
        Ok(overview) => (Some(MemberMapper::to_overview_dto(overview)), None),
        Err(e) => {
            warn!("Member {} was stored but the queue could not be recomputed: {}", member.id, e);
            (None, Some(error_body(&e)))
        }
    };

    let response = CreateMemberResponse {
        member: MemberMapper::to_dto(member),
        overview,
        overview_error,
        success_message: "Member added to the queue".to_string(),
    };
    (StatusCode::CREATED, Json(response)).into_response()
}
