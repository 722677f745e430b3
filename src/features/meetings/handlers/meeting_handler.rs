use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireReviewer;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::meetings::dtos::{
    CreateMeetingDto, MeetingResponseDto, UpdateMeetingDto, UpdateMeetingStatusDto,
};
use crate::features::meetings::services::MeetingService;
use crate::shared::types::ApiResponse;

/// Schedule a meeting and invite participants
#[utoipa::path(
    post,
    path = "/api/meetings",
    request_body = CreateMeetingDto,
    responses(
        (status = 201, description = "Meeting created", body = ApiResponse<MeetingResponseDto>),
        (status = 403, description = "Reviewer access required")
    ),
    security(("bearer_auth" = [])),
    tag = "meetings"
)]
pub async fn create_meeting(
    RequireReviewer(user): RequireReviewer,
    State(service): State<Arc<MeetingService>>,
    AppJson(dto): AppJson<CreateMeetingDto>,
) -> Result<(StatusCode, Json<ApiResponse<MeetingResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let meeting = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(meeting), None, None)),
    ))
}

/// Meetings the caller organizes or attends
#[utoipa::path(
    get,
    path = "/api/meetings/mine",
    responses(
        (status = 200, description = "Own meetings", body = ApiResponse<Vec<MeetingResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "meetings"
)]
pub async fn list_my_meetings(
    user: AuthenticatedUser,
    State(service): State<Arc<MeetingService>>,
) -> Result<Json<ApiResponse<Vec<MeetingResponseDto>>>> {
    let meetings = service.list_mine(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(meetings), None, None)))
}

/// Get a meeting by id
#[utoipa::path(
    get,
    path = "/api/meetings/{id}",
    params(("id" = Uuid, Path, description = "Meeting id")),
    responses(
        (status = 200, description = "Meeting found", body = ApiResponse<MeetingResponseDto>),
        (status = 403, description = "No access to this meeting"),
        (status = 404, description = "Meeting not found")
    ),
    security(("bearer_auth" = [])),
    tag = "meetings"
)]
pub async fn get_meeting(
    user: AuthenticatedUser,
    State(service): State<Arc<MeetingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MeetingResponseDto>>> {
    let meeting = service.get_by_id(id, &user).await?;
    Ok(Json(ApiResponse::success(Some(meeting), None, None)))
}

/// Edit a planned meeting
#[utoipa::path(
    put,
    path = "/api/meetings/{id}",
    params(("id" = Uuid, Path, description = "Meeting id")),
    request_body = UpdateMeetingDto,
    responses(
        (status = 200, description = "Meeting updated", body = ApiResponse<MeetingResponseDto>),
        (status = 409, description = "Meeting is no longer planned")
    ),
    security(("bearer_auth" = [])),
    tag = "meetings"
)]
pub async fn update_meeting(
    user: AuthenticatedUser,
    State(service): State<Arc<MeetingService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateMeetingDto>,
) -> Result<Json<ApiResponse<MeetingResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let meeting = service.update(id, &user, dto).await?;
    Ok(Json(ApiResponse::success(Some(meeting), None, None)))
}

/// Transition a meeting's status
#[utoipa::path(
    put,
    path = "/api/meetings/{id}/status",
    params(("id" = Uuid, Path, description = "Meeting id")),
    request_body = UpdateMeetingStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<MeetingResponseDto>),
        (status = 409, description = "Illegal status transition")
    ),
    security(("bearer_auth" = [])),
    tag = "meetings"
)]
pub async fn update_meeting_status(
    user: AuthenticatedUser,
    State(service): State<Arc<MeetingService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateMeetingStatusDto>,
) -> Result<Json<ApiResponse<MeetingResponseDto>>> {
    let meeting = service.update_status(id, &user, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(meeting), None, None)))
}

/// Accept a meeting invitation
#[utoipa::path(
    put,
    path = "/api/meetings/{id}/accept",
    params(("id" = Uuid, Path, description = "Meeting id")),
    responses(
        (status = 200, description = "Invitation accepted", body = ApiResponse<MeetingResponseDto>),
        (status = 404, description = "Not invited to this meeting")
    ),
    security(("bearer_auth" = [])),
    tag = "meetings"
)]
pub async fn accept_meeting(
    user: AuthenticatedUser,
    State(service): State<Arc<MeetingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MeetingResponseDto>>> {
    let meeting = service.accept_invitation(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(
        Some(meeting),
        Some("Invitation accepted".to_string()),
        None,
    )))
}

/// Delete a meeting
#[utoipa::path(
    delete,
    path = "/api/meetings/{id}",
    params(("id" = Uuid, Path, description = "Meeting id")),
    responses(
        (status = 200, description = "Meeting deleted"),
        (status = 403, description = "Only the organizer can delete"),
        (status = 404, description = "Meeting not found")
    ),
    security(("bearer_auth" = [])),
    tag = "meetings"
)]
pub async fn delete_meeting(
    user: AuthenticatedUser,
    State(service): State<Arc<MeetingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Meeting deleted".to_string()),
        None,
    )))
}
