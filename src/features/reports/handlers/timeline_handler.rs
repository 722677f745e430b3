use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireReviewer, RequireStagiaire};
use crate::features::reports::dtos::{StageTimelineDto, TimelineDto, UpdateStageTimelineDto};
use crate::features::reports::services::TimelineService;
use crate::shared::types::ApiResponse;

/// Get the calling stagiaire's derived timeline
///
/// One step per active report type, ordered by display order, with the
/// computed due date and the status derived from the most recent report.
#[utoipa::path(
    get,
    path = "/api/timeline/mine",
    responses(
        (status = 200, description = "Derived timeline", body = ApiResponse<TimelineDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "timeline"
)]
pub async fn get_my_timeline(
    RequireStagiaire(user): RequireStagiaire,
    State(service): State<Arc<TimelineService>>,
) -> Result<Json<ApiResponse<TimelineDto>>> {
    let timeline = service.get_stagiaire_timeline(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(timeline), None, None)))
}

/// Get the derived timeline of a stagiaire (reviewer view)
#[utoipa::path(
    get,
    path = "/api/timeline/{stagiaire_id}",
    params(("stagiaire_id" = Uuid, Path, description = "Stagiaire id")),
    responses(
        (status = 200, description = "Derived timeline", body = ApiResponse<TimelineDto>),
        (status = 404, description = "Stagiaire not found")
    ),
    security(("bearer_auth" = [])),
    tag = "timeline"
)]
pub async fn get_stagiaire_timeline(
    RequireReviewer(_user): RequireReviewer,
    State(service): State<Arc<TimelineService>>,
    Path(stagiaire_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TimelineDto>>> {
    let timeline = service.get_stagiaire_timeline(stagiaire_id).await?;
    Ok(Json(ApiResponse::success(Some(timeline), None, None)))
}

/// Get the persisted anchor dates of a stagiaire's timeline
#[utoipa::path(
    get,
    path = "/api/timeline/{stagiaire_id}/anchors",
    params(("stagiaire_id" = Uuid, Path, description = "Stagiaire id")),
    responses(
        (status = 200, description = "Anchor dates", body = ApiResponse<StageTimelineDto>),
        (status = 404, description = "Stagiaire not found")
    ),
    security(("bearer_auth" = [])),
    tag = "timeline"
)]
pub async fn get_timeline_anchors(
    RequireReviewer(_user): RequireReviewer,
    State(service): State<Arc<TimelineService>>,
    Path(stagiaire_id): Path<Uuid>,
) -> Result<Json<ApiResponse<StageTimelineDto>>> {
    let anchors = service.get_anchors(stagiaire_id).await?;
    Ok(Json(ApiResponse::success(Some(anchors), None, None)))
}

/// Correct a stagiaire's timeline anchor dates (admin only)
#[utoipa::path(
    put,
    path = "/api/timeline/{stagiaire_id}/anchors",
    params(("stagiaire_id" = Uuid, Path, description = "Stagiaire id")),
    request_body = UpdateStageTimelineDto,
    responses(
        (status = 200, description = "Anchors updated", body = ApiResponse<StageTimelineDto>),
        (status = 404, description = "No timeline recorded")
    ),
    security(("bearer_auth" = [])),
    tag = "timeline"
)]
pub async fn update_timeline_anchors(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<TimelineService>>,
    Path(stagiaire_id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateStageTimelineDto>,
) -> Result<Json<ApiResponse<StageTimelineDto>>> {
    let anchors = service.update_anchors(stagiaire_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(anchors),
        Some("Timeline anchors updated".to_string()),
        None,
    )))
}
