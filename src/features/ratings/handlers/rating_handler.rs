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
use crate::features::auth::guards::RequireStaff;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::ratings::dtos::{
    CreateRatingDto, RatingResponseDto, RatingResponseInputDto, RatingStatsDto, RejectRatingDto,
    UpdateRatingDto,
};
use crate::features::ratings::services::RatingService;
use crate::shared::types::ApiResponse;

/// Create a draft rating
#[utoipa::path(
    post,
    path = "/api/ratings",
    request_body = CreateRatingDto,
    responses(
        (status = 201, description = "Draft created", body = ApiResponse<RatingResponseDto>),
        (status = 403, description = "Not allowed to evaluate this user"),
        (status = 409, description = "A live rating already exists for this user")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn create_rating(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
    AppJson(dto): AppJson<CreateRatingDto>,
) -> Result<(StatusCode, Json<ApiResponse<RatingResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let rating = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(rating), None, None)),
    ))
}

/// Edit a draft rating
#[utoipa::path(
    put,
    path = "/api/ratings/{id}",
    params(("id" = Uuid, Path, description = "Rating id")),
    request_body = UpdateRatingDto,
    responses(
        (status = 200, description = "Rating updated", body = ApiResponse<RatingResponseDto>),
        (status = 409, description = "Rating is no longer a draft")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn update_rating(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRatingDto>,
) -> Result<Json<ApiResponse<RatingResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let rating = service.update(id, &user, dto).await?;
    Ok(Json(ApiResponse::success(Some(rating), None, None)))
}

/// Submit a draft rating for approval
#[utoipa::path(
    put,
    path = "/api/ratings/{id}/submit",
    params(("id" = Uuid, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating submitted", body = ApiResponse<RatingResponseDto>),
        (status = 409, description = "Rating already submitted")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn submit_rating(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RatingResponseDto>>> {
    let rating = service.submit(id, &user).await?;
    Ok(Json(ApiResponse::success(
        Some(rating),
        Some("Rating submitted".to_string()),
        None,
    )))
}

/// Approve a submitted rating
#[utoipa::path(
    put,
    path = "/api/ratings/{id}/approve",
    params(("id" = Uuid, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating approved", body = ApiResponse<RatingResponseDto>),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Rating is not in submitted state")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn approve_rating(
    RequireStaff(user): RequireStaff,
    State(service): State<Arc<RatingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RatingResponseDto>>> {
    let rating = service.approve(id, &user).await?;
    Ok(Json(ApiResponse::success(
        Some(rating),
        Some("Rating approved".to_string()),
        None,
    )))
}

/// Reject a submitted rating
#[utoipa::path(
    put,
    path = "/api/ratings/{id}/reject",
    params(("id" = Uuid, Path, description = "Rating id")),
    request_body = RejectRatingDto,
    responses(
        (status = 200, description = "Rating rejected", body = ApiResponse<RatingResponseDto>),
        (status = 403, description = "Staff access required"),
        (status = 409, description = "Rating is not in submitted state")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn reject_rating(
    RequireStaff(user): RequireStaff,
    State(service): State<Arc<RatingService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RejectRatingDto>,
) -> Result<Json<ApiResponse<RatingResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let rating = service.reject(id, &user, &dto.reason).await?;
    Ok(Json(ApiResponse::success(
        Some(rating),
        Some("Rating rejected".to_string()),
        None,
    )))
}

/// Respond to an approved rating (evaluated user, one-time)
#[utoipa::path(
    post,
    path = "/api/ratings/{id}/response",
    params(("id" = Uuid, Path, description = "Rating id")),
    request_body = RatingResponseInputDto,
    responses(
        (status = 200, description = "Response recorded", body = ApiResponse<RatingResponseDto>),
        (status = 403, description = "Only the evaluated user can respond"),
        (status = 409, description = "Response already given or rating not approved")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn respond_to_rating(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RatingResponseInputDto>,
) -> Result<Json<ApiResponse<RatingResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let rating = service.add_response(id, &user, &dto.response).await?;
    Ok(Json(ApiResponse::success(Some(rating), None, None)))
}

/// Delete a not-yet-reviewed rating
#[utoipa::path(
    delete,
    path = "/api/ratings/{id}",
    params(("id" = Uuid, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating deleted"),
        (status = 409, description = "Reviewed ratings cannot be deleted")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn delete_rating(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Rating deleted".to_string()),
        None,
    )))
}

/// Get a rating by id
#[utoipa::path(
    get,
    path = "/api/ratings/{id}",
    params(("id" = Uuid, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating found", body = ApiResponse<RatingResponseDto>),
        (status = 403, description = "Not allowed to view this rating"),
        (status = 404, description = "Rating not found")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn get_rating(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RatingResponseDto>>> {
    let rating = service.get_by_id(id, &user).await?;
    Ok(Json(ApiResponse::success(Some(rating), None, None)))
}

/// Ratings given by the caller
#[utoipa::path(
    get,
    path = "/api/ratings/mine",
    responses(
        (status = 200, description = "Own ratings", body = ApiResponse<Vec<RatingResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn list_my_ratings(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
) -> Result<Json<ApiResponse<Vec<RatingResponseDto>>>> {
    let ratings = service.list_mine(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(ratings), None, None)))
}

/// Approved ratings about the caller
#[utoipa::path(
    get,
    path = "/api/ratings/about-me",
    responses(
        (status = 200, description = "Ratings about the caller", body = ApiResponse<Vec<RatingResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn list_ratings_about_me(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
) -> Result<Json<ApiResponse<Vec<RatingResponseDto>>>> {
    let ratings = service.list_about_me(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(ratings), None, None)))
}

/// Submitted ratings awaiting approval (staff view)
#[utoipa::path(
    get,
    path = "/api/ratings/pending",
    responses(
        (status = 200, description = "Pending approvals", body = ApiResponse<Vec<RatingResponseDto>>),
        (status = 403, description = "Staff access required")
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn list_pending_ratings(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<RatingService>>,
) -> Result<Json<ApiResponse<Vec<RatingResponseDto>>>> {
    let ratings = service.list_pending_approvals().await?;
    Ok(Json(ApiResponse::success(Some(ratings), None, None)))
}

/// Aggregate rating statistics for a user
#[utoipa::path(
    get,
    path = "/api/ratings/stats/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Rating statistics", body = ApiResponse<RatingStatsDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "ratings"
)]
pub async fn get_rating_stats(
    user: AuthenticatedUser,
    State(service): State<Arc<RatingService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<RatingStatsDto>>> {
    if user.user_id != user_id && !user.has_staff_access() {
        return Err(AppError::Forbidden(
            "You can only view your own statistics".to_string(),
        ));
    }
    let stats = service.stats_for(user_id).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
