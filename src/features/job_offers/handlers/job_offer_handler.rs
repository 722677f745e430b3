use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireStaff;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::job_offers::dtos::{
    CreateJobOfferDto, JobOfferResponseDto, UpdateJobOfferDto,
};
use crate::features::job_offers::services::JobOfferService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Publish a job offer
#[utoipa::path(
    post,
    path = "/api/job-offers",
    request_body = CreateJobOfferDto,
    responses(
        (status = 201, description = "Job offer published", body = ApiResponse<JobOfferResponseDto>),
        (status = 403, description = "Staff access required")
    ),
    security(("bearer_auth" = [])),
    tag = "job-offers"
)]
pub async fn create_job_offer(
    RequireStaff(user): RequireStaff,
    State(service): State<Arc<JobOfferService>>,
    AppJson(dto): AppJson<CreateJobOfferDto>,
) -> Result<(StatusCode, Json<ApiResponse<JobOfferResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let offer = service.create(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(offer), None, None)),
    ))
}

/// List job offers
#[utoipa::path(
    get,
    path = "/api/job-offers",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Job offers", body = ApiResponse<Vec<JobOfferResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "job-offers"
)]
pub async fn list_job_offers(
    _user: AuthenticatedUser,
    State(service): State<Arc<JobOfferService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<JobOfferResponseDto>>>> {
    let (offers, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(offers),
        None,
        Some(Meta { total }),
    )))
}

/// Get a job offer by id
#[utoipa::path(
    get,
    path = "/api/job-offers/{id}",
    params(("id" = Uuid, Path, description = "Job offer id")),
    responses(
        (status = 200, description = "Job offer found", body = ApiResponse<JobOfferResponseDto>),
        (status = 404, description = "Job offer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "job-offers"
)]
pub async fn get_job_offer(
    _user: AuthenticatedUser,
    State(service): State<Arc<JobOfferService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobOfferResponseDto>>> {
    let offer = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(offer), None, None)))
}

/// Update a job offer
#[utoipa::path(
    put,
    path = "/api/job-offers/{id}",
    params(("id" = Uuid, Path, description = "Job offer id")),
    request_body = UpdateJobOfferDto,
    responses(
        (status = 200, description = "Job offer updated", body = ApiResponse<JobOfferResponseDto>),
        (status = 404, description = "Job offer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "job-offers"
)]
pub async fn update_job_offer(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<JobOfferService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateJobOfferDto>,
) -> Result<Json<ApiResponse<JobOfferResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let offer = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(offer), None, None)))
}

/// Delete a job offer
#[utoipa::path(
    delete,
    path = "/api/job-offers/{id}",
    params(("id" = Uuid, Path, description = "Job offer id")),
    responses(
        (status = 200, description = "Job offer deleted"),
        (status = 404, description = "Job offer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "job-offers"
)]
pub async fn delete_job_offer(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<JobOfferService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Job offer deleted".to_string()),
        None,
    )))
}
