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
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::universities::dtos::{SaveUniversityDto, UniversityResponseDto};
use crate::features::universities::services::UniversityService;
use crate::shared::types::ApiResponse;

/// List all universities
#[utoipa::path(
    get,
    path = "/api/universities",
    responses(
        (status = 200, description = "List of universities", body = ApiResponse<Vec<UniversityResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "universities"
)]
pub async fn list_universities(
    _user: AuthenticatedUser,
    State(service): State<Arc<UniversityService>>,
) -> Result<Json<ApiResponse<Vec<UniversityResponseDto>>>> {
    let universities = service.list().await?;
    Ok(Json(ApiResponse::success(Some(universities), None, None)))
}

/// Get university by id
#[utoipa::path(
    get,
    path = "/api/universities/{id}",
    params(("id" = Uuid, Path, description = "University id")),
    responses(
        (status = 200, description = "University found", body = ApiResponse<UniversityResponseDto>),
        (status = 404, description = "University not found")
    ),
    security(("bearer_auth" = [])),
    tag = "universities"
)]
pub async fn get_university(
    _user: AuthenticatedUser,
    State(service): State<Arc<UniversityService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UniversityResponseDto>>> {
    let university = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(university), None, None)))
}

/// Create a university
#[utoipa::path(
    post,
    path = "/api/universities",
    request_body = SaveUniversityDto,
    responses(
        (status = 201, description = "University created", body = ApiResponse<UniversityResponseDto>),
        (status = 409, description = "Name already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "universities"
)]
pub async fn create_university(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UniversityService>>,
    AppJson(dto): AppJson<SaveUniversityDto>,
) -> Result<(StatusCode, Json<ApiResponse<UniversityResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let university = service.create(&dto.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(university), None, None)),
    ))
}

/// Rename a university
#[utoipa::path(
    put,
    path = "/api/universities/{id}",
    params(("id" = Uuid, Path, description = "University id")),
    request_body = SaveUniversityDto,
    responses(
        (status = 200, description = "University updated", body = ApiResponse<UniversityResponseDto>),
        (status = 404, description = "University not found")
    ),
    security(("bearer_auth" = [])),
    tag = "universities"
)]
pub async fn update_university(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UniversityService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SaveUniversityDto>,
) -> Result<Json<ApiResponse<UniversityResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let university = service.update(id, &dto.name).await?;
    Ok(Json(ApiResponse::success(Some(university), None, None)))
}

/// Delete a university
#[utoipa::path(
    delete,
    path = "/api/universities/{id}",
    params(("id" = Uuid, Path, description = "University id")),
    responses(
        (status = 200, description = "University deleted"),
        (status = 404, description = "University not found"),
        (status = 409, description = "University still referenced")
    ),
    security(("bearer_auth" = [])),
    tag = "universities"
)]
pub async fn delete_university(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UniversityService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("University deleted".to_string()),
        None,
    )))
}
