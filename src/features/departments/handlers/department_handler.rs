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
use crate::features::departments::dtos::{DepartmentResponseDto, SaveDepartmentDto};
use crate::features::departments::services::DepartmentService;
use crate::shared::types::ApiResponse;

/// List all departments
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "List of departments", body = ApiResponse<Vec<DepartmentResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn list_departments(
    _user: AuthenticatedUser,
    State(service): State<Arc<DepartmentService>>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponseDto>>>> {
    let departments = service.list().await?;
    Ok(Json(ApiResponse::success(Some(departments), None, None)))
}

/// Get department by id
#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department found", body = ApiResponse<DepartmentResponseDto>),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn get_department(
    _user: AuthenticatedUser,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    let department = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(department), None, None)))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = SaveDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = ApiResponse<DepartmentResponseDto>),
        (status = 409, description = "Name already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn create_department(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    AppJson(dto): AppJson<SaveDepartmentDto>,
) -> Result<(StatusCode, Json<ApiResponse<DepartmentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let department = service.create(&dto.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(department), None, None)),
    ))
}

/// Rename a department
#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    request_body = SaveDepartmentDto,
    responses(
        (status = 200, description = "Department updated", body = ApiResponse<DepartmentResponseDto>),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn update_department(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SaveDepartmentDto>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let department = service.update(id, &dto.name).await?;
    Ok(Json(ApiResponse::success(Some(department), None, None)))
}

/// Delete a department
#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department still referenced")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn delete_department(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Department deleted".to_string()),
        None,
    )))
}
