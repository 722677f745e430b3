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
use crate::features::report_types::dtos::{
    CreateReportTypeDto, ReportTypeResponseDto, UpdateReportTypeDto,
};
use crate::features::report_types::services::ReportTypeService;
use crate::shared::types::ApiResponse;

/// List all report types
#[utoipa::path(
    get,
    path = "/api/report-types",
    responses(
        (status = 200, description = "List of report types", body = ApiResponse<Vec<ReportTypeResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "report-types"
)]
pub async fn list_report_types(
    _user: AuthenticatedUser,
    State(service): State<Arc<ReportTypeService>>,
) -> Result<Json<ApiResponse<Vec<ReportTypeResponseDto>>>> {
    let types = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(types), None, None)))
}

/// List active report types (the current timeline steps)
#[utoipa::path(
    get,
    path = "/api/report-types/active",
    responses(
        (status = 200, description = "Active report types", body = ApiResponse<Vec<ReportTypeResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "report-types"
)]
pub async fn list_active_report_types(
    _user: AuthenticatedUser,
    State(service): State<Arc<ReportTypeService>>,
) -> Result<Json<ApiResponse<Vec<ReportTypeResponseDto>>>> {
    let types = service.list_active().await?;
    Ok(Json(ApiResponse::success(Some(types), None, None)))
}

/// Get report type by id
#[utoipa::path(
    get,
    path = "/api/report-types/{id}",
    params(("id" = Uuid, Path, description = "Report type id")),
    responses(
        (status = 200, description = "Report type found", body = ApiResponse<ReportTypeResponseDto>),
        (status = 404, description = "Report type not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-types"
)]
pub async fn get_report_type(
    _user: AuthenticatedUser,
    State(service): State<Arc<ReportTypeService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportTypeResponseDto>>> {
    let report_type = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(report_type), None, None)))
}

/// Create a report type
#[utoipa::path(
    post,
    path = "/api/report-types",
    request_body = CreateReportTypeDto,
    responses(
        (status = 201, description = "Report type created", body = ApiResponse<ReportTypeResponseDto>),
        (status = 409, description = "Name already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "report-types"
)]
pub async fn create_report_type(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ReportTypeService>>,
    AppJson(dto): AppJson<CreateReportTypeDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportTypeResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let report_type = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report_type), None, None)),
    ))
}

/// Update a report type
#[utoipa::path(
    put,
    path = "/api/report-types/{id}",
    params(("id" = Uuid, Path, description = "Report type id")),
    request_body = UpdateReportTypeDto,
    responses(
        (status = 200, description = "Report type updated", body = ApiResponse<ReportTypeResponseDto>),
        (status = 404, description = "Report type not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-types"
)]
pub async fn update_report_type(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ReportTypeService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateReportTypeDto>,
) -> Result<Json<ApiResponse<ReportTypeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let report_type = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(report_type), None, None)))
}

/// Delete a report type
#[utoipa::path(
    delete,
    path = "/api/report-types/{id}",
    params(("id" = Uuid, Path, description = "Report type id")),
    responses(
        (status = 200, description = "Report type deleted"),
        (status = 404, description = "Report type not found"),
        (status = 409, description = "Report type still referenced by reports")
    ),
    security(("bearer_auth" = [])),
    tag = "report-types"
)]
pub async fn delete_report_type(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ReportTypeService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report type deleted".to_string()),
        None,
    )))
}
