use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireReviewer, RequireStaff, RequireStagiaire};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    ReportDownloadDto, ReportResponseDto, ResubmitReportDto, ReviewReportDto, UploadReportDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::constants::MAX_UPLOAD_SIZE;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Parsed multipart form for report submission
struct ReportUploadForm {
    report_type_id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    file: Option<(Vec<u8>, String, String)>,
}

async fn parse_upload_form(mut multipart: Multipart) -> Result<ReportUploadForm> {
    let mut form = ReportUploadForm {
        report_type_id: None,
        title: None,
        description: None,
        file: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "report.pdf".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                if data.len() > MAX_UPLOAD_SIZE {
                    return Err(AppError::Validation(format!(
                        "File exceeds the maximum size of {} bytes",
                        MAX_UPLOAD_SIZE
                    )));
                }
                form.file = Some((data.to_vec(), file_name, content_type));
            }
            "report_type_id" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field: {}", e))
                })?;
                let id = Uuid::parse_str(text.trim()).map_err(|_| {
                    AppError::Validation("report_type_id must be a valid UUID".to_string())
                })?;
                form.report_type_id = Some(id);
            }
            "title" => {
                form.title = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field: {}", e))
                })?);
            }
            "description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field: {}", e))
                })?;
                if !text.is_empty() {
                    form.description = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Submit a report
///
/// Accepts multipart/form-data with `file`, `report_type_id`, `title` and an
/// optional `description`. Fails when a report of the same type is already
/// awaiting review.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body(content_type = "multipart/form-data", description = "Report document with metadata"),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error or pending report exists"),
        (status = 403, description = "Stagiaire access required")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn upload_report(
    RequireStagiaire(user): RequireStagiaire,
    State(service): State<Arc<ReportService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let form = parse_upload_form(multipart).await?;

    let report_type_id = form
        .report_type_id
        .ok_or_else(|| AppError::Validation("Missing 'report_type_id' field".to_string()))?;
    let title = form
        .title
        .ok_or_else(|| AppError::Validation("Missing 'title' field".to_string()))?;
    let (data, file_name, content_type) = form
        .file
        .ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let dto = UploadReportDto {
        report_type_id,
        title,
        description: form.description,
    };
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service
        .upload_report(user.user_id, dto, data, &file_name, &content_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report),
            Some("Report submitted".to_string()),
            None,
        )),
    ))
}

/// Resubmit a rejected report
///
/// Accepts the same multipart form as submission (without `report_type_id`;
/// the type is carried over from the rejected report). The rejected row is
/// kept as an audit trail and linked from the new one.
#[utoipa::path(
    post,
    path = "/api/reports/{id}/resubmit",
    params(("id" = Uuid, Path, description = "Rejected report id")),
    request_body(content_type = "multipart/form-data", description = "Replacement document with metadata"),
    responses(
        (status = 201, description = "Report resubmitted", body = ApiResponse<ReportResponseDto>),
        (status = 409, description = "Referenced report is not rejected"),
        (status = 403, description = "Not the owner of the report")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn resubmit_report(
    RequireStagiaire(user): RequireStagiaire,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let form = parse_upload_form(multipart).await?;

    let title = form
        .title
        .ok_or_else(|| AppError::Validation("Missing 'title' field".to_string()))?;
    let (data, file_name, content_type) = form
        .file
        .ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let dto = ResubmitReportDto {
        title,
        description: form.description,
    };
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service
        .resubmit_report(user.user_id, id, dto, data, &file_name, &content_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report),
            Some("Report resubmitted".to_string()),
            None,
        )),
    ))
}

/// Approve a pending report
#[utoipa::path(
    put,
    path = "/api/reports/{id}/approve",
    params(("id" = Uuid, Path, description = "Report id")),
    request_body = ReviewReportDto,
    responses(
        (status = 200, description = "Report approved", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found"),
        (status = 409, description = "Report already reviewed")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn approve_report(
    RequireReviewer(user): RequireReviewer,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ReviewReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let report = service.approve_report(id, &user, &dto.feedback).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Report approved".to_string()),
        None,
    )))
}

/// Reject a pending report
#[utoipa::path(
    put,
    path = "/api/reports/{id}/reject",
    params(("id" = Uuid, Path, description = "Report id")),
    request_body = ReviewReportDto,
    responses(
        (status = 200, description = "Report rejected", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found"),
        (status = 409, description = "Report already reviewed")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn reject_report(
    RequireReviewer(user): RequireReviewer,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ReviewReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let report = service.reject_report(id, &user, &dto.feedback).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Report rejected".to_string()),
        None,
    )))
}

/// List all reports (staff view)
#[utoipa::path(
    get,
    path = "/api/reports",
    params(PaginationQuery),
    responses(
        (status = 200, description = "All reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 403, description = "Staff access required")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ReportService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let (reports, total) = service.list_all(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// List the calling stagiaire's reports
#[utoipa::path(
    get,
    path = "/api/reports/mine",
    responses(
        (status = 200, description = "Own reports", body = ApiResponse<Vec<ReportResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_my_reports(
    RequireStagiaire(user): RequireStagiaire,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_mine(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(reports), None, None)))
}

/// List pending reports routed to the calling reviewer
#[utoipa::path(
    get,
    path = "/api/reports/pending",
    responses(
        (status = 200, description = "Pending reports awaiting this reviewer", body = ApiResponse<Vec<ReportResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_pending_reports(
    RequireReviewer(user): RequireReviewer,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_pending_for(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(reports), None, None)))
}

/// List the reports of a stagiaire (reviewer view)
#[utoipa::path(
    get,
    path = "/api/reports/stagiaire/{id}",
    params(("id" = Uuid, Path, description = "Stagiaire id")),
    responses(
        (status = 200, description = "Reports of the stagiaire", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 403, description = "Reviewer access required")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_stagiaire_reports(
    RequireReviewer(_user): RequireReviewer,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_by_stagiaire(id).await?;
    Ok(Json(ApiResponse::success(Some(reports), None, None)))
}

/// Get a report by id
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 403, description = "No access to this report"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get_by_id(id, &user).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// Get a presigned download URL for a report document
#[utoipa::path(
    get,
    path = "/api/reports/{id}/download",
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Presigned URL", body = ApiResponse<ReportDownloadDto>),
        (status = 403, description = "No access to this report"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn download_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportDownloadDto>>> {
    let download = service.download_url(id, &user).await?;
    Ok(Json(ApiResponse::success(Some(download), None, None)))
}

/// Delete a report and its stored document
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn delete_report(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}
