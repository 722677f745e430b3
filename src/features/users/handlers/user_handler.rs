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
use crate::features::users::dtos::{
    AssignTuteurDto, CvDownloadDto, CvUploadedDto, ListUsersQuery, UpdateProfileDto,
    UpdateSkillsDto, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::constants::MAX_UPLOAD_SIZE;
use crate::shared::types::{ApiResponse, Meta};

/// List users
///
/// Staff-only directory listing with optional role/department filters.
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 403, description = "Staff access required")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<UserService>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let (users, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<UserResponseDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let profile = service.get_by_id(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_me(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let profile = service.update_profile(user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Update the authenticated stagiaire's skills
#[utoipa::path(
    put,
    path = "/api/users/me/skills",
    request_body = UpdateSkillsDto,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<UserResponseDto>),
        (status = 403, description = "Stagiaire access required")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_my_skills(
    RequireStagiaire(user): RequireStagiaire,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<UpdateSkillsDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let profile = service.update_skills(user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    _user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let profile = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Assign a tuteur to a stagiaire
#[utoipa::path(
    put,
    path = "/api/users/{id}/tuteur",
    params(("id" = Uuid, Path, description = "Stagiaire id")),
    request_body = AssignTuteurDto,
    responses(
        (status = 200, description = "Tuteur assigned", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Role mismatch"),
        (status = 403, description = "Staff access required")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn assign_tuteur(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AssignTuteurDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let profile = service.assign_tuteur(id, dto.tuteur_id).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Tuteur assigned".to_string()),
        None,
    )))
}

/// List the stagiaires supervised by a tuteur
#[utoipa::path(
    get,
    path = "/api/users/{id}/stagiaires",
    params(("id" = Uuid, Path, description = "Tuteur id")),
    responses(
        (status = 200, description = "Stagiaires of the tuteur", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 403, description = "Reviewer access required")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_stagiaires(
    RequireReviewer(_user): RequireReviewer,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let stagiaires = service.list_stagiaires_of(id).await?;
    Ok(Json(ApiResponse::success(Some(stagiaires), None, None)))
}

/// Upload the authenticated stagiaire's CV
///
/// Accepts multipart/form-data with a single `file` field (PDF or Word).
#[utoipa::path(
    post,
    path = "/api/users/me/cv",
    request_body(content_type = "multipart/form-data", description = "CV file"),
    responses(
        (status = 201, description = "CV uploaded", body = ApiResponse<CvUploadedDto>),
        (status = 400, description = "Invalid file"),
        (status = 413, description = "File too large")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn upload_cv(
    RequireStagiaire(user): RequireStagiaire,
    State(service): State<Arc<UserService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CvUploadedDto>>)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() == Some("file") {
            content_type = field.content_type().map(|s| s.to_string());
            file_name = field.file_name().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;
            if data.len() > MAX_UPLOAD_SIZE {
                return Err(AppError::Validation(format!(
                    "File exceeds the maximum size of {} bytes",
                    MAX_UPLOAD_SIZE
                )));
            }
            file_data = Some(data.to_vec());
        }
    }

    let data = file_data.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "cv.pdf".to_string());
    let content_type =
        content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    let uploaded = service
        .upload_cv(user.user_id, data, &file_name, &content_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(uploaded),
            Some("CV uploaded".to_string()),
            None,
        )),
    ))
}

/// Get a presigned download URL for a user's CV
#[utoipa::path(
    get,
    path = "/api/users/{id}/cv",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Presigned URL", body = ApiResponse<CvDownloadDto>),
        (status = 403, description = "No permission to access this CV"),
        (status = 404, description = "No CV uploaded")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn download_cv(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CvDownloadDto>>> {
    let download = service.cv_download_url(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(download), None, None)))
}

/// Deactivate a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deactivated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn deactivate_user(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.deactivate(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("User deactivated".to_string()),
        None,
    )))
}
