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
use crate::features::auth::model::AuthenticatedUser;
use crate::features::posts::dtos::{
    AttachmentUploadedDto, CreateCommentDto, CreatePostDto, PostCommentDto, PostResponseDto,
};
use crate::features::posts::services::PostService;
use crate::shared::constants::MAX_UPLOAD_SIZE;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Upload a publication attachment
///
/// Accepts multipart/form-data with a single `file` field; returns the
/// stored key and public URL to reference when creating the post.
#[utoipa::path(
    post,
    path = "/api/posts/attachments",
    request_body(content_type = "multipart/form-data", description = "Attachment file"),
    responses(
        (status = 201, description = "Attachment stored", body = ApiResponse<AttachmentUploadedDto>),
        (status = 400, description = "Invalid file")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn upload_attachment(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AttachmentUploadedDto>>)> {
    let mut file: Option<(Vec<u8>, String, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() == Some("file") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "attachment.bin".to_string());
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
            file = Some((data.to_vec(), file_name, content_type));
        }
    }

    let (data, file_name, content_type) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let attachment = service
        .upload_attachment(user.user_id, data, &file_name, &content_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(attachment), None, None)),
    ))
}

/// Publish a post
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post published", body = ApiResponse<PostResponseDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn create_post(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    AppJson(dto): AppJson<CreatePostDto>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let post = service.create(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(post), None, None)),
    ))
}

/// The publication feed, newest first
#[utoipa::path(
    get,
    path = "/api/posts",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Feed page", body = ApiResponse<Vec<PostResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn feed(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<PostResponseDto>>>> {
    let (posts, total) = service.feed(user.user_id, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(posts),
        None,
        Some(Meta { total }),
    )))
}

/// Get a post by id
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = ApiResponse<PostResponseDto>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn get_post(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PostResponseDto>>> {
    let post = service.get_by_id(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(post), None, None)))
}

/// Like a post
#[utoipa::path(
    put,
    path = "/api/posts/{id}/like",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post liked", body = ApiResponse<PostResponseDto>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn like_post(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PostResponseDto>>> {
    let post = service.like(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(post), None, None)))
}

/// Remove a like
#[utoipa::path(
    delete,
    path = "/api/posts/{id}/like",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Like removed", body = ApiResponse<PostResponseDto>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn unlike_post(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PostResponseDto>>> {
    let post = service.unlike(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(post), None, None)))
}

/// Comment on a post
#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<PostCommentDto>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn comment_post(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<PostCommentDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let comment = service.comment(id, user.user_id, &dto.comment).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment), None, None)),
    ))
}

/// List the comments of a post
#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments", body = ApiResponse<Vec<PostCommentDto>>),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn list_comments(
    _user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PostCommentDto>>>> {
    let comments = service.list_comments(id).await?;
    Ok(Json(ApiResponse::success(Some(comments), None, None)))
}

/// Delete a comment
#[utoipa::path(
    delete,
    path = "/api/posts/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 403, description = "Only the author can delete"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn delete_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_comment(id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Comment deleted".to_string()),
        None,
    )))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 403, description = "Only the author can delete"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn delete_post(
    user: AuthenticatedUser,
    State(service): State<Arc<PostService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Post deleted".to_string()),
        None,
    )))
}
