use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::posts::handlers;
use crate::features::posts::services::PostService;
use crate::shared::constants::MAX_UPLOAD_SIZE;

/// Create routes for the posts feature
pub fn routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route(
            "/api/posts",
            get(handlers::feed).post(handlers::create_post),
        )
        .route(
            "/api/posts/attachments",
            post(handlers::upload_attachment)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/posts/{id}",
            get(handlers::get_post).delete(handlers::delete_post),
        )
        .route(
            "/api/posts/{id}/like",
            put(handlers::like_post).delete(handlers::unlike_post),
        )
        .route(
            "/api/posts/{id}/comments",
            get(handlers::list_comments).post(handlers::comment_post),
        )
        .route("/api/posts/comments/{id}", delete(handlers::delete_comment))
        .with_state(service)
}
