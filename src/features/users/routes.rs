use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::users::handlers;
use crate::features::users::services::UserService;
use crate::shared::constants::MAX_UPLOAD_SIZE;

/// Create routes for the users feature
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/me", get(handlers::get_me).put(handlers::update_me))
        .route("/api/users/me/skills", put(handlers::update_my_skills))
        .route(
            "/api/users/me/cv",
            // Allow body size up to MAX_UPLOAD_SIZE + buffer for multipart overhead
            post(handlers::upload_cv).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/users/{id}",
            get(handlers::get_user).delete(handlers::deactivate_user),
        )
        .route("/api/users/{id}/tuteur", put(handlers::assign_tuteur))
        .route("/api/users/{id}/stagiaires", get(handlers::list_stagiaires))
        .route("/api/users/{id}/cv", get(handlers::download_cv))
        .with_state(service)
}
