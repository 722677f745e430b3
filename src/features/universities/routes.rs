use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::universities::handlers;
use crate::features::universities::services::UniversityService;

/// Create routes for the universities feature
pub fn routes(service: Arc<UniversityService>) -> Router {
    Router::new()
        .route(
            "/api/universities",
            get(handlers::list_universities).post(handlers::create_university),
        )
        .route(
            "/api/universities/{id}",
            get(handlers::get_university)
                .put(handlers::update_university)
                .delete(handlers::delete_university),
        )
        .with_state(service)
}
