use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::notifications::handlers;
use crate::features::notifications::services::NotificationService;

/// Create routes for the notifications feature
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/notifications", get(handlers::list_notifications))
        .route(
            "/api/notifications/unread-count",
            get(handlers::unread_count),
        )
        .route("/api/notifications/read-all", put(handlers::mark_all_read))
        .route("/api/notifications/{id}/read", put(handlers::mark_read))
        .route(
            "/api/notifications/{id}",
            axum::routing::delete(handlers::delete_notification),
        )
        .with_state(service)
}
