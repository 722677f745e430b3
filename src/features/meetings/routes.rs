use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::meetings::handlers;
use crate::features::meetings::services::MeetingService;

/// Create routes for the meetings feature
pub fn routes(service: Arc<MeetingService>) -> Router {
    Router::new()
        .route("/api/meetings", post(handlers::create_meeting))
        .route("/api/meetings/mine", get(handlers::list_my_meetings))
        .route(
            "/api/meetings/{id}",
            get(handlers::get_meeting)
                .put(handlers::update_meeting)
                .delete(handlers::delete_meeting),
        )
        .route("/api/meetings/{id}/status", put(handlers::update_meeting_status))
        .route("/api/meetings/{id}/accept", put(handlers::accept_meeting))
        .with_state(service)
}
