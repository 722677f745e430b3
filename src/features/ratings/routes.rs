use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::ratings::handlers;
use crate::features::ratings::services::RatingService;

/// Create routes for the ratings feature
pub fn routes(service: Arc<RatingService>) -> Router {
    Router::new()
        .route("/api/ratings", post(handlers::create_rating))
        .route("/api/ratings/mine", get(handlers::list_my_ratings))
        .route("/api/ratings/about-me", get(handlers::list_ratings_about_me))
        .route("/api/ratings/pending", get(handlers::list_pending_ratings))
        .route("/api/ratings/stats/{user_id}", get(handlers::get_rating_stats))
        .route(
            "/api/ratings/{id}",
            get(handlers::get_rating)
                .put(handlers::update_rating)
                .delete(handlers::delete_rating),
        )
        .route("/api/ratings/{id}/submit", put(handlers::submit_rating))
        .route("/api/ratings/{id}/approve", put(handlers::approve_rating))
        .route("/api/ratings/{id}/reject", put(handlers::reject_rating))
        .route("/api/ratings/{id}/response", post(handlers::respond_to_rating))
        .with_state(service)
}
