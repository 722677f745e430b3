use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::job_offers::handlers::{self, RecommendationState};
use crate::features::job_offers::services::{JobOfferService, RecommendationService};

/// Create routes for the job offers feature
pub fn routes(
    job_offer_service: Arc<JobOfferService>,
    recommendation_service: Arc<RecommendationService>,
) -> Router {
    let recommendation_state = RecommendationState {
        job_offer_service: Arc::clone(&job_offer_service),
        recommendation_service,
    };

    let offer_routes = Router::new()
        .route(
            "/api/job-offers",
            get(handlers::list_job_offers).post(handlers::create_job_offer),
        )
        .route(
            "/api/job-offers/{id}",
            get(handlers::get_job_offer)
                .put(handlers::update_job_offer)
                .delete(handlers::delete_job_offer),
        )
        .with_state(job_offer_service);

    let recommendation_routes = Router::new()
        .route(
            "/api/job-offers/{id}/recommendations",
            get(handlers::list_recommendations).delete(handlers::delete_recommendations),
        )
        .route(
            "/api/job-offers/{id}/recommendations/generate",
            post(handlers::generate_recommendations),
        )
        .route(
            "/api/job-offers/{id}/with-recommendations",
            get(handlers::get_offer_with_recommendations),
        )
        .route(
            "/api/recommendations/{id}/status",
            put(handlers::update_recommendation_status),
        )
        .with_state(recommendation_state);

    offer_routes.merge(recommendation_routes)
}
