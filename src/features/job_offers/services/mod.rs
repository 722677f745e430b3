mod job_offer_service;
mod recommendation_service;

pub use job_offer_service::JobOfferService;
pub use recommendation_service::RecommendationService;
