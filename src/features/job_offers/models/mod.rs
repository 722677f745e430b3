mod job_offer;
mod recommendation;

pub use job_offer::{JobOffer, JobOfferDetails, JobOfferStatus};
pub use recommendation::JobOfferRecommendation;
