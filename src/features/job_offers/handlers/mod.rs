pub mod job_offer_handler;
pub mod recommendation_handler;

pub use job_offer_handler::*;
pub use recommendation_handler::*;
