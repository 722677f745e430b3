mod engine_client;

pub use engine_client::{
    EngineCandidate, EngineRequest, EngineResponse, HttpRecommendationEngine,
    RecommendationEngine,
};
