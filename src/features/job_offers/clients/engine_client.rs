use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::core::config::RecommendationConfig;
use crate::core::error::{AppError, Result};

/// Request forwarded to the external matching engine
#[derive(Debug, Clone, Serialize)]
pub struct EngineRequest {
    pub job_offer_id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub department_id: Option<Uuid>,
    pub top_n: i32,
}

/// One ranked candidate as scored by the engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineCandidate {
    pub stagiaire_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub university: String,
    pub composite_score: f64,
    pub skill_similarity: f64,
    pub text_similarity: f64,
    #[serde(default)]
    pub department_match: bool,
    #[serde(default)]
    pub match_reasons: Vec<String>,
}

/// Engine response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct EngineResponse {
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<EngineCandidate>,
    #[serde(default)]
    pub total_found: i64,
    #[serde(default)]
    pub error: Option<String>,
}

/// Seam for the external AI recommendation engine.
///
/// The matching algorithm itself is an opaque collaborator; this service
/// only orchestrates the HTTP calls and persists the results.
#[async_trait]
pub trait RecommendationEngine: Send + Sync {
    /// Whether the engine is reachable and ready
    async fn is_healthy(&self) -> bool;

    /// Score candidates for a job offer
    async fn recommend(&self, request: &EngineRequest) -> Result<EngineResponse>;
}

/// HTTP client for the Python matching service
pub struct HttpRecommendationEngine {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecommendationEngine {
    pub fn new(config: &RecommendationConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RecommendationEngine for HttpRecommendationEngine {
    async fn is_healthy(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Recommendation engine health check failed: {}", e);
                false
            }
        }
    }

    async fn recommend(&self, request: &EngineRequest) -> Result<EngineResponse> {
        let url = format!("{}/recommend", self.base_url);

        tracing::debug!(
            "Requesting recommendations: offer={}, top_n={}",
            request.job_offer_id,
            request.top_n
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Recommendation engine request failed: {:?}", e);
                AppError::ExternalServiceError(format!(
                    "Recommendation engine request failed: {}",
                    e
                ))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Recommendation engine returned status {}",
                response.status()
            )));
        }

        let body: EngineResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse engine response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse engine response: {}", e))
        })?;

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_response_parses_with_missing_optionals() {
        let json = r#"{
            "success": true,
            "recommendations": [{
                "stagiaire_id": "7f8a6e46-9c7b-4bfb-8c2e-0a4f9f3d4a11",
                "name": "Amal Ben Salah",
                "email": "amal@example.com",
                "composite_score": 0.91,
                "skill_similarity": 0.88,
                "text_similarity": 0.72
            }],
            "total_found": 1
        }"#;

        let response: EngineResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.recommendations.len(), 1);
        let candidate = &response.recommendations[0];
        assert_eq!(candidate.email, "amal@example.com");
        assert!(!candidate.department_match);
        assert!(candidate.match_reasons.is_empty());
    }

    #[test]
    fn test_engine_error_response_parses() {
        let json = r#"{"success": false, "error": "model not loaded"}"#;
        let response: EngineResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("model not loaded"));
        assert!(response.recommendations.is_empty());
    }
}
