use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::job_offers::models::{
    JobOfferDetails, JobOfferRecommendation, JobOfferStatus,
};

/// Response DTO for a job offer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobOfferResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub department_id: Uuid,
    pub department_name: String,
    pub published_by_user_id: Uuid,
    pub published_by_name: String,
    pub published_at: DateTime<Utc>,
    pub status: JobOfferStatus,
    pub recommendations_generated: bool,
    pub last_recommendation_generated_at: Option<DateTime<Utc>>,
    pub recommendation_count: i32,
}

impl From<JobOfferDetails> for JobOfferResponseDto {
    fn from(o: JobOfferDetails) -> Self {
        Self {
            id: o.id,
            title: o.title,
            description: o.description,
            required_skills: o.required_skills,
            department_id: o.department_id,
            department_name: o.department_name,
            published_by_user_id: o.published_by_user_id,
            published_by_name: o.published_by_name,
            published_at: o.published_at,
            status: o.status,
            recommendations_generated: o.recommendations_generated,
            last_recommendation_generated_at: o.last_recommendation_generated_at,
            recommendation_count: o.recommendation_count,
        }
    }
}

/// Request DTO for publishing a job offer
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateJobOfferDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(length(min = 1, max = 2000))]
    pub required_skills: String,
    pub department_id: Uuid,
    #[serde(default)]
    pub status: Option<JobOfferStatus>,
}

/// Request DTO for editing a job offer; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateJobOfferDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub required_skills: Option<String>,
    pub department_id: Option<Uuid>,
    pub status: Option<JobOfferStatus>,
}

/// Response DTO for one ranked candidate recommendation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationResponseDto {
    pub id: Uuid,
    pub job_offer_id: Uuid,
    pub stagiaire_id: Uuid,
    pub stagiaire_name: String,
    pub stagiaire_email: String,
    pub skills: String,
    pub department: String,
    pub university: String,
    pub composite_score: Decimal,
    pub skill_similarity: Decimal,
    pub text_similarity: Decimal,
    pub department_match: bool,
    pub rank: i32,
    pub match_reasons: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub is_viewed: bool,
    pub is_contacted: bool,
    pub is_selected: bool,
    pub notes: Option<String>,
}

impl From<JobOfferRecommendation> for RecommendationResponseDto {
    fn from(r: JobOfferRecommendation) -> Self {
        Self {
            id: r.id,
            job_offer_id: r.job_offer_id,
            stagiaire_id: r.stagiaire_id,
            stagiaire_name: r.stagiaire_name,
            stagiaire_email: r.stagiaire_email,
            skills: r.skills,
            department: r.department,
            university: r.university,
            composite_score: r.composite_score,
            skill_similarity: r.skill_similarity,
            text_similarity: r.text_similarity,
            department_match: r.department_match,
            rank: r.rank,
            match_reasons: r
                .match_reasons
                .split(';')
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect(),
            generated_at: r.generated_at,
            is_viewed: r.is_viewed,
            is_contacted: r.is_contacted,
            is_selected: r.is_selected,
            notes: r.notes,
        }
    }
}

/// Query params for recommendation generation
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct GenerateRecommendationsQuery {
    /// How many candidates to request from the engine
    pub top_n: Option<i32>,
    /// Regenerate even when cached recommendations exist
    #[serde(default)]
    pub regenerate: bool,
}

/// Outcome envelope of a generation run.
///
/// Engine failures surface as `success = false` with the error string so
/// the client can degrade gracefully instead of receiving a 5xx.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateRecommendationsResultDto {
    pub success: bool,
    pub recommendations: Vec<RecommendationResponseDto>,
    pub error: Option<String>,
}

/// Request DTO for updating the tracking status of a recommendation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRecommendationStatusDto {
    pub is_viewed: Option<bool>,
    pub is_contacted: Option<bool>,
    pub is_selected: Option<bool>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Job offer with its stored recommendations
#[derive(Debug, Serialize, ToSchema)]
pub struct JobOfferWithRecommendationsDto {
    #[serde(flatten)]
    pub offer: JobOfferResponseDto,
    pub recommendations: Vec<RecommendationResponseDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_match_reasons_split() {
        let rec = JobOfferRecommendation {
            id: Uuid::new_v4(),
            job_offer_id: Uuid::new_v4(),
            stagiaire_id: Uuid::new_v4(),
            stagiaire_email: "a@example.com".to_string(),
            stagiaire_name: "A B".to_string(),
            skills: String::new(),
            department: String::new(),
            university: String::new(),
            composite_score: Decimal::ZERO,
            skill_similarity: Decimal::ZERO,
            text_similarity: Decimal::ZERO,
            department_match: false,
            rank: 1,
            match_reasons: "Strong skill overlap;Same department".to_string(),
            generated_at: Utc::now(),
            is_viewed: false,
            is_contacted: false,
            is_selected: false,
            is_active: true,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let dto: RecommendationResponseDto = rec.into();
        assert_eq!(
            dto.match_reasons,
            vec!["Strong skill overlap", "Same department"]
        );
    }

}
