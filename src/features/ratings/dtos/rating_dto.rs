use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::ratings::models::{EvaluationKind, RatingDetails, RatingStatus};
use crate::shared::validation::STAGE_REFERENCE_REGEX;

/// Response DTO for a rating
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingResponseDto {
    pub id: Uuid,
    pub evaluator_id: Uuid,
    pub evaluator_name: String,
    pub evaluated_user_id: Uuid,
    pub evaluated_user_name: String,
    pub score: f64,
    pub comment: String,
    pub kind: EvaluationKind,
    pub status: RatingStatus,
    pub detailed_scores: Option<serde_json::Value>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by_user_id: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub stage_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RatingDetails> for RatingResponseDto {
    fn from(r: RatingDetails) -> Self {
        Self {
            id: r.id,
            evaluator_id: r.evaluator_id,
            evaluator_name: r.evaluator_name,
            evaluated_user_id: r.evaluated_user_id,
            evaluated_user_name: r.evaluated_user_name,
            score: r.score,
            comment: r.comment,
            kind: r.kind,
            status: r.status,
            detailed_scores: r.detailed_scores,
            submitted_at: r.submitted_at,
            approved_at: r.approved_at,
            approved_by_user_id: r.approved_by_user_id,
            rejection_reason: r.rejection_reason,
            response: r.response,
            response_date: r.response_date,
            period_start: r.period_start,
            period_end: r.period_end,
            stage_reference: r.stage_reference,
            created_at: r.created_at,
        }
    }
}

/// Request DTO for creating a draft rating
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRatingDto {
    pub evaluated_user_id: Uuid,
    /// Overall score on a 1-5 scale
    #[validate(range(min = 1.0, max = 5.0))]
    pub score: f64,
    #[validate(length(min = 1, max = 1000))]
    pub comment: String,
    /// Per-criterion scores as free-form JSON
    pub detailed_scores: Option<serde_json::Value>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    /// Reference of the internship being evaluated (e.g. "STG-2024-0042")
    #[validate(regex(path = *STAGE_REFERENCE_REGEX))]
    pub stage_reference: Option<String>,
}

/// Request DTO for editing a draft rating; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRatingDto {
    #[validate(range(min = 1.0, max = 5.0))]
    pub score: Option<f64>,
    #[validate(length(min = 1, max = 1000))]
    pub comment: Option<String>,
    pub detailed_scores: Option<serde_json::Value>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

/// Request DTO for rejecting a submitted rating
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejectRatingDto {
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

/// Request DTO for the evaluated user's one-time response
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RatingResponseInputDto {
    #[validate(length(min = 1, max = 2000))]
    pub response: String,
}

/// Aggregate rating statistics for one user
#[derive(Debug, Serialize, ToSchema)]
pub struct RatingStatsDto {
    pub given_count: i64,
    pub received_count: i64,
    pub draft_count: i64,
    /// Average score of ratings given (submitted or later)
    pub average_given: Option<f64>,
    /// Average score of approved ratings received
    pub average_received: Option<f64>,
}
