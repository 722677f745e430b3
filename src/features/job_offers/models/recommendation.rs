use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for one ranked candidate recommendation.
///
/// Candidate fields are denormalized at generation time so the row stays a
/// faithful record of what the engine scored, even if the profile changes
/// later. Scores are DECIMAL(5,4) in [0, 1].
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct JobOfferRecommendation {
    pub id: Uuid,
    pub job_offer_id: Uuid,
    pub stagiaire_id: Uuid,
    pub stagiaire_email: String,
    pub stagiaire_name: String,
    pub skills: String,
    pub department: String,
    pub university: String,
    pub composite_score: Decimal,
    pub skill_similarity: Decimal,
    pub text_similarity: Decimal,
    pub department_match: bool,
    pub rank: i32,
    pub match_reasons: String,
    pub generated_at: DateTime<Utc>,
    pub is_viewed: bool,
    pub is_contacted: bool,
    pub is_selected: bool,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
