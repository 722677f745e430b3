use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Publication status of a job offer, stored as the `job_offer_status`
/// Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "job_offer_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobOfferStatus {
    Active,
    Draft,
    Paused,
    Filled,
    Closed,
}

/// Database model for a job offer published by RH.
///
/// The recommendation flags (`recommendations_generated`,
/// `last_recommendation_generated_at`, `recommendation_count`) cache the
/// outcome of the last engine run so repeated reads never re-trigger the
/// external service.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct JobOffer {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub department_id: Uuid,
    pub published_by_user_id: Uuid,
    pub published_at: DateTime<Utc>,
    pub status: JobOfferStatus,
    pub recommendations_generated: bool,
    pub last_recommendation_generated_at: Option<DateTime<Utc>>,
    pub recommendation_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job offer joined with department and publisher names
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct JobOfferDetails {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub department_id: Uuid,
    pub published_by_user_id: Uuid,
    pub published_at: DateTime<Utc>,
    pub status: JobOfferStatus,
    pub recommendations_generated: bool,
    pub last_recommendation_generated_at: Option<DateTime<Utc>>,
    pub recommendation_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub department_name: String,
    pub published_by_name: String,
}
