use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::job_offers::clients::{EngineRequest, RecommendationEngine};
use crate::features::job_offers::dtos::{
    JobOfferWithRecommendationsDto, RecommendationResponseDto, UpdateRecommendationStatusDto,
};
use crate::features::job_offers::models::{JobOffer, JobOfferRecommendation};

const RECOMMENDATION_COLUMNS: &str = "id, job_offer_id, stagiaire_id, stagiaire_email, \
     stagiaire_name, skills, department, university, composite_score, skill_similarity, \
     text_similarity, department_match, rank, match_reasons, generated_at, is_viewed, \
     is_contacted, is_selected, is_active, notes, created_at, updated_at";

const JOB_OFFER_COLUMNS: &str = "id, title, description, required_skills, department_id, \
     published_by_user_id, published_at, status, recommendations_generated, \
     last_recommendation_generated_at, recommendation_count, created_at, updated_at";

/// Orchestrates the external matching engine: forwards offer data, persists
/// the ranked results and keeps the offer's cache flags in sync.
pub struct RecommendationService {
    pool: PgPool,
    engine: Arc<dyn RecommendationEngine>,
    default_top_n: i32,
}

impl RecommendationService {
    pub fn new(pool: PgPool, engine: Arc<dyn RecommendationEngine>, default_top_n: i32) -> Self {
        Self {
            pool,
            engine,
            default_top_n,
        }
    }

    /// Generate recommendations for a job offer.
    ///
    /// Stored results are returned as-is unless `regenerate` is set. The
    /// engine's failure modes (unreachable, unhealthy, scoring error) all
    /// surface as [`AppError::ExternalServiceError`]; no retry is attempted.
    pub async fn generate(
        &self,
        job_offer_id: Uuid,
        top_n: Option<i32>,
        regenerate: bool,
    ) -> Result<Vec<RecommendationResponseDto>> {
        let offer = self.fetch_offer(job_offer_id).await?;

        if !regenerate {
            let existing = self.fetch_recommendations(job_offer_id).await?;
            if !existing.is_empty() {
                tracing::debug!(
                    "Returning {} cached recommendations for offer {}",
                    existing.len(),
                    job_offer_id
                );
                return Ok(existing.into_iter().map(|r| r.into()).collect());
            }
        }

        if !self.engine.is_healthy().await {
            return Err(AppError::ExternalServiceError(
                "Recommendation engine is unavailable".to_string(),
            ));
        }

        let request = EngineRequest {
            job_offer_id,
            title: offer.title.clone(),
            description: offer.description.clone(),
            required_skills: offer.required_skills.clone(),
            department_id: Some(offer.department_id),
            top_n: top_n.unwrap_or(self.default_top_n),
        };

        let response = self.engine.recommend(&request).await?;
        if !response.success {
            return Err(AppError::ExternalServiceError(format!(
                "Recommendation engine failed: {}",
                response.error.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        let candidate_count = response.recommendations.len() as i32;

        let mut tx = self.pool.begin().await?;

        if regenerate {
            sqlx::query("DELETE FROM job_offer_recommendations WHERE job_offer_id = $1")
                .bind(job_offer_id)
                .execute(&mut *tx)
                .await?;
        }

        for (index, candidate) in response.recommendations.iter().enumerate() {
            sqlx::query(
                "INSERT INTO job_offer_recommendations \
                     (job_offer_id, stagiaire_id, stagiaire_email, stagiaire_name, skills, \
                      department, university, composite_score, skill_similarity, \
                      text_similarity, department_match, rank, match_reasons, generated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW())",
            )
            .bind(job_offer_id)
            .bind(candidate.stagiaire_id)
            .bind(&candidate.email)
            .bind(&candidate.name)
            .bind(&candidate.skills)
            .bind(&candidate.department)
            .bind(&candidate.university)
            .bind(score_to_decimal(candidate.composite_score))
            .bind(score_to_decimal(candidate.skill_similarity))
            .bind(score_to_decimal(candidate.text_similarity))
            .bind(candidate.department_match)
            .bind(index as i32 + 1)
            .bind(candidate.match_reasons.join(";"))
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE job_offers SET \
                 recommendations_generated = TRUE, \
                 last_recommendation_generated_at = NOW(), \
                 recommendation_count = $2, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_offer_id)
        .bind(candidate_count)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "{} recommendations stored for offer {}",
            candidate_count, job_offer_id
        );

        let stored = self.fetch_recommendations(job_offer_id).await?;
        Ok(stored.into_iter().map(|r| r.into()).collect())
    }

    /// Stored recommendations for an offer, best rank first
    pub async fn list_for_offer(
        &self,
        job_offer_id: Uuid,
    ) -> Result<Vec<RecommendationResponseDto>> {
        // Ensure the offer exists so an unknown id is a 404, not an empty list
        self.fetch_offer(job_offer_id).await?;

        let recommendations = self.fetch_recommendations(job_offer_id).await?;
        Ok(recommendations.into_iter().map(|r| r.into()).collect())
    }

    /// An offer with its stored recommendations, for the staff detail view
    pub async fn offer_with_recommendations(
        &self,
        job_offer_id: Uuid,
        offer: crate::features::job_offers::dtos::JobOfferResponseDto,
    ) -> Result<JobOfferWithRecommendationsDto> {
        let recommendations = self.fetch_recommendations(job_offer_id).await?;
        Ok(JobOfferWithRecommendationsDto {
            offer,
            recommendations: recommendations.into_iter().map(|r| r.into()).collect(),
        })
    }

    /// Update the tracking status of one recommendation
    pub async fn update_status(
        &self,
        recommendation_id: Uuid,
        dto: UpdateRecommendationStatusDto,
    ) -> Result<RecommendationResponseDto> {
        let recommendation = sqlx::query_as::<_, JobOfferRecommendation>(&format!(
            "UPDATE job_offer_recommendations SET \
                 is_viewed = COALESCE($2, is_viewed), \
                 is_contacted = COALESCE($3, is_contacted), \
                 is_selected = COALESCE($4, is_selected), \
                 notes = COALESCE($5, notes), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {RECOMMENDATION_COLUMNS}"
        ))
        .bind(recommendation_id)
        .bind(dto.is_viewed)
        .bind(dto.is_contacted)
        .bind(dto.is_selected)
        .bind(&dto.notes)
        .fetch_optional(&self.pool)
        .await?;

        recommendation.map(|r| r.into()).ok_or_else(|| {
            AppError::NotFound(format!(
                "Recommendation '{}' not found",
                recommendation_id
            ))
        })
    }

    /// Drop all stored recommendations for an offer and reset its cache flags
    pub async fn delete_for_offer(&self, job_offer_id: Uuid) -> Result<()> {
        self.fetch_offer(job_offer_id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM job_offer_recommendations WHERE job_offer_id = $1")
            .bind(job_offer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE job_offers SET \
                 recommendations_generated = FALSE, \
                 last_recommendation_generated_at = NULL, \
                 recommendation_count = 0, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_offer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Recommendations cleared for offer {}", job_offer_id);
        Ok(())
    }

    async fn fetch_offer(&self, job_offer_id: Uuid) -> Result<JobOffer> {
        sqlx::query_as::<_, JobOffer>(&format!(
            "SELECT {JOB_OFFER_COLUMNS} FROM job_offers WHERE id = $1"
        ))
        .bind(job_offer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job offer '{}' not found", job_offer_id)))
    }

    async fn fetch_recommendations(
        &self,
        job_offer_id: Uuid,
    ) -> Result<Vec<JobOfferRecommendation>> {
        let recommendations = sqlx::query_as::<_, JobOfferRecommendation>(&format!(
            "SELECT {RECOMMENDATION_COLUMNS} FROM job_offer_recommendations \
             WHERE job_offer_id = $1 AND is_active = TRUE \
             ORDER BY rank"
        ))
        .bind(job_offer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(recommendations)
    }
}

/// Engine scores are floats in [0, 1]; stored as DECIMAL(5,4)
fn score_to_decimal(score: f64) -> Decimal {
    Decimal::try_from(score.clamp(0.0, 1.0)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_to_decimal_clamps() {
        assert_eq!(score_to_decimal(1.5), Decimal::ONE);
        assert_eq!(score_to_decimal(-0.3), Decimal::ZERO);
        assert_eq!(score_to_decimal(0.5), Decimal::try_from(0.5).unwrap());
    }
}
