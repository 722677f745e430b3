use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::job_offers::dtos::{
    CreateJobOfferDto, JobOfferResponseDto, UpdateJobOfferDto,
};
use crate::features::job_offers::models::{JobOfferDetails, JobOfferStatus};
use crate::shared::types::PaginationQuery;

const JOB_OFFER_DETAIL_SELECT: &str = "SELECT o.id, o.title, o.description, o.required_skills, \
     o.department_id, o.published_by_user_id, o.published_at, o.status, \
     o.recommendations_generated, o.last_recommendation_generated_at, o.recommendation_count, \
     o.created_at, o.updated_at, \
     d.name AS department_name, \
     (p.first_name || ' ' || p.last_name) AS published_by_name \
     FROM job_offers o \
     JOIN departments d ON d.id = o.department_id \
     JOIN users p ON p.id = o.published_by_user_id";

/// Service for job offer management
pub struct JobOfferService {
    pool: PgPool,
}

impl JobOfferService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Publish a job offer
    pub async fn create(
        &self,
        publisher_id: Uuid,
        dto: CreateJobOfferDto,
    ) -> Result<JobOfferResponseDto> {
        let department: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM departments WHERE id = $1")
                .bind(dto.department_id)
                .fetch_optional(&self.pool)
                .await?;
        if department.is_none() {
            return Err(AppError::Validation(format!(
                "Department '{}' does not exist",
                dto.department_id
            )));
        }

        let offer_id: Uuid = sqlx::query_scalar(
            "INSERT INTO job_offers \
                 (title, description, required_skills, department_id, published_by_user_id, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.required_skills)
        .bind(dto.department_id)
        .bind(publisher_id)
        .bind(dto.status.unwrap_or(JobOfferStatus::Active))
        .fetch_one(&self.pool)
        .await?;

        info!("Job offer published: id={}, by={}", offer_id, publisher_id);

        self.get_by_id(offer_id).await
    }

    /// List job offers, newest first
    pub async fn list(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<JobOfferResponseDto>, i64)> {
        let offers = sqlx::query_as::<_, JobOfferDetails>(&format!(
            "{JOB_OFFER_DETAIL_SELECT} ORDER BY o.published_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_offers")
            .fetch_one(&self.pool)
            .await?;

        Ok((offers.into_iter().map(|o| o.into()).collect(), total))
    }

    /// Get a job offer by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<JobOfferResponseDto> {
        let offer = sqlx::query_as::<_, JobOfferDetails>(&format!(
            "{JOB_OFFER_DETAIL_SELECT} WHERE o.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        offer
            .map(|o| o.into())
            .ok_or_else(|| AppError::NotFound(format!("Job offer '{}' not found", id)))
    }

    /// Update a job offer; absent fields are left unchanged
    pub async fn update(&self, id: Uuid, dto: UpdateJobOfferDto) -> Result<JobOfferResponseDto> {
        if let Some(department_id) = dto.department_id {
            let department: Option<Uuid> =
                sqlx::query_scalar("SELECT id FROM departments WHERE id = $1")
                    .bind(department_id)
                    .fetch_optional(&self.pool)
                    .await?;
            if department.is_none() {
                return Err(AppError::Validation(format!(
                    "Department '{}' does not exist",
                    department_id
                )));
            }
        }

        let updated = sqlx::query(
            "UPDATE job_offers SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 required_skills = COALESCE($4, required_skills), \
                 department_id = COALESCE($5, department_id), \
                 status = COALESCE($6, status), \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.required_skills)
        .bind(dto.department_id)
        .bind(dto.status)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Job offer '{}' not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a job offer; its recommendations go with it (cascade)
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM job_offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Job offer '{}' not found", id)));
        }

        info!("Job offer deleted: {}", id);
        Ok(())
    }
}
