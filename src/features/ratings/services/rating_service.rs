use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::models::NotificationKind;
use crate::features::notifications::NotificationService;
use crate::features::ratings::dtos::{
    CreateRatingDto, RatingResponseDto, RatingStatsDto, UpdateRatingDto,
};
use crate::features::ratings::models::{evaluation_kind_for, EvaluationKind, RatingDetails};
use crate::features::users::models::User;

const RATING_DETAIL_SELECT: &str = "SELECT r.id, r.evaluator_id, r.evaluated_user_id, r.score, \
     r.comment, r.kind, r.status, r.detailed_scores, r.submitted_at, r.approved_at, \
     r.approved_by_user_id, r.rejection_reason, r.response, r.response_date, r.period_start, \
     r.period_end, r.stage_reference, r.created_at, r.updated_at, \
     (e.first_name || ' ' || e.last_name) AS evaluator_name, \
     (v.first_name || ' ' || v.last_name) AS evaluated_user_name \
     FROM ratings r \
     JOIN users e ON e.id = r.evaluator_id \
     JOIN users v ON v.id = r.evaluated_user_id";

/// Service for the evaluation workflow: draft, submit, approve/reject,
/// response.
pub struct RatingService {
    pool: PgPool,
    notification_service: Arc<NotificationService>,
}

impl RatingService {
    pub fn new(pool: PgPool, notification_service: Arc<NotificationService>) -> Self {
        Self {
            pool,
            notification_service,
        }
    }

    /// Create a draft rating.
    ///
    /// The evaluator/evaluated pair must match the permission matrix
    /// (tuteur -> own stagiaire, RH -> stagiaire, stagiaire -> own tuteur)
    /// and no live rating may already exist for the same pair and kind.
    pub async fn create(
        &self,
        evaluator: &AuthenticatedUser,
        dto: CreateRatingDto,
    ) -> Result<RatingResponseDto> {
        let evaluated = self.fetch_user(dto.evaluated_user_id).await?;

        let kind = evaluation_kind_for(evaluator.role, evaluated.role).ok_or_else(|| {
            AppError::Forbidden("You are not allowed to evaluate this user".to_string())
        })?;

        self.ensure_relationship(evaluator, &evaluated, kind).await?;

        // One live rating per (evaluator, evaluated, kind); a rejected one
        // may be superseded by a fresh draft.
        let existing: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM ratings \
             WHERE evaluator_id = $1 AND evaluated_user_id = $2 AND kind = $3 \
               AND status <> 'rejected'",
        )
        .bind(evaluator.user_id)
        .bind(evaluated.id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "You already have an evaluation for this user".to_string(),
            ));
        }

        let rating_id: Uuid = sqlx::query_scalar(
            "INSERT INTO ratings \
                 (evaluator_id, evaluated_user_id, score, comment, kind, status, detailed_scores, \
                  period_start, period_end, stage_reference) \
             VALUES ($1, $2, $3, $4, $5, 'draft', $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(evaluator.user_id)
        .bind(evaluated.id)
        .bind(dto.score)
        .bind(&dto.comment)
        .bind(kind)
        .bind(&dto.detailed_scores)
        .bind(dto.period_start)
        .bind(dto.period_end)
        .bind(&dto.stage_reference)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Rating draft created: id={}, evaluator={}, evaluated={}",
            rating_id, evaluator.user_id, evaluated.id
        );

        self.fetch_details(rating_id).await.map(|r| r.into())
    }

    /// Edit a rating while it is still a draft
    pub async fn update(
        &self,
        rating_id: Uuid,
        user: &AuthenticatedUser,
        dto: UpdateRatingDto,
    ) -> Result<RatingResponseDto> {
        let rating = self.fetch_details(rating_id).await?;
        if rating.evaluator_id != user.user_id {
            return Err(AppError::Forbidden(
                "Only the evaluator can edit this rating".to_string(),
            ));
        }

        let updated = sqlx::query(
            "UPDATE ratings SET \
                 score = COALESCE($2, score), \
                 comment = COALESCE($3, comment), \
                 detailed_scores = COALESCE($4, detailed_scores), \
                 period_start = COALESCE($5, period_start), \
                 period_end = COALESCE($6, period_end), \
                 updated_at = NOW() \
             WHERE id = $1 AND status = 'draft'",
        )
        .bind(rating_id)
        .bind(dto.score)
        .bind(&dto.comment)
        .bind(&dto.detailed_scores)
        .bind(dto.period_start)
        .bind(dto.period_end)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Only draft ratings can be edited".to_string(),
            ));
        }

        self.fetch_details(rating_id).await.map(|r| r.into())
    }

    /// Submit a draft for approval; locks further edits
    pub async fn submit(
        &self,
        rating_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<RatingResponseDto> {
        let rating = self.fetch_details(rating_id).await?;
        if rating.evaluator_id != user.user_id {
            return Err(AppError::Forbidden(
                "Only the evaluator can submit this rating".to_string(),
            ));
        }

        let updated = sqlx::query(
            "UPDATE ratings SET status = 'submitted', submitted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'draft'",
        )
        .bind(rating_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "This rating has already been submitted".to_string(),
            ));
        }

        info!("Rating submitted: id={}", rating_id);

        self.fetch_details(rating_id).await.map(|r| r.into())
    }

    /// Approve a submitted rating (staff only).
    ///
    /// Guarded on the submitted state so concurrent approvals cannot both
    /// win; the loser surfaces as a conflict.
    pub async fn approve(
        &self,
        rating_id: Uuid,
        approver: &AuthenticatedUser,
    ) -> Result<RatingResponseDto> {
        let rating = self.fetch_details(rating_id).await?;

        let updated = sqlx::query(
            "UPDATE ratings SET \
                 status = 'approved', approved_at = NOW(), approved_by_user_id = $2, \
                 updated_at = NOW() \
             WHERE id = $1 AND status = 'submitted'",
        )
        .bind(rating_id)
        .bind(approver.user_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Only submitted ratings can be approved".to_string(),
            ));
        }

        info!("Rating approved: id={}, by={}", rating_id, approver.user_id);

        self.notification_service
            .notify(
                rating.evaluator_id,
                NotificationKind::RatingApproved,
                "Évaluation approuvée",
                &format!("Votre évaluation de {} a été approuvée", rating.evaluated_user_name),
                Some(rating_id),
            )
            .await;
        self.notification_service
            .notify(
                rating.evaluated_user_id,
                NotificationKind::RatingReceived,
                "Nouvelle évaluation",
                &format!("{} a publié une évaluation vous concernant", rating.evaluator_name),
                Some(rating_id),
            )
            .await;

        self.fetch_details(rating_id).await.map(|r| r.into())
    }

    /// Reject a submitted rating (staff only). Terminal state.
    pub async fn reject(
        &self,
        rating_id: Uuid,
        approver: &AuthenticatedUser,
        reason: &str,
    ) -> Result<RatingResponseDto> {
        let rating = self.fetch_details(rating_id).await?;

        let updated = sqlx::query(
            "UPDATE ratings SET \
                 status = 'rejected', rejection_reason = $3, approved_by_user_id = $2, \
                 updated_at = NOW() \
             WHERE id = $1 AND status = 'submitted'",
        )
        .bind(rating_id)
        .bind(approver.user_id)
        .bind(reason)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Only submitted ratings can be rejected".to_string(),
            ));
        }

        info!("Rating rejected: id={}, by={}", rating_id, approver.user_id);

        self.notification_service
            .notify(
                rating.evaluator_id,
                NotificationKind::RatingRejected,
                "Évaluation rejetée",
                &format!("Votre évaluation de {} a été rejetée: {}", rating.evaluated_user_name, reason),
                Some(rating_id),
            )
            .await;

        self.fetch_details(rating_id).await.map(|r| r.into())
    }

    /// One-time response by the evaluated user on an approved rating
    pub async fn add_response(
        &self,
        rating_id: Uuid,
        user: &AuthenticatedUser,
        response: &str,
    ) -> Result<RatingResponseDto> {
        let rating = self.fetch_details(rating_id).await?;
        if rating.evaluated_user_id != user.user_id {
            return Err(AppError::Forbidden(
                "Only the evaluated user can respond to this rating".to_string(),
            ));
        }

        let updated = sqlx::query(
            "UPDATE ratings SET response = $2, response_date = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'approved' AND response IS NULL",
        )
        .bind(rating_id)
        .bind(response)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "A response is only allowed once, on an approved rating".to_string(),
            ));
        }

        self.notification_service
            .notify(
                rating.evaluator_id,
                NotificationKind::RatingResponse,
                "Réponse à votre évaluation",
                &format!("{} a répondu à votre évaluation", rating.evaluated_user_name),
                Some(rating_id),
            )
            .await;

        self.fetch_details(rating_id).await.map(|r| r.into())
    }

    /// Delete a rating while not yet reviewed (evaluator only)
    pub async fn delete(&self, rating_id: Uuid, user: &AuthenticatedUser) -> Result<()> {
        let rating = self.fetch_details(rating_id).await?;
        if rating.evaluator_id != user.user_id {
            return Err(AppError::Forbidden(
                "Only the evaluator can delete this rating".to_string(),
            ));
        }

        let deleted = sqlx::query(
            "DELETE FROM ratings WHERE id = $1 AND status IN ('draft', 'submitted')",
        )
        .bind(rating_id)
        .execute(&self.pool)
        .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Reviewed ratings cannot be deleted".to_string(),
            ));
        }

        Ok(())
    }

    /// Get a rating, enforcing visibility: the evaluator and staff always
    /// see it, the evaluated user only once approved.
    pub async fn get_by_id(
        &self,
        rating_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<RatingResponseDto> {
        let rating = self.fetch_details(rating_id).await?;

        let is_evaluator = rating.evaluator_id == user.user_id;
        let is_evaluated_and_visible = rating.evaluated_user_id == user.user_id
            && rating.status == crate::features::ratings::models::RatingStatus::Approved;
        if !is_evaluator && !is_evaluated_and_visible && !user.has_staff_access() {
            return Err(AppError::Forbidden(
                "You are not allowed to view this rating".to_string(),
            ));
        }

        Ok(rating.into())
    }

    /// Ratings given by the caller, newest first
    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<RatingResponseDto>> {
        let ratings = sqlx::query_as::<_, RatingDetails>(&format!(
            "{RATING_DETAIL_SELECT} WHERE r.evaluator_id = $1 ORDER BY r.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings.into_iter().map(|r| r.into()).collect())
    }

    /// Approved ratings about the caller, newest first
    pub async fn list_about_me(&self, user_id: Uuid) -> Result<Vec<RatingResponseDto>> {
        let ratings = sqlx::query_as::<_, RatingDetails>(&format!(
            "{RATING_DETAIL_SELECT} \
             WHERE r.evaluated_user_id = $1 AND r.status = 'approved' \
             ORDER BY r.approved_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings.into_iter().map(|r| r.into()).collect())
    }

    /// Submitted ratings awaiting staff approval, oldest first
    pub async fn list_pending_approvals(&self) -> Result<Vec<RatingResponseDto>> {
        let ratings = sqlx::query_as::<_, RatingDetails>(&format!(
            "{RATING_DETAIL_SELECT} WHERE r.status = 'submitted' ORDER BY r.submitted_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings.into_iter().map(|r| r.into()).collect())
    }

    /// Aggregate statistics for one user
    pub async fn stats_for(&self, user_id: Uuid) -> Result<RatingStatsDto> {
        let given_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE evaluator_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        let draft_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ratings WHERE evaluator_id = $1 AND status = 'draft'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let received_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ratings WHERE evaluated_user_id = $1 AND status = 'approved'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let average_given: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(score) FROM ratings \
             WHERE evaluator_id = $1 AND status IN ('submitted', 'approved')",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let average_received: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(score) FROM ratings \
             WHERE evaluated_user_id = $1 AND status = 'approved'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(RatingStatsDto {
            given_count,
            received_count,
            draft_count,
            average_given,
            average_received,
        })
    }

    /// Relationship constraint on top of the role matrix
    async fn ensure_relationship(
        &self,
        evaluator: &AuthenticatedUser,
        evaluated: &User,
        kind: EvaluationKind,
    ) -> Result<()> {
        match kind {
            EvaluationKind::TuteurToStagiaire => {
                if evaluated.tuteur_id != Some(evaluator.user_id) {
                    return Err(AppError::Forbidden(
                        "You can only evaluate your own stagiaires".to_string(),
                    ));
                }
            }
            EvaluationKind::StagiaireToTuteur => {
                let evaluator_row = self.fetch_user(evaluator.user_id).await?;
                if evaluator_row.tuteur_id != Some(evaluated.id) {
                    return Err(AppError::Forbidden(
                        "You can only evaluate your own tuteur".to_string(),
                    ));
                }
            }
            // RH evaluates any stagiaire
            EvaluationKind::RhToStagiaire => {}
        }

        Ok(())
    }

    async fn fetch_details(&self, rating_id: Uuid) -> Result<RatingDetails> {
        sqlx::query_as::<_, RatingDetails>(&format!(
            "{RATING_DETAIL_SELECT} WHERE r.id = $1"
        ))
        .bind(rating_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Rating '{}' not found", rating_id)))
    }

    async fn fetch_user(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, first_name, last_name, phone_number, role, \
                 profile_picture_url, tuteur_id, years_experience, department_id, university_id, \
                 start_date, end_date, stage_kind, student_level, skills, cv_file_key, \
                 cv_original_filename, cv_uploaded_at, is_active, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", id)))
    }
}
