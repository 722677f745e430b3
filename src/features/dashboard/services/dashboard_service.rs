use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::{
    DashboardOverviewDto, StaffOverviewDto, StagiaireOverviewDto, TuteurOverviewDto,
};
use crate::features::users::models::UserRole;

/// Read-only aggregate counters per role
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Overview tailored to the caller's role
    pub async fn overview(&self, user: &AuthenticatedUser) -> Result<DashboardOverviewDto> {
        match user.role {
            UserRole::Admin | UserRole::Rh => Ok(DashboardOverviewDto::Staff(
                self.staff_overview().await?,
            )),
            UserRole::Tuteur => Ok(DashboardOverviewDto::Tuteur(
                self.tuteur_overview(user.user_id).await?,
            )),
            UserRole::Stagiaire => Ok(DashboardOverviewDto::Stagiaire(
                self.stagiaire_overview(user.user_id).await?,
            )),
        }
    }

    async fn staff_overview(&self) -> Result<StaffOverviewDto> {
        let stagiaire_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE role = 'stagiaire' AND is_active = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;

        let tuteur_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE role = 'tuteur' AND is_active = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;

        let rh_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'rh' AND is_active = TRUE")
                .fetch_one(&self.pool)
                .await?;

        let active_job_offers: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM job_offers WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;

        let pending_reports: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reports \
             WHERE is_submitted = TRUE AND is_approved = FALSE AND is_rejected = FALSE",
        )
        .fetch_one(&self.pool)
        .await?;

        let pending_rating_approvals: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE status = 'submitted'")
                .fetch_one(&self.pool)
                .await?;

        Ok(StaffOverviewDto {
            stagiaire_count,
            tuteur_count,
            rh_count,
            active_job_offers,
            pending_reports,
            pending_rating_approvals,
        })
    }

    async fn tuteur_overview(&self, tuteur_id: Uuid) -> Result<TuteurOverviewDto> {
        let stagiaire_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE tuteur_id = $1 AND is_active = TRUE",
        )
        .bind(tuteur_id)
        .fetch_one(&self.pool)
        .await?;

        let reports_awaiting_review: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reports \
             WHERE approver_id = $1 \
               AND is_submitted = TRUE AND is_approved = FALSE AND is_rejected = FALSE",
        )
        .bind(tuteur_id)
        .fetch_one(&self.pool)
        .await?;

        let upcoming_meetings = self.upcoming_meetings(tuteur_id).await?;

        Ok(TuteurOverviewDto {
            stagiaire_count,
            reports_awaiting_review,
            upcoming_meetings,
        })
    }

    async fn stagiaire_overview(&self, stagiaire_id: Uuid) -> Result<StagiaireOverviewDto> {
        let total_steps: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM report_types WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await?;

        let approved_reports: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT report_type_id) FROM reports \
             WHERE stagiaire_id = $1 AND is_approved = TRUE",
        )
        .bind(stagiaire_id)
        .fetch_one(&self.pool)
        .await?;

        let pending_reports: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reports \
             WHERE stagiaire_id = $1 \
               AND is_submitted = TRUE AND is_approved = FALSE AND is_rejected = FALSE",
        )
        .bind(stagiaire_id)
        .fetch_one(&self.pool)
        .await?;

        let rejected_reports: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reports WHERE stagiaire_id = $1 AND is_rejected = TRUE",
        )
        .bind(stagiaire_id)
        .fetch_one(&self.pool)
        .await?;

        let unread_notifications: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND status = 'unread'",
        )
        .bind(stagiaire_id)
        .fetch_one(&self.pool)
        .await?;

        let upcoming_meetings = self.upcoming_meetings(stagiaire_id).await?;

        Ok(StagiaireOverviewDto {
            total_steps,
            approved_reports,
            pending_reports,
            rejected_reports,
            unread_notifications,
            upcoming_meetings,
        })
    }

    async fn upcoming_meetings(&self, user_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM meetings m \
             WHERE m.date >= CURRENT_DATE \
               AND m.status IN ('planifie', 'confirme') \
               AND (m.organizer_id = $1 \
                    OR EXISTS (SELECT 1 FROM meeting_participants mp \
                               WHERE mp.meeting_id = m.id AND mp.user_id = $1))",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
