use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::models::NotificationKind;
use crate::features::notifications::NotificationService;
use crate::features::report_types::models::ReportType;
use crate::features::reports::dtos::{
    ReportDownloadDto, ReportResponseDto, ResubmitReportDto, UploadReportDto,
};
use crate::features::reports::models::ReportDetails;
use crate::features::reports::services::timeline_service::compute_due_date;
use crate::features::reports::services::TimelineService;
use crate::features::users::models::{User, UserRole};
use crate::modules::storage::ObjectStore;
use crate::shared::constants::is_document_mime_type_allowed;
use crate::shared::types::PaginationQuery;

/// Joined select used for every report read
const REPORT_DETAIL_SELECT: &str = "SELECT r.id, r.stagiaire_id, r.report_type_id, r.title, \
     r.description, r.file_key, r.submission_date, r.due_date, r.is_submitted, r.is_approved, \
     r.is_rejected, r.feedback_comments, r.approver_id, r.previous_report_id, r.reviewed_at, \
     r.created_at, r.updated_at, \
     rt.name AS report_type_name, \
     (s.first_name || ' ' || s.last_name) AS stagiaire_name, \
     (a.first_name || ' ' || a.last_name) AS approver_name \
     FROM reports r \
     JOIN report_types rt ON rt.id = r.report_type_id \
     JOIN users s ON s.id = r.stagiaire_id \
     LEFT JOIN users a ON a.id = r.approver_id";

/// Service for the stage document workflow: submission, review, resubmission.
pub struct ReportService {
    pool: PgPool,
    object_store: Arc<ObjectStore>,
    timeline_service: Arc<TimelineService>,
    notification_service: Arc<NotificationService>,
}

impl ReportService {
    pub fn new(
        pool: PgPool,
        object_store: Arc<ObjectStore>,
        timeline_service: Arc<TimelineService>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            pool,
            object_store,
            timeline_service,
            notification_service,
        }
    }

    /// Submit a new report document.
    ///
    /// The report type must be active and the (stagiaire, type) pair must not
    /// already have a report awaiting review. The approver defaults to the
    /// stagiaire's tuteur; the due date is derived from the timeline launch
    /// anchor plus the type's day offset.
    pub async fn upload_report(
        &self,
        stagiaire_id: Uuid,
        dto: UploadReportDto,
        file_data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> Result<ReportResponseDto> {
        if !is_document_mime_type_allowed(content_type) {
            return Err(AppError::Validation(format!(
                "Unsupported report format: {}",
                content_type
            )));
        }

        let stagiaire = self.fetch_stagiaire(stagiaire_id).await?;
        let report_type = self.fetch_active_report_type(dto.report_type_id).await?;

        self.ensure_no_pending_report(stagiaire_id, report_type.id)
            .await?;

        let timeline = self.timeline_service.get_or_create(stagiaire_id).await?;
        let due_date = compute_due_date(timeline.lancement_stage, report_type.days_from_start);

        let extension = original_filename.rsplit('.').next().unwrap_or("pdf");
        let file_key = self.object_store.report_key(stagiaire_id, extension);
        self.object_store
            .upload(&file_key, file_data, content_type)
            .await?;

        let report_id: Uuid = sqlx::query_scalar(
            "INSERT INTO reports \
                 (stagiaire_id, report_type_id, title, description, file_key, submission_date, \
                  due_date, is_submitted, approver_id) \
             VALUES ($1, $2, $3, $4, $5, NOW(), $6, TRUE, $7) \
             RETURNING id",
        )
        .bind(stagiaire_id)
        .bind(report_type.id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&file_key)
        .bind(due_date)
        .bind(stagiaire.tuteur_id)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Report submitted: id={}, stagiaire={}, type={}",
            report_id, stagiaire_id, report_type.name
        );

        if let Some(tuteur_id) = stagiaire.tuteur_id {
            self.notification_service
                .notify(
                    tuteur_id,
                    NotificationKind::ReportSubmitted,
                    "Nouveau rapport soumis",
                    &format!(
                        "{} a soumis le document \"{}\" ({})",
                        stagiaire.full_name(),
                        dto.title,
                        report_type.name
                    ),
                    Some(report_id),
                )
                .await;
        }

        Ok(self.fetch_details(report_id).await?.into())
    }

    /// Resubmit after a rejection.
    ///
    /// The referenced report must be rejected and belong to the caller; it is
    /// left untouched and a fresh row is linked to it via
    /// `previous_report_id`.
    pub async fn resubmit_report(
        &self,
        stagiaire_id: Uuid,
        rejected_report_id: Uuid,
        dto: ResubmitReportDto,
        file_data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> Result<ReportResponseDto> {
        if !is_document_mime_type_allowed(content_type) {
            return Err(AppError::Validation(format!(
                "Unsupported report format: {}",
                content_type
            )));
        }

        let rejected = self.fetch_details(rejected_report_id).await?;
        if rejected.stagiaire_id != stagiaire_id {
            return Err(AppError::Forbidden(
                "You can only resubmit your own reports".to_string(),
            ));
        }
        if !rejected.is_rejected {
            return Err(AppError::Conflict(
                "Only a rejected report can be resubmitted".to_string(),
            ));
        }

        let stagiaire = self.fetch_stagiaire(stagiaire_id).await?;
        let report_type = self
            .fetch_active_report_type(rejected.report_type_id)
            .await?;

        self.ensure_no_pending_report(stagiaire_id, report_type.id)
            .await?;

        let timeline = self.timeline_service.get_or_create(stagiaire_id).await?;
        let due_date = compute_due_date(timeline.lancement_stage, report_type.days_from_start);

        let extension = original_filename.rsplit('.').next().unwrap_or("pdf");
        let file_key = self.object_store.report_key(stagiaire_id, extension);
        self.object_store
            .upload(&file_key, file_data, content_type)
            .await?;

        let report_id: Uuid = sqlx::query_scalar(
            "INSERT INTO reports \
                 (stagiaire_id, report_type_id, title, description, file_key, submission_date, \
                  due_date, is_submitted, approver_id, previous_report_id) \
             VALUES ($1, $2, $3, $4, $5, NOW(), $6, TRUE, $7, $8) \
             RETURNING id",
        )
        .bind(stagiaire_id)
        .bind(report_type.id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&file_key)
        .bind(due_date)
        .bind(stagiaire.tuteur_id)
        .bind(rejected_report_id)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Report resubmitted: id={}, replaces={}, stagiaire={}",
            report_id, rejected_report_id, stagiaire_id
        );

        if let Some(tuteur_id) = stagiaire.tuteur_id {
            self.notification_service
                .notify(
                    tuteur_id,
                    NotificationKind::ReportSubmitted,
                    "Rapport re-soumis",
                    &format!(
                        "{} a re-soumis le document \"{}\" ({})",
                        stagiaire.full_name(),
                        dto.title,
                        report_type.name
                    ),
                    Some(report_id),
                )
                .await;
        }

        Ok(self.fetch_details(report_id).await?.into())
    }

    /// Approve a pending report.
    pub async fn approve_report(
        &self,
        report_id: Uuid,
        reviewer: &AuthenticatedUser,
        feedback: &str,
    ) -> Result<ReportResponseDto> {
        self.finalize_report(report_id, reviewer, feedback, true).await
    }

    /// Reject a pending report; the stagiaire is expected to resubmit.
    pub async fn reject_report(
        &self,
        report_id: Uuid,
        reviewer: &AuthenticatedUser,
        feedback: &str,
    ) -> Result<ReportResponseDto> {
        self.finalize_report(report_id, reviewer, feedback, false)
            .await
    }

    /// Shared terminal transition for approve/reject.
    ///
    /// The update is guarded on the pending state, so two concurrent
    /// reviewers cannot both finalize the same row: the loser's update
    /// matches nothing and surfaces as a conflict.
    async fn finalize_report(
        &self,
        report_id: Uuid,
        reviewer: &AuthenticatedUser,
        feedback: &str,
        approve: bool,
    ) -> Result<ReportResponseDto> {
        let report = self.fetch_details(report_id).await?;

        // Tuteurs may only review reports routed to them; staff review any.
        if reviewer.role == UserRole::Tuteur
            && report.approver_id.is_some()
            && report.approver_id != Some(reviewer.user_id)
        {
            return Err(AppError::Forbidden(
                "This report is assigned to another reviewer".to_string(),
            ));
        }

        let updated = sqlx::query(
            "UPDATE reports SET \
                 is_approved = $2, \
                 is_rejected = $3, \
                 feedback_comments = $4, \
                 approver_id = $5, \
                 reviewed_at = NOW(), \
                 updated_at = NOW() \
             WHERE id = $1 \
               AND is_submitted = TRUE AND is_approved = FALSE AND is_rejected = FALSE",
        )
        .bind(report_id)
        .bind(approve)
        .bind(!approve)
        .bind(feedback)
        .bind(reviewer.user_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Report has already been reviewed".to_string(),
            ));
        }

        let action = if approve { "approved" } else { "rejected" };
        info!(
            "Report {}: id={}, reviewer={}",
            action, report_id, reviewer.user_id
        );

        let (kind, title) = if approve {
            (NotificationKind::ReportApproved, "Rapport approuvé")
        } else {
            (NotificationKind::ReportRejected, "Rapport rejeté")
        };
        self.notification_service
            .notify(
                report.stagiaire_id,
                kind,
                title,
                &format!("\"{}\": {}", report.title, feedback),
                Some(report_id),
            )
            .await;

        Ok(self.fetch_details(report_id).await?.into())
    }

    /// Get a report, enforcing read access (owner, assigned reviewer, staff)
    pub async fn get_by_id(
        &self,
        report_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<ReportResponseDto> {
        let report = self.fetch_details(report_id).await?;
        self.ensure_read_access(&report, user)?;
        Ok(report.into())
    }

    /// Reports of the calling stagiaire, newest first
    pub async fn list_mine(&self, stagiaire_id: Uuid) -> Result<Vec<ReportResponseDto>> {
        let reports = sqlx::query_as::<_, ReportDetails>(&format!(
            "{REPORT_DETAIL_SELECT} WHERE r.stagiaire_id = $1 ORDER BY r.submission_date DESC"
        ))
        .bind(stagiaire_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports.into_iter().map(|r| r.into()).collect())
    }

    /// Reports of a given stagiaire (reviewer view)
    pub async fn list_by_stagiaire(&self, stagiaire_id: Uuid) -> Result<Vec<ReportResponseDto>> {
        self.list_mine(stagiaire_id).await
    }

    /// Pending reports routed to the given reviewer
    pub async fn list_pending_for(&self, approver_id: Uuid) -> Result<Vec<ReportResponseDto>> {
        let reports = sqlx::query_as::<_, ReportDetails>(&format!(
            "{REPORT_DETAIL_SELECT} \
             WHERE r.approver_id = $1 \
               AND r.is_submitted = TRUE AND r.is_approved = FALSE AND r.is_rejected = FALSE \
             ORDER BY r.submission_date"
        ))
        .bind(approver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports.into_iter().map(|r| r.into()).collect())
    }

    /// All reports, paginated (staff view)
    pub async fn list_all(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ReportResponseDto>, i64)> {
        let reports = sqlx::query_as::<_, ReportDetails>(&format!(
            "{REPORT_DETAIL_SELECT} ORDER BY r.submission_date DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await?;

        Ok((reports.into_iter().map(|r| r.into()).collect(), total))
    }

    /// Presigned download URL for a report document
    pub async fn download_url(
        &self,
        report_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<ReportDownloadDto> {
        let report = self.fetch_details(report_id).await?;
        self.ensure_read_access(&report, user)?;

        let download_url = self.object_store.get_presigned_url(&report.file_key).await?;

        Ok(ReportDownloadDto {
            download_url,
            title: report.title,
        })
    }

    /// Delete a report and its stored document (admin operation)
    pub async fn delete(&self, report_id: Uuid) -> Result<()> {
        let report = self.fetch_details(report_id).await?;

        if let Err(e) = self.object_store.delete(&report.file_key).await {
            tracing::warn!(
                "Failed to delete report object '{}': {}",
                report.file_key,
                e
            );
        }

        sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(report_id)
            .execute(&self.pool)
            .await?;

        info!("Report deleted: {}", report_id);
        Ok(())
    }

    fn ensure_read_access(
        &self,
        report: &ReportDetails,
        user: &AuthenticatedUser,
    ) -> Result<()> {
        let is_owner = report.stagiaire_id == user.user_id;
        let is_approver = report.approver_id == Some(user.user_id);
        if !is_owner && !is_approver && !user.has_staff_access() {
            return Err(AppError::Forbidden(
                "You do not have access to this report".to_string(),
            ));
        }
        Ok(())
    }

    async fn fetch_details(&self, report_id: Uuid) -> Result<ReportDetails> {
        sqlx::query_as::<_, ReportDetails>(&format!(
            "{REPORT_DETAIL_SELECT} WHERE r.id = $1"
        ))
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report '{}' not found", report_id)))
    }

    async fn fetch_stagiaire(&self, stagiaire_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, first_name, last_name, phone_number, role, \
                 profile_picture_url, tuteur_id, years_experience, department_id, university_id, \
                 start_date, end_date, stage_kind, student_level, skills, cv_file_key, \
                 cv_original_filename, cv_uploaded_at, is_active, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(stagiaire_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Stagiaire '{}' not found", stagiaire_id)))?;

        if user.role != UserRole::Stagiaire {
            return Err(AppError::Validation(format!(
                "User '{}' is not a stagiaire",
                stagiaire_id
            )));
        }

        Ok(user)
    }

    async fn fetch_active_report_type(&self, report_type_id: Uuid) -> Result<ReportType> {
        let report_type = sqlx::query_as::<_, ReportType>(
            "SELECT id, name, description, display_order, days_from_start, icon_class, color, \
                 is_auto_generated, is_active, created_at, updated_at \
             FROM report_types WHERE id = $1",
        )
        .bind(report_type_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Report type '{}' not found", report_type_id))
        })?;

        if !report_type.is_active {
            return Err(AppError::Validation(format!(
                "Report type '{}' is inactive",
                report_type.name
            )));
        }

        Ok(report_type)
    }

    /// Upload invariant: at most one pending report per (stagiaire, type)
    async fn ensure_no_pending_report(
        &self,
        stagiaire_id: Uuid,
        report_type_id: Uuid,
    ) -> Result<()> {
        let pending: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM reports \
             WHERE stagiaire_id = $1 AND report_type_id = $2 \
               AND is_submitted = TRUE AND is_approved = FALSE AND is_rejected = FALSE",
        )
        .bind(stagiaire_id)
        .bind(report_type_id)
        .fetch_optional(&self.pool)
        .await?;

        if pending.is_some() {
            return Err(AppError::Validation(
                "A report of this type is already awaiting review".to_string(),
            ));
        }

        Ok(())
    }
}
