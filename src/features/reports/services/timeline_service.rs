use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::report_types::models::ReportType;
use crate::features::reports::dtos::{
    StageTimelineDto, TimelineDto, TimelineStepDto, TimelineStepStatus, UpdateStageTimelineDto,
};
use crate::features::reports::models::{Report, StageTimeline};
use crate::features::users::models::{User, UserRole};

const TIMELINE_COLUMNS: &str = "id, stagiaire_id, lancement_stage, demande_convention, \
     remise_plan_travail, depot_journal_bord, depot_bilan_v1, restitution, \
     visite_mi_parcours, depot_bilan_v2, depot_rapport_final, created_at, updated_at";

const REPORT_COLUMNS: &str = "id, stagiaire_id, report_type_id, title, description, file_key, \
     submission_date, due_date, is_submitted, is_approved, is_rejected, feedback_comments, \
     approver_id, previous_report_id, reviewed_at, created_at, updated_at";

/// Due date of a report type relative to the stage launch anchor
pub fn compute_due_date(lancement_stage: NaiveDate, days_from_start: i32) -> NaiveDate {
    lancement_stage + chrono::Duration::days(days_from_start as i64)
}

/// Status of a timeline step from the most recent report for its type.
///
/// No report: upcoming until the due date is reached, then current.
/// Otherwise the report's flags decide: approved and rejected are terminal,
/// anything still submitted is awaiting review.
pub fn derive_step_status(
    report: Option<&Report>,
    due_date: NaiveDate,
    today: NaiveDate,
) -> TimelineStepStatus {
    match report {
        Some(r) if r.is_approved => TimelineStepStatus::Approved,
        Some(r) if r.is_rejected => TimelineStepStatus::Rejected,
        Some(r) if r.is_submitted => TimelineStepStatus::PendingApproval,
        _ => {
            if due_date > today {
                TimelineStepStatus::Upcoming
            } else {
                TimelineStepStatus::Current
            }
        }
    }
}

/// Project the active report types and a stagiaire's reports onto timeline
/// steps: exactly one step per active type, in catalog order. The most
/// recent report (by submission date) for a type decides the step status.
pub fn build_timeline_steps(
    report_types: &[ReportType],
    reports: &[Report],
    lancement_stage: NaiveDate,
    today: NaiveDate,
) -> Vec<TimelineStepDto> {
    report_types
        .iter()
        .map(|rt| {
            let report = reports
                .iter()
                .filter(|r| r.report_type_id == rt.id)
                .max_by_key(|r| r.submission_date);
            let due_date = compute_due_date(lancement_stage, rt.days_from_start);

            TimelineStepDto {
                report_type_id: rt.id,
                name: rt.name.clone(),
                due_date,
                status: derive_step_status(report, due_date, today),
                icon_class: rt.icon_class.clone(),
                color: rt.color.clone(),
                report_id: report.map(|r| r.id),
                submission_date: report.map(|r| r.submission_date),
            }
        })
        .collect()
}

/// Service deriving per-stagiaire timelines and managing their anchor dates
pub struct TimelineService {
    pool: PgPool,
}

impl TimelineService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the stagiaire's timeline row, creating a default one anchored on
    /// the stage start date (or today) when none was recorded at onboarding.
    pub async fn get_or_create(&self, stagiaire_id: Uuid) -> Result<StageTimeline> {
        if let Some(timeline) = self.fetch(stagiaire_id).await? {
            return Ok(timeline);
        }

        let stagiaire = sqlx::query_as::<_, User>(
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

        if stagiaire.role != UserRole::Stagiaire {
            return Err(AppError::Validation(format!(
                "User '{}' is not a stagiaire",
                stagiaire_id
            )));
        }

        let launch = stagiaire
            .start_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let defaults = StageTimeline::defaults_from(stagiaire_id, launch);

        // Concurrent first reads may race on the insert; the unique index on
        // stagiaire_id makes the losing insert a no-op.
        sqlx::query(
            "INSERT INTO stage_timelines \
                 (stagiaire_id, lancement_stage, demande_convention, remise_plan_travail, \
                  depot_journal_bord, depot_bilan_v1, restitution, visite_mi_parcours, \
                  depot_bilan_v2, depot_rapport_final) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (stagiaire_id) DO NOTHING",
        )
        .bind(defaults.stagiaire_id)
        .bind(defaults.lancement_stage)
        .bind(defaults.demande_convention)
        .bind(defaults.remise_plan_travail)
        .bind(defaults.depot_journal_bord)
        .bind(defaults.depot_bilan_v1)
        .bind(defaults.restitution)
        .bind(defaults.visite_mi_parcours)
        .bind(defaults.depot_bilan_v2)
        .bind(defaults.depot_rapport_final)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            "Default timeline created for stagiaire {} (launch {})",
            stagiaire_id,
            launch
        );

        self.fetch(stagiaire_id).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "Timeline for stagiaire '{}' missing after insert",
                stagiaire_id
            ))
        })
    }

    /// Derive the stagiaire's timeline: one step per active report type,
    /// ordered by display order. Pure projection, no persisted side effect
    /// beyond the lazy default-timeline creation.
    pub async fn get_stagiaire_timeline(&self, stagiaire_id: Uuid) -> Result<TimelineDto> {
        let timeline = self.get_or_create(stagiaire_id).await?;

        let report_types = sqlx::query_as::<_, ReportType>(
            "SELECT id, name, description, display_order, days_from_start, icon_class, color, \
                 is_auto_generated, is_active, created_at, updated_at \
             FROM report_types \
             WHERE is_active = TRUE \
             ORDER BY display_order, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let reports = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE stagiaire_id = $1"
        ))
        .bind(stagiaire_id)
        .fetch_all(&self.pool)
        .await?;

        let steps = build_timeline_steps(
            &report_types,
            &reports,
            timeline.lancement_stage,
            Utc::now().date_naive(),
        );

        Ok(TimelineDto {
            stagiaire_id,
            steps,
        })
    }

    /// Persisted anchor dates for a stagiaire
    pub async fn get_anchors(&self, stagiaire_id: Uuid) -> Result<StageTimelineDto> {
        let timeline = self.get_or_create(stagiaire_id).await?;
        Ok(timeline.into())
    }

    /// Admin correction of anchor dates; absent fields are left unchanged
    pub async fn update_anchors(
        &self,
        stagiaire_id: Uuid,
        dto: UpdateStageTimelineDto,
    ) -> Result<StageTimelineDto> {
        let timeline = sqlx::query_as::<_, StageTimeline>(&format!(
            "UPDATE stage_timelines SET \
                 lancement_stage = COALESCE($2, lancement_stage), \
                 demande_convention = COALESCE($3, demande_convention), \
                 remise_plan_travail = COALESCE($4, remise_plan_travail), \
                 depot_journal_bord = COALESCE($5, depot_journal_bord), \
                 depot_bilan_v1 = COALESCE($6, depot_bilan_v1), \
                 restitution = COALESCE($7, restitution), \
                 visite_mi_parcours = COALESCE($8, visite_mi_parcours), \
                 depot_bilan_v2 = COALESCE($9, depot_bilan_v2), \
                 depot_rapport_final = COALESCE($10, depot_rapport_final), \
                 updated_at = NOW() \
             WHERE stagiaire_id = $1 \
             RETURNING {TIMELINE_COLUMNS}"
        ))
        .bind(stagiaire_id)
        .bind(dto.lancement_stage)
        .bind(dto.demande_convention)
        .bind(dto.remise_plan_travail)
        .bind(dto.depot_journal_bord)
        .bind(dto.depot_bilan_v1)
        .bind(dto.restitution)
        .bind(dto.visite_mi_parcours)
        .bind(dto.depot_bilan_v2)
        .bind(dto.depot_rapport_final)
        .fetch_optional(&self.pool)
        .await?;

        timeline.map(|t| t.into()).ok_or_else(|| {
            AppError::NotFound(format!(
                "No timeline recorded for stagiaire '{}'",
                stagiaire_id
            ))
        })
    }

    async fn fetch(&self, stagiaire_id: Uuid) -> Result<Option<StageTimeline>> {
        let timeline = sqlx::query_as::<_, StageTimeline>(&format!(
            "SELECT {TIMELINE_COLUMNS} FROM stage_timelines WHERE stagiaire_id = $1"
        ))
        .bind(stagiaire_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report_type(name: &str, display_order: i32, days_from_start: i32) -> ReportType {
        ReportType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            display_order,
            days_from_start,
            icon_class: None,
            color: None,
            is_auto_generated: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn report(
        type_id: Uuid,
        submitted_at: DateTime<Utc>,
        approved: bool,
        rejected: bool,
    ) -> Report {
        Report {
            id: Uuid::new_v4(),
            stagiaire_id: Uuid::new_v4(),
            report_type_id: type_id,
            title: "r".to_string(),
            description: None,
            file_key: "private/reports/r.pdf".to_string(),
            submission_date: submitted_at,
            due_date: None,
            is_submitted: true,
            is_approved: approved,
            is_rejected: rejected,
            feedback_comments: None,
            approver_id: None,
            previous_report_id: None,
            reviewed_at: None,
            created_at: submitted_at,
            updated_at: submitted_at,
        }
    }

    #[test]
    fn test_due_date_from_launch_anchor() {
        // Launch 2024-01-01 with a 14-day offset lands on 2024-01-15
        assert_eq!(
            compute_due_date(date(2024, 1, 1), 14),
            date(2024, 1, 15)
        );
        assert_eq!(compute_due_date(date(2024, 1, 1), 0), date(2024, 1, 1));
    }

    #[test]
    fn test_one_step_per_active_type_in_order() {
        let types = vec![
            report_type("Plan de travail", 1, 14),
            report_type("Journal de bord", 2, 30),
            report_type("Rapport final", 3, 120),
        ];

        let steps = build_timeline_steps(&types, &[], date(2024, 1, 1), date(2024, 1, 10));

        assert_eq!(steps.len(), types.len());
        let names: Vec<_> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Plan de travail", "Journal de bord", "Rapport final"]
        );
    }

    #[test]
    fn test_step_status_without_report() {
        let types = vec![report_type("Plan de travail", 1, 14)];
        let launch = date(2024, 1, 1);

        // Before the due date: upcoming
        let steps = build_timeline_steps(&types, &[], launch, date(2024, 1, 10));
        assert_eq!(steps[0].status, TimelineStepStatus::Upcoming);

        // On and after the due date: current
        let steps = build_timeline_steps(&types, &[], launch, date(2024, 1, 15));
        assert_eq!(steps[0].status, TimelineStepStatus::Current);
    }

    #[test]
    fn test_step_status_follows_report_flags() {
        let rt = report_type("Journal de bord", 1, 30);
        let now = Utc::now();

        let pending = report(rt.id, now, false, false);
        let steps =
            build_timeline_steps(std::slice::from_ref(&rt), &[pending], date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(steps[0].status, TimelineStepStatus::PendingApproval);

        let approved = report(rt.id, now, true, false);
        let steps =
            build_timeline_steps(std::slice::from_ref(&rt), &[approved], date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(steps[0].status, TimelineStepStatus::Approved);

        let rejected = report(rt.id, now, false, true);
        let steps =
            build_timeline_steps(std::slice::from_ref(&rt), &[rejected], date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(steps[0].status, TimelineStepStatus::Rejected);
    }

    #[test]
    fn test_most_recent_report_decides_status() {
        let rt = report_type("Bilan version 1", 1, 45);
        let earlier = Utc::now() - Duration::days(3);
        let later = Utc::now();

        // A rejection followed by a resubmission reads as pending approval
        let rejected = report(rt.id, earlier, false, true);
        let resubmitted = report(rt.id, later, false, false);

        let steps = build_timeline_steps(
            std::slice::from_ref(&rt),
            &[rejected, resubmitted],
            date(2024, 1, 1),
            date(2024, 3, 1),
        );
        assert_eq!(steps[0].status, TimelineStepStatus::PendingApproval);
        assert_eq!(steps[0].submission_date, Some(later));
    }
}
