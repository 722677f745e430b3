use serde::Serialize;
use utoipa::ToSchema;

/// Platform-wide counters for the admin/RH dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffOverviewDto {
    pub stagiaire_count: i64,
    pub tuteur_count: i64,
    pub rh_count: i64,
    pub active_job_offers: i64,
    pub pending_reports: i64,
    pub pending_rating_approvals: i64,
}

/// Counters for a tuteur's dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct TuteurOverviewDto {
    pub stagiaire_count: i64,
    pub reports_awaiting_review: i64,
    pub upcoming_meetings: i64,
}

/// Progress summary for a stagiaire's dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct StagiaireOverviewDto {
    /// Number of active report types (total timeline steps)
    pub total_steps: i64,
    pub approved_reports: i64,
    pub pending_reports: i64,
    pub rejected_reports: i64,
    pub unread_notifications: i64,
    pub upcoming_meetings: i64,
}

/// Role-dependent dashboard payload
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardOverviewDto {
    Staff(StaffOverviewDto),
    Tuteur(TuteurOverviewDto),
    Stagiaire(StagiaireOverviewDto),
}
