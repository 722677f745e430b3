use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::StageTimeline;

/// Status of one timeline step, derived from the most recent report
/// submitted for the step's report type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStepStatus {
    /// No report yet, due date in the future
    Upcoming,
    /// No report yet, due date reached
    Current,
    /// A report is submitted and awaiting review
    PendingApproval,
    /// The most recent report was approved
    Approved,
    /// The most recent report was rejected; a resubmission is expected
    Rejected,
}

/// One derived step of a stagiaire's timeline
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineStepDto {
    pub report_type_id: Uuid,
    pub name: String,
    pub due_date: NaiveDate,
    pub status: TimelineStepStatus,
    pub icon_class: Option<String>,
    pub color: Option<String>,
    /// Most recent report for this step, if any
    pub report_id: Option<Uuid>,
    pub submission_date: Option<DateTime<Utc>>,
}

/// Derived timeline: one step per active report type
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineDto {
    pub stagiaire_id: Uuid,
    pub steps: Vec<TimelineStepDto>,
}

/// Response DTO exposing the persisted anchor dates
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StageTimelineDto {
    pub id: Uuid,
    pub stagiaire_id: Uuid,
    pub lancement_stage: NaiveDate,
    pub demande_convention: NaiveDate,
    pub remise_plan_travail: NaiveDate,
    pub depot_journal_bord: NaiveDate,
    pub depot_bilan_v1: NaiveDate,
    pub restitution: NaiveDate,
    pub visite_mi_parcours: NaiveDate,
    pub depot_bilan_v2: NaiveDate,
    pub depot_rapport_final: NaiveDate,
}

impl From<StageTimeline> for StageTimelineDto {
    fn from(t: StageTimeline) -> Self {
        Self {
            id: t.id,
            stagiaire_id: t.stagiaire_id,
            lancement_stage: t.lancement_stage,
            demande_convention: t.demande_convention,
            remise_plan_travail: t.remise_plan_travail,
            depot_journal_bord: t.depot_journal_bord,
            depot_bilan_v1: t.depot_bilan_v1,
            restitution: t.restitution,
            visite_mi_parcours: t.visite_mi_parcours,
            depot_bilan_v2: t.depot_bilan_v2,
            depot_rapport_final: t.depot_rapport_final,
        }
    }
}

/// Admin correction of timeline anchors; absent fields are left unchanged
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStageTimelineDto {
    pub lancement_stage: Option<NaiveDate>,
    pub demande_convention: Option<NaiveDate>,
    pub remise_plan_travail: Option<NaiveDate>,
    pub depot_journal_bord: Option<NaiveDate>,
    pub depot_bilan_v1: Option<NaiveDate>,
    pub restitution: Option<NaiveDate>,
    pub visite_mi_parcours: Option<NaiveDate>,
    pub depot_bilan_v2: Option<NaiveDate>,
    pub depot_rapport_final: Option<NaiveDate>,
}
