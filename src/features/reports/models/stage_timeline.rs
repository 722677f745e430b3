use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a stagiaire's timeline anchor dates.
///
/// One row per stagiaire, created at onboarding (or defaulted from the stage
/// start date on first access). `lancement_stage` is the anchor from which
/// report due dates are computed; the remaining dates describe the standard
/// milestones of the internship. Mutable only through the admin correction
/// endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct StageTimeline {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StageTimeline {
    /// Default milestone offsets (in days) around a launch date, as used when
    /// no timeline was recorded at onboarding
    pub fn defaults_from(stagiaire_id: Uuid, launch: NaiveDate) -> NewStageTimeline {
        NewStageTimeline {
            stagiaire_id,
            lancement_stage: launch,
            demande_convention: launch - chrono::Duration::days(7),
            remise_plan_travail: launch + chrono::Duration::days(14),
            depot_journal_bord: launch + chrono::Duration::days(30),
            depot_bilan_v1: launch + chrono::Duration::days(45),
            restitution: launch + chrono::Duration::days(60),
            visite_mi_parcours: launch + chrono::Duration::days(75),
            depot_bilan_v2: launch + chrono::Duration::days(90),
            depot_rapport_final: launch + chrono::Duration::days(120),
        }
    }
}

/// Anchor dates for a timeline row about to be inserted
#[derive(Debug, Clone)]
pub struct NewStageTimeline {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeline_offsets() {
        let launch = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let t = StageTimeline::defaults_from(Uuid::new_v4(), launch);

        assert_eq!(t.lancement_stage, launch);
        assert_eq!(
            t.demande_convention,
            NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()
        );
        assert_eq!(
            t.remise_plan_travail,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(
            t.depot_rapport_final,
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
        );
    }
}
