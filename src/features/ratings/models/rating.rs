use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::UserRole;

/// Who evaluates whom, stored as the `evaluation_kind` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "evaluation_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    TuteurToStagiaire,
    RhToStagiaire,
    StagiaireToTuteur,
}

/// Rating lifecycle, stored as the `rating_status` Postgres enum.
///
/// Draft -> Submitted -> Approved | Rejected. Rejected is terminal; a new
/// evaluation cycle starts with a fresh draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "rating_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RatingStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl RatingStatus {
    /// Legal transitions of the rating state machine
    pub fn can_transition_to(self, next: RatingStatus) -> bool {
        matches!(
            (self, next),
            (RatingStatus::Draft, RatingStatus::Submitted)
                | (RatingStatus::Submitted, RatingStatus::Approved)
                | (RatingStatus::Submitted, RatingStatus::Rejected)
        )
    }
}

/// Which evaluation kind a pair of roles maps to, if any.
///
/// The relationship constraint (a tuteur rates their own stagiaires, a
/// stagiaire rates their own tuteur) is checked separately against the
/// assignment stored on the user rows.
pub fn evaluation_kind_for(
    evaluator_role: UserRole,
    evaluated_role: UserRole,
) -> Option<EvaluationKind> {
    match (evaluator_role, evaluated_role) {
        (UserRole::Tuteur, UserRole::Stagiaire) => Some(EvaluationKind::TuteurToStagiaire),
        (UserRole::Rh, UserRole::Stagiaire) => Some(EvaluationKind::RhToStagiaire),
        (UserRole::Stagiaire, UserRole::Tuteur) => Some(EvaluationKind::StagiaireToTuteur),
        _ => None,
    }
}

/// Rating row joined with user names, for API responses
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct RatingDetails {
    pub id: Uuid,
    pub evaluator_id: Uuid,
    pub evaluated_user_id: Uuid,
    pub score: f64,
    pub comment: String,
    pub kind: EvaluationKind,
    pub status: RatingStatus,
    pub detailed_scores: Option<serde_json::Value>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by_user_id: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub stage_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub evaluator_name: String,
    pub evaluated_user_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(RatingStatus::Draft.can_transition_to(RatingStatus::Submitted));
        assert!(RatingStatus::Submitted.can_transition_to(RatingStatus::Approved));
        assert!(RatingStatus::Submitted.can_transition_to(RatingStatus::Rejected));
    }

    #[test]
    fn test_draft_cannot_skip_submission() {
        // Draft -> Approved must pass through Submitted
        assert!(!RatingStatus::Draft.can_transition_to(RatingStatus::Approved));
        assert!(!RatingStatus::Draft.can_transition_to(RatingStatus::Rejected));
    }

    #[test]
    fn test_rejected_is_terminal() {
        assert!(!RatingStatus::Rejected.can_transition_to(RatingStatus::Draft));
        assert!(!RatingStatus::Rejected.can_transition_to(RatingStatus::Submitted));
        assert!(!RatingStatus::Rejected.can_transition_to(RatingStatus::Approved));
    }

    #[test]
    fn test_approved_is_terminal() {
        assert!(!RatingStatus::Approved.can_transition_to(RatingStatus::Rejected));
        assert!(!RatingStatus::Approved.can_transition_to(RatingStatus::Draft));
    }

    #[test]
    fn test_evaluation_kind_matrix() {
        assert_eq!(
            evaluation_kind_for(UserRole::Tuteur, UserRole::Stagiaire),
            Some(EvaluationKind::TuteurToStagiaire)
        );
        assert_eq!(
            evaluation_kind_for(UserRole::Rh, UserRole::Stagiaire),
            Some(EvaluationKind::RhToStagiaire)
        );
        assert_eq!(
            evaluation_kind_for(UserRole::Stagiaire, UserRole::Tuteur),
            Some(EvaluationKind::StagiaireToTuteur)
        );
        assert_eq!(evaluation_kind_for(UserRole::Stagiaire, UserRole::Stagiaire), None);
        assert_eq!(evaluation_kind_for(UserRole::Admin, UserRole::Stagiaire), None);
        assert_eq!(evaluation_kind_for(UserRole::Tuteur, UserRole::Tuteur), None);
    }
}
