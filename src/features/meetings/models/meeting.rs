use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of meeting, stored as the `meeting_kind` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "meeting_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MeetingKind {
    TuteurStagiaire,
    RhStagiaire,
    Evaluation,
    Suivi,
}

/// Meeting lifecycle, stored as the `meeting_status` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "meeting_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Planifie,
    Confirme,
    Annule,
    Termine,
}

impl MeetingStatus {
    /// Legal status transitions: a planned meeting is confirmed or
    /// cancelled, a confirmed one is completed or cancelled.
    pub fn can_transition_to(self, next: MeetingStatus) -> bool {
        matches!(
            (self, next),
            (MeetingStatus::Planifie, MeetingStatus::Confirme)
                | (MeetingStatus::Planifie, MeetingStatus::Annule)
                | (MeetingStatus::Confirme, MeetingStatus::Annule)
                | (MeetingStatus::Confirme, MeetingStatus::Termine)
        )
    }
}

/// Meeting joined with the organizer's name
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct MeetingDetails {
    pub id: Uuid,
    pub title: String,
    pub kind: MeetingKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: MeetingStatus,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub organizer_name: String,
}

/// Join row for a meeting participant
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct MeetingParticipant {
    pub meeting_id: Uuid,
    pub user_id: Uuid,
    pub has_accepted: bool,
    pub joined_at: DateTime<Utc>,
    pub participant_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_status_transitions() {
        assert!(MeetingStatus::Planifie.can_transition_to(MeetingStatus::Confirme));
        assert!(MeetingStatus::Planifie.can_transition_to(MeetingStatus::Annule));
        assert!(MeetingStatus::Confirme.can_transition_to(MeetingStatus::Termine));
        assert!(MeetingStatus::Confirme.can_transition_to(MeetingStatus::Annule));

        assert!(!MeetingStatus::Planifie.can_transition_to(MeetingStatus::Termine));
        assert!(!MeetingStatus::Annule.can_transition_to(MeetingStatus::Confirme));
        assert!(!MeetingStatus::Termine.can_transition_to(MeetingStatus::Planifie));
    }
}
