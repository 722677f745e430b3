use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::meetings::models::{MeetingDetails, MeetingKind, MeetingStatus};

/// One participant of a meeting
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeetingParticipantDto {
    pub user_id: Uuid,
    pub name: String,
    pub has_accepted: bool,
}

/// Response DTO for a meeting
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeetingResponseDto {
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
    pub organizer_name: String,
    pub participants: Vec<MeetingParticipantDto>,
}

impl MeetingResponseDto {
    pub fn from_details(m: MeetingDetails, participants: Vec<MeetingParticipantDto>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            kind: m.kind,
            date: m.date,
            time: m.time,
            duration_minutes: m.duration_minutes,
            description: m.description,
            location: m.location,
            status: m.status,
            organizer_id: m.organizer_id,
            organizer_name: m.organizer_name,
            participants,
        }
    }
}

/// Request DTO for scheduling a meeting
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMeetingDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub kind: MeetingKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[validate(range(min = 5, max = 480))]
    pub duration_minutes: i32,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(min = 1))]
    pub participant_ids: Vec<Uuid>,
}

/// Request DTO for editing a planned meeting; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMeetingDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    #[validate(range(min = 5, max = 480))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

/// Request DTO for a status transition
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMeetingStatusDto {
    pub status: MeetingStatus,
}
