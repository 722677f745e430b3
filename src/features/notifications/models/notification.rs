use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Category of a notification, stored as the `notification_kind` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
    ReportSubmitted,
    ReportApproved,
    ReportRejected,
    RatingReceived,
    RatingApproved,
    RatingRejected,
    RatingResponse,
    MeetingInvitation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Unread,
    Read,
}

/// Database model for an in-app notification.
///
/// Rows are written by the report/rating/meeting services; delivery beyond
/// the in-app inbox (email, websockets) is handled by external collaborators.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub related_entity_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
