use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::notifications::models::{Notification, NotificationKind, NotificationStatus};

/// Response DTO for a notification
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponseDto {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub related_entity_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponseDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            kind: n.kind,
            status: n.status,
            related_entity_id: n.related_entity_id,
            created_at: n.created_at,
        }
    }
}

/// Response DTO for the unread counter badge
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountDto {
    pub unread: i64,
}
