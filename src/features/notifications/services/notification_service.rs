use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::dtos::NotificationResponseDto;
use crate::features::notifications::models::{Notification, NotificationKind};
use crate::shared::types::PaginationQuery;

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, title, message, kind, status, related_entity_id, created_at";

/// Service for in-app notifications.
///
/// Workflow services call [`NotificationService::notify`] as a side effect of
/// report, rating and meeting transitions; a failed insert is logged and
/// swallowed so it never fails the triggering operation.
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a notification for a user. Errors are logged, not propagated.
    pub async fn notify(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        title: &str,
        message: &str,
        related_entity_id: Option<Uuid>,
    ) {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, title, message, kind, related_entity_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(title)
        .bind(message)
        .bind(kind)
        .bind(related_entity_id)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            tracing::error!("Failed to record notification for {}: {:?}", user_id, e);
        }
    }

    /// List the caller's notifications, newest first
    pub async fn list(
        &self,
        user_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<NotificationResponseDto>, i64)> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((
            notifications.into_iter().map(|n| n.into()).collect(),
            total,
        ))
    }

    /// Count unread notifications
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND status = 'unread'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Mark one of the caller's notifications as read
    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<NotificationResponseDto> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET status = 'read' \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        notification
            .map(|n| n.into())
            .ok_or_else(|| AppError::NotFound(format!("Notification '{}' not found", id)))
    }

    /// Mark all of the caller's notifications as read, returning the count
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET status = 'read' WHERE user_id = $1 AND status = 'unread'",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete one of the caller's notifications
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Notification '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
