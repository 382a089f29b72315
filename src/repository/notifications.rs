//! Notifications repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::notification::{NewNotification, Notification},
};

/// Cap applied to notification listings, newest first
const LIST_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: Pool<Postgres>,
}

impl NotificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a system-generated notification
    pub async fn create(&self, data: &NewNotification) -> AppResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                user_id, notification_type, title, message, entity_type, entity_id, read
            )
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(&data.notification_type)
        .bind(&data.title)
        .bind(&data.message)
        .bind(&data.entity_type)
        .bind(&data.entity_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    /// Recent notifications for a user, newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    /// Unread count for the badge
    pub async fn unread_count(&self, user_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Mark one notification as read, scoped to its owner. Marking a
    /// notification that belongs to someone else reports NotFound, the same
    /// as a nonexistent id. Idempotent on already-read rows.
    pub async fn mark_read(&self, id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Notification with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Mark every unread notification of a user as read
    pub async fn mark_all_read(&self, user_id: i32) -> AppResult<()> {
        sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
