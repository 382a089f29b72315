//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// In-app notification, created only by the system
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    /// REQUEST_CREATED, REQUEST_ASSIGNED, REQUEST_STATUS_CHANGED, ...
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    /// "request", "equipment"
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Row waiting to be inserted by the fanout dispatcher
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i32,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
}

/// Unread badge count
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCount {
    pub unread: i64,
}
