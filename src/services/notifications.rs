//! Notification fan-out and read state.
//!
//! Fan-out is fire-and-forget: events are dispatched on a spawned task
//! after the triggering write has committed, and insertion failures are
//! logged but never surfaced to the caller. A lost notification must not
//! fail or roll back the mutation that produced it.

use crate::{
    error::AppResult,
    models::{
        notification::{NewNotification, Notification, UnreadCount},
        request::RequestStatus,
        user::{Role, User},
    },
    repository::Repository,
};

/// Lifecycle events that produce notifications
#[derive(Debug, Clone)]
pub enum RequestEvent {
    Created {
        request_id: i32,
        subject: String,
    },
    StatusChanged {
        request_id: i32,
        created_by: i32,
        status: RequestStatus,
    },
    Assigned {
        request_id: i32,
        subject: String,
        technician_id: i32,
    },
}

impl RequestEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            RequestEvent::Created { .. } => "REQUEST_CREATED",
            RequestEvent::StatusChanged { .. } => "REQUEST_STATUS_CHANGED",
            RequestEvent::Assigned { .. } => "REQUEST_ASSIGNED",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RequestEvent::Created { .. } => "New maintenance request",
            RequestEvent::StatusChanged { .. } => "Request status updated",
            RequestEvent::Assigned { .. } => "New request assigned",
        }
    }

    pub fn message(&self) -> String {
        match self {
            RequestEvent::Created { subject, .. } => format!("{} was created", subject),
            RequestEvent::StatusChanged { status, .. } => {
                format!("Your request status changed to {}", status)
            }
            RequestEvent::Assigned { subject, .. } => {
                format!("You were assigned to \"{}\"", subject)
            }
        }
    }

    fn request_id(&self) -> i32 {
        match self {
            RequestEvent::Created { request_id, .. }
            | RequestEvent::StatusChanged { request_id, .. }
            | RequestEvent::Assigned { request_id, .. } => *request_id,
        }
    }

    /// Build the notification rows for a known recipient set
    pub fn rows_for(&self, recipients: &[i32]) -> Vec<NewNotification> {
        recipients
            .iter()
            .map(|&user_id| NewNotification {
                user_id,
                notification_type: self.event_type().to_string(),
                title: self.title().to_string(),
                message: self.message(),
                entity_type: Some("request".to_string()),
                entity_id: Some(self.request_id().to_string()),
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Dispatch an event to its recipients on a background task.
    /// Returns immediately; the caller's write has already committed.
    pub fn dispatch(&self, event: RequestEvent) {
        let repository = self.repository.clone();
        tokio::spawn(async move {
            if let Err(e) = Self::deliver(&repository, &event).await {
                tracing::warn!(
                    event = event.event_type(),
                    "Notification delivery failed: {}",
                    e
                );
            }
        });
    }

    async fn deliver(repository: &Repository, event: &RequestEvent) -> AppResult<()> {
        let recipients: Vec<i32> = match event {
            // New requests fan out to every manager
            RequestEvent::Created { .. } => repository
                .users
                .list_by_role(Role::Manager)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect(),
            RequestEvent::StatusChanged { created_by, .. } => vec![*created_by],
            RequestEvent::Assigned { technician_id, .. } => vec![*technician_id],
        };

        for row in event.rows_for(&recipients) {
            repository.notifications.create(&row).await?;
        }
        Ok(())
    }

    /// Recent notifications for the calling user
    pub async fn list_mine(&self, actor: &User) -> AppResult<Vec<Notification>> {
        self.repository.notifications.list_for_user(actor.id).await
    }

    /// Unread badge count for the calling user
    pub async fn unread_count(&self, actor: &User) -> AppResult<UnreadCount> {
        let unread = self.repository.notifications.unread_count(actor.id).await?;
        Ok(UnreadCount { unread })
    }

    /// Mark one of the calling user's notifications as read
    pub async fn mark_as_read(&self, actor: &User, id: i32) -> AppResult<()> {
        self.repository.notifications.mark_read(id, actor.id).await
    }

    /// Mark all of the calling user's notifications as read
    pub async fn mark_all_as_read(&self, actor: &User) -> AppResult<()> {
        self.repository.notifications.mark_all_read(actor.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_event_message_template() {
        let event = RequestEvent::Created {
            request_id: 7,
            subject: "Broken monitor".to_string(),
        };
        assert_eq!(event.event_type(), "REQUEST_CREATED");
        assert_eq!(event.message(), "Broken monitor was created");
    }

    #[test]
    fn status_changed_event_message_template() {
        let event = RequestEvent::StatusChanged {
            request_id: 7,
            created_by: 3,
            status: RequestStatus::InProgress,
        };
        assert_eq!(event.message(), "Your request status changed to in_progress");
    }

    #[test]
    fn assigned_event_message_template() {
        let event = RequestEvent::Assigned {
            request_id: 7,
            subject: "Broken monitor".to_string(),
            technician_id: 9,
        };
        assert_eq!(event.message(), "You were assigned to \"Broken monitor\"");
    }

    #[test]
    fn rows_carry_the_request_entity() {
        let event = RequestEvent::Created {
            request_id: 12,
            subject: "Printer jam".to_string(),
        };
        let rows = event.rows_for(&[1, 2, 3]);
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.entity_type.as_deref(), Some("request"));
            assert_eq!(row.entity_id.as_deref(), Some("12"));
            assert!(!row.message.is_empty());
        }
        assert_eq!(rows[0].user_id, 1);
        assert_eq!(rows[2].user_id, 3);
    }
}
