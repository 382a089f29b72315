//! Notification endpoints, all scoped to the calling user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::notification::{Notification, UnreadCount},
};

use super::CurrentUser;

/// Recent notifications for the calling user, newest first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications", body = Vec<Notification>)
    )
)]
pub async fn list_my_notifications(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state.services.notifications.list_mine(&actor).await?;
    Ok(Json(notifications))
}

/// Unread badge count
#[utoipa::path(
    get,
    path = "/notifications/unread",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread count", body = UnreadCount)
    )
)]
pub async fn unread_count(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<UnreadCount>> {
    let count = state.services.notifications.unread_count(&actor).await?;
    Ok(Json(count))
}

/// Mark one notification as read. Only the owner can; anyone else gets a
/// NotFound, indistinguishable from a missing id.
#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Marked as read"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_as_read(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.notifications.mark_as_read(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark all of the calling user's notifications as read
#[utoipa::path(
    post,
    path = "/notifications/read-all",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "All marked as read")
    )
)]
pub async fn mark_all_as_read(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<StatusCode> {
    state.services.notifications.mark_all_as_read(&actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
