//! Calendar endpoint for scheduled preventive maintenance

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, models::request::RequestDetails};

use super::CurrentUser;

/// Calendar window query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// Window start (RFC 3339)
    pub start_date: DateTime<Utc>,
    /// Window end (RFC 3339)
    pub end_date: DateTime<Utc>,
}

/// Preventive maintenance scheduled inside a window. Technicians with a
/// team see only their team's requests.
#[utoipa::path(
    get,
    path = "/calendar",
    tag = "calendar",
    security(("bearer_auth" = [])),
    params(CalendarQuery),
    responses(
        (status = 200, description = "Scheduled maintenance", body = Vec<RequestDetails>),
        (status = 403, description = "Calendar access restricted")
    )
)]
pub async fn scheduled_maintenance(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<RequestDetails>>> {
    let requests = state
        .services
        .requests
        .scheduled_maintenance(&actor, query.start_date, query.end_date)
        .await?;
    Ok(Json(requests))
}
