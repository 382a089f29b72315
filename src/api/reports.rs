//! Reporting endpoints (manager only)

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppResult;

use super::CurrentUser;

/// Optional date window over request creation time. Filtering applies only
/// when both bounds are present.
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
pub struct ReportRange {
    /// Window start (RFC 3339)
    pub start_date: Option<DateTime<Utc>>,
    /// Window end (RFC 3339)
    pub end_date: Option<DateTime<Utc>>,
}

/// System-health overview of the request set
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestsOverview {
    /// Total requests in the window
    pub total: i64,
    /// New + in-progress
    pub open: i64,
    /// Repaired + scrapped
    pub closed: i64,
    /// Open requests older than seven days
    pub overdue: i64,
    pub corrective: i64,
    pub preventive: i64,
    /// Rounded percentage; 0 when there are no requests
    pub corrective_percentage: i64,
    pub preventive_percentage: i64,
}

/// Per-team performance figures
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamPerformance {
    pub team_id: i32,
    pub team_name: String,
    pub total_requests: i64,
    pub completed: i64,
    pub open: i64,
    /// Mean of (updated - created) over completed requests, whole hours
    pub avg_resolution_time_hours: i64,
}

/// Per-technician workload figures
#[derive(Debug, Serialize, ToSchema)]
pub struct TechnicianWorkload {
    pub technician_id: i32,
    pub technician_name: String,
    pub team_id: Option<i32>,
    pub total_assigned: i64,
    pub completed: i64,
    pub in_progress: i64,
    /// Open assignments (new + in progress)
    pub currently_assigned: i64,
    pub avg_repair_time_hours: i64,
}

/// Per-equipment failure counts
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentStat {
    pub equipment_id: i32,
    pub equipment_name: String,
    /// Category name, "Uncategorized" when the lookup fails
    pub category: String,
    pub department: String,
    pub total_requests: i64,
    pub scrapped_count: i64,
    pub is_scrapped: bool,
}

/// Equipment insight report
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentInsights {
    /// Most frequently failing first
    pub equipment_stats: Vec<EquipmentStat>,
    /// Requests per category name
    pub category_breakdown: BTreeMap<String, i64>,
    pub total_equipment: i64,
    pub total_scrapped: i64,
}

/// Requests overview report
#[utoipa::path(
    get,
    path = "/reports/overview",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportRange),
    responses(
        (status = 200, description = "Overview", body = RequestsOverview),
        (status = 403, description = "Managers only")
    )
)]
pub async fn get_overview(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Query(range): Query<ReportRange>,
) -> AppResult<Json<RequestsOverview>> {
    let overview = state.services.reports.overview(&actor, range).await?;
    Ok(Json(overview))
}

/// Team performance report
#[utoipa::path(
    get,
    path = "/reports/teams",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportRange),
    responses(
        (status = 200, description = "Team performance", body = Vec<TeamPerformance>),
        (status = 403, description = "Managers only")
    )
)]
pub async fn get_team_performance(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Query(range): Query<ReportRange>,
) -> AppResult<Json<Vec<TeamPerformance>>> {
    let stats = state.services.reports.team_performance(&actor, range).await?;
    Ok(Json(stats))
}

/// Technician workload report
#[utoipa::path(
    get,
    path = "/reports/technicians",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportRange),
    responses(
        (status = 200, description = "Technician workload", body = Vec<TechnicianWorkload>),
        (status = 403, description = "Managers only")
    )
)]
pub async fn get_technician_workload(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Query(range): Query<ReportRange>,
) -> AppResult<Json<Vec<TechnicianWorkload>>> {
    let stats = state
        .services
        .reports
        .technician_workload(&actor, range)
        .await?;
    Ok(Json(stats))
}

/// Equipment insights report
#[utoipa::path(
    get,
    path = "/reports/equipment",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportRange),
    responses(
        (status = 200, description = "Equipment insights", body = EquipmentInsights),
        (status = 403, description = "Managers only")
    )
)]
pub async fn get_equipment_insights(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Query(range): Query<ReportRange>,
) -> AppResult<Json<EquipmentInsights>> {
    let insights = state
        .services
        .reports
        .equipment_insights(&actor, range)
        .await?;
    Ok(Json(insights))
}
