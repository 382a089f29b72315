//! Maintenance request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::request::{
        AssignTechnician, CreateRequest, MaintenanceRequest, RequestDetails, UpdateRequest,
        UpdateRequestStatus,
    },
};

use super::CurrentUser;

/// Requests created by the calling user
#[utoipa::path(
    get,
    path = "/requests/mine",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own requests, newest first", body = Vec<RequestDetails>)
    )
)]
pub async fn list_my_requests(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<Vec<RequestDetails>>> {
    let requests = state.services.requests.list_mine(&actor).await?;
    Ok(Json(requests))
}

/// All requests (technicians and managers)
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All requests, newest first", body = Vec<RequestDetails>),
        (status = 403, description = "Insufficient permissions")
    )
)]
pub async fn list_all_requests(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<Vec<RequestDetails>>> {
    let requests = state.services.requests.list_all(&actor).await?;
    Ok(Json(requests))
}

/// Single request with referenced entities. Plain users may only fetch
/// their own requests.
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = RequestDetails),
        (status = 403, description = "Not your request"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RequestDetails>> {
    let details = state.services.requests.get_details(&actor, id).await?;
    Ok(Json(details))
}

/// File a maintenance request. Corrective requests may be filed by anyone;
/// preventive ones need technician or manager rights.
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = MaintenanceRequest),
        (status = 403, description = "Preventive requests need elevated rights"),
        (status = 404, description = "Equipment not found"),
        (status = 422, description = "Equipment is scrapped")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Json(data): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let request = state.services.requests.create(&actor, data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Change a request's status (technicians and managers)
#[utoipa::path(
    put,
    path = "/requests/{id}/status",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequestStatus,
    responses(
        (status = 204, description = "Status updated"),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn update_status(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRequestStatus>,
) -> AppResult<StatusCode> {
    state
        .services
        .requests
        .update_status(&actor, id, data.status)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign a request to a technician (technicians and managers)
#[utoipa::path(
    put,
    path = "/requests/{id}/assignee",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = AssignTechnician,
    responses(
        (status = 204, description = "Request assigned"),
        (status = 400, description = "Assignee is not a technician or manager"),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "Request or user not found")
    )
)]
pub async fn assign_technician(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AssignTechnician>,
) -> AppResult<StatusCode> {
    state
        .services
        .requests
        .assign_technician(&actor, id, data)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Patch request details (manager only). Changing the equipment re-routes
/// the request to that equipment's maintenance team.
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 403, description = "Managers only"),
        (status = 404, description = "Request or equipment not found")
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state
        .services
        .requests
        .update_request(&actor, id, data)
        .await?;
    Ok(Json(request))
}

/// Scrap the equipment behind a request (manager only). The request moves
/// to status `scrap` and the equipment is retired, atomically.
#[utoipa::path(
    post,
    path = "/requests/{id}/scrap",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Equipment scrapped"),
        (status = 403, description = "Managers only"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn scrap_equipment(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.requests.scrap_equipment(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
