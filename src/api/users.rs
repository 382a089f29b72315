//! User management endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::user::{AssignRole, AssignTeam, User},
};

use super::CurrentUser;

/// List all users (manager only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 403, description = "Managers only")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list(&actor).await?;
    Ok(Json(users))
}

/// Change a user's role (manager only)
#[utoipa::path(
    put,
    path = "/users/{id}/role",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = AssignRole,
    responses(
        (status = 204, description = "Role updated"),
        (status = 403, description = "Managers only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn assign_role(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AssignRole>,
) -> AppResult<axum::http::StatusCode> {
    state.services.users.assign_role(&actor, id, data.role).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Move a user onto a team (manager only)
#[utoipa::path(
    put,
    path = "/users/{id}/team",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = AssignTeam,
    responses(
        (status = 204, description = "Team updated"),
        (status = 403, description = "Managers only"),
        (status = 404, description = "User or team not found")
    )
)]
pub async fn assign_team(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AssignTeam>,
) -> AppResult<axum::http::StatusCode> {
    state
        .services
        .users
        .assign_team(&actor, id, data.team_id)
        .await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Technicians and managers, for the assignment dropdown
#[utoipa::path(
    get,
    path = "/users/technicians",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Assignable users", body = Vec<User>),
        (status = 403, description = "Insufficient permissions")
    )
)]
pub async fn list_technicians(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.technicians(&actor).await?;
    Ok(Json(users))
}

/// Users that can still be added to a team (manager only)
#[utoipa::path(
    get,
    path = "/users/promotable",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Promotable users", body = Vec<User>),
        (status = 403, description = "Managers only")
    )
)]
pub async fn list_promotable(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.promotable(&actor).await?;
    Ok(Json(users))
}
