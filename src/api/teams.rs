//! Team management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        team::{AddMember, CreateTeam, Team, TeamWithCount, UpdateTeam},
        user::User,
    },
};

use super::CurrentUser;

/// List all teams with member counts
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Team list", body = Vec<TeamWithCount>)
    )
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    CurrentUser(_actor): CurrentUser,
) -> AppResult<Json<Vec<TeamWithCount>>> {
    let teams = state.services.teams.list().await?;
    Ok(Json(teams))
}

/// Create a team (manager only)
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 403, description = "Managers only")
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Json(data): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<Team>)> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let team = state.services.teams.create(&actor, data).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Update a team (manager only)
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 403, description = "Managers only"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTeam>,
) -> AppResult<Json<Team>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let team = state.services.teams.update(&actor, id, data).await?;
    Ok(Json(team))
}

/// Add a user to a team (manager only). Plain users are promoted to
/// technician when joining.
#[utoipa::path(
    post,
    path = "/teams/{id}/members",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    request_body = AddMember,
    responses(
        (status = 204, description = "Member added"),
        (status = 403, description = "Managers only"),
        (status = 404, description = "Team or user not found")
    )
)]
pub async fn add_member(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AddMember>,
) -> AppResult<StatusCode> {
    state
        .services
        .teams
        .add_member(&actor, id, data.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a user from their team (manager only)
#[utoipa::path(
    delete,
    path = "/teams/members/{user_id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "Member removed"),
        (status = 403, description = "Managers only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn remove_member(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(user_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.teams.remove_member(&actor, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List members of a team
#[utoipa::path(
    get,
    path = "/teams/{id}/members",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team members", body = Vec<User>),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_members(
    State(state): State<crate::AppState>,
    CurrentUser(_actor): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<User>>> {
    let members = state.services.teams.members(id).await?;
    Ok(Json(members))
}
