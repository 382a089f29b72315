//! Authentication endpoints: provisioning and viewer lookup.
//!
//! Credential handling itself lives in the upstream identity provider;
//! this server only consumes its signed tokens.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{BootstrapUser, User},
};

use super::{AuthenticatedUser, CurrentUser};

/// Provision the signed-in identity as a local user.
///
/// Idempotent: calling again for an existing identity returns the stored
/// user unchanged. The first user ever provisioned becomes a manager.
#[utoipa::path(
    post,
    path = "/auth/bootstrap",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = BootstrapUser,
    responses(
        (status = 201, description = "User provisioned", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn bootstrap(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<BootstrapUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Callers may only provision themselves
    if claims.sub != data.auth_id {
        return Err(AppError::Authorization(
            "Cannot provision a different identity".to_string(),
        ));
    }

    let user = state
        .services
        .users
        .bootstrap(&data.auth_id, &data.email, &data.name)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Current user details
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> AppResult<Json<User>> {
    Ok(Json(user))
}
