//! Mobile bridge endpoints.
//!
//! A thin token-issuance layer for the non-web client, guarded by a shared
//! static API key header. Token payload is `{userId, email, role}` with a
//! 7-day expiry. Credential verification belongs to the upstream identity
//! provider; the bridge only issues and verifies session tokens.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::user::Role,
    AppState,
};

/// Mobile login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct MobileLoginRequest {
    pub email: String,
}

/// User payload returned to the mobile client
#[derive(Debug, Serialize, ToSchema)]
pub struct MobileUser {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub team_id: Option<i32>,
}

/// Mobile login response
#[derive(Debug, Serialize, ToSchema)]
pub struct MobileLoginResponse {
    pub success: bool,
    pub token: String,
    pub user: MobileUser,
}

/// Mobile token verification response
#[derive(Debug, Serialize, ToSchema)]
pub struct MobileVerifyResponse {
    pub valid: bool,
    pub user: MobileUser,
}

/// Check the shared static API key header sent by the mobile app
fn verify_api_key(headers: &HeaderMap, state: &AppState) -> AppResult<()> {
    let expected = state
        .config
        .auth
        .mobile_api_key
        .as_deref()
        .ok_or_else(|| AppError::Authentication("Mobile API is not enabled".to_string()))?;

    let provided = headers
        .get("X-API-Key")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Invalid API key".to_string()))?;

    if provided != expected {
        return Err(AppError::Authentication("Invalid API key".to_string()));
    }
    Ok(())
}

fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("No token provided".to_string()))?;
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Authentication("No token provided".to_string()));
    }
    Ok(&auth_header[7..])
}

/// Issue a mobile session token
#[utoipa::path(
    post,
    path = "/mobile/auth/login",
    tag = "mobile",
    request_body = MobileLoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = MobileLoginResponse),
        (status = 401, description = "Invalid API key"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(data): Json<MobileLoginRequest>,
) -> AppResult<Json<MobileLoginResponse>> {
    verify_api_key(&headers, &state)?;

    let user = state
        .services
        .users
        .get_by_email(&data.email)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("User not found. Sign up via the web app first".to_string())
        })?;

    let token = state.services.users.issue_mobile_token(&user)?;

    Ok(Json(MobileLoginResponse {
        success: true,
        token,
        user: MobileUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            team_id: user.team_id,
        },
    }))
}

/// Verify a mobile session token and return fresh user data
#[utoipa::path(
    get,
    path = "/mobile/auth/verify",
    tag = "mobile",
    responses(
        (status = 200, description = "Token is valid", body = MobileVerifyResponse),
        (status = 401, description = "Invalid API key or token")
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<MobileVerifyResponse>> {
    verify_api_key(&headers, &state)?;

    let token = bearer_token(&headers)?;
    let claims = state.services.users.verify_mobile_token(token)?;

    // Re-read the user so role changes take effect immediately
    let user = state.services.users.get_by_id(claims.user_id).await?;

    Ok(Json(MobileVerifyResponse {
        valid: true,
        user: MobileUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            team_id: user.team_id,
        },
    }))
}
