//! API handlers for GearGuard REST endpoints

pub mod auth;
pub mod calendar;
pub mod categories;
pub mod equipment;
pub mod health;
pub mod mobile;
pub mod notifications;
pub mod openapi;
pub mod reports;
pub mod requests;
pub mod teams;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{
    error::AppError,
    models::user::{User, UserClaims},
    AppState,
};

/// Extractor for the validated identity claims of the caller
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Extractor resolving the caller to their provisioned user record. Every
/// gated endpoint goes through this; the role is always read fresh from
/// the database, never trusted from the token.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) =
            AuthenticatedUser::from_request_parts(parts, state).await?;

        let user = state
            .services
            .users
            .viewer(&claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("User not provisioned; call /auth/bootstrap first".to_string())
            })?;

        Ok(CurrentUser(user))
    }
}
