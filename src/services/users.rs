//! User provisioning and management service

use chrono::{Duration, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{MobileClaims, Role, User},
    permissions::Capability,
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Provision the signed-in identity as a local user. Idempotent; the
    /// first user ever created becomes a manager, everyone after a plain
    /// user.
    pub async fn bootstrap(&self, auth_id: &str, email: &str, name: &str) -> AppResult<User> {
        self.repository.users.bootstrap(auth_id, email, name).await
    }

    /// Resolve the local user for an upstream identity
    pub async fn viewer(&self, auth_id: &str) -> AppResult<Option<User>> {
        self.repository.users.get_by_auth_id(auth_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repository.users.get_by_email(email).await
    }

    /// List every user (manager only)
    pub async fn list(&self, actor: &User) -> AppResult<Vec<User>> {
        actor.role.require(Capability::ManageTeams)?;
        self.repository.users.list().await
    }

    /// Change a user's role (manager only)
    pub async fn assign_role(&self, actor: &User, user_id: i32, role: Role) -> AppResult<()> {
        actor.role.require(Capability::ManageTeams)?;
        self.repository.users.set_role(user_id, role).await
    }

    /// Move a user onto a team (manager only)
    pub async fn assign_team(&self, actor: &User, user_id: i32, team_id: i32) -> AppResult<()> {
        actor.role.require(Capability::ManageTeams)?;
        self.repository.teams.get_by_id(team_id).await?;
        self.repository
            .users
            .set_team(user_id, Some(team_id), None)
            .await
    }

    /// Technicians and managers, for the assignment dropdown
    pub async fn technicians(&self, actor: &User) -> AppResult<Vec<User>> {
        actor.role.require(Capability::ViewAllRequests)?;
        self.repository.users.list_assignable().await
    }

    /// Users that can still be added to a team (manager only)
    pub async fn promotable(&self, actor: &User) -> AppResult<Vec<User>> {
        actor.role.require(Capability::ManageTeams)?;
        self.repository.users.list_promotable().await
    }

    /// Issue a mobile session token for a known user. Payload is
    /// `{userId, email, role}` with a 7-day expiry by default.
    pub fn issue_mobile_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = MobileClaims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::days(self.config.mobile_token_days as i64)).timestamp(),
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a mobile session token and return its claims
    pub fn verify_mobile_token(&self, token: &str) -> AppResult<MobileClaims> {
        MobileClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))
    }
}
