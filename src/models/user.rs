//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can report issues on equipment
    User,
    /// Can work on maintenance requests
    Technician,
    /// Can manage the whole system
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Technician => "technician",
            Role::Manager => "manager",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "technician" => Ok(Role::Technician),
            "manager" => Ok(Role::Manager),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

// SQLx conversion for Role
impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    /// Identifier assigned by the upstream identity provider
    pub auth_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub team_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Short user representation attached to enriched payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserRef {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Bootstrap request: provision the signed-in identity as a local user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BootstrapUser {
    pub auth_id: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}

/// Change a user's role (manager only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRole {
    pub role: Role,
}

/// Move a user onto a team (manager only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignTeam {
    pub team_id: i32,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

/// Claims carried by mobile bridge tokens: `{userId, email, role}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobileClaims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl MobileClaims {
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

impl User {
    /// Check whether the user may be assigned to work on a request.
    /// `assigned_to` must always reference a technician or manager.
    pub fn is_assignable(&self) -> bool {
        matches!(self.role, Role::Technician | Role::Manager)
    }

    pub fn require_assignable(&self) -> Result<(), AppError> {
        if self.is_assignable() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "User {} is not a technician or manager",
                self.id
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::User, Role::Technician, Role::Manager] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn role_parse_rejects_unknown() {
        assert!("admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn only_technicians_and_managers_are_assignable() {
        let mut user = User {
            id: 1,
            auth_id: "auth-1".into(),
            name: "Abigail Peterson".into(),
            email: "abigail@example.com".into(),
            role: Role::User,
            team_id: None,
            created_at: chrono::Utc::now(),
        };
        assert!(user.require_assignable().is_err());
        user.role = Role::Technician;
        assert!(user.require_assignable().is_ok());
        user.role = Role::Manager;
        assert!(user.require_assignable().is_ok());
    }

    #[test]
    fn mobile_claims_round_trip() {
        let claims = MobileClaims {
            user_id: 42,
            email: "tech@example.com".into(),
            role: Role::Technician,
            iat: chrono::Utc::now().timestamp(),
            exp: chrono::Utc::now().timestamp() + 7 * 24 * 3600,
        };
        let token = claims.create_token("test-secret").unwrap();
        let parsed = MobileClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.user_id, 42);
        assert_eq!(parsed.email, "tech@example.com");
        assert_eq!(parsed.role, Role::Technician);
    }

    #[test]
    fn mobile_claims_reject_wrong_secret() {
        let claims = MobileClaims {
            user_id: 1,
            email: "a@b.c".into(),
            role: Role::User,
            iat: chrono::Utc::now().timestamp(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        let token = claims.create_token("secret-a").unwrap();
        assert!(MobileClaims::from_token(&token, "secret-b").is_err());
    }
}
