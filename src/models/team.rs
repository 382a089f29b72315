//! Maintenance team model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Team record (IT Support, Mechanics, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Team enriched with its member count for list views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamWithCount {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub member_count: i64,
}

/// Short team representation attached to enriched payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamRef {
    pub id: i32,
    pub name: String,
}

/// Create team request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeam {
    #[validate(length(min = 1, message = "Team name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

/// Update team request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeam {
    #[validate(length(min = 1, message = "Team name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

/// Add a user to a team
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMember {
    pub user_id: i32,
}
