//! Equipment category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment category record (Computers, Software, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentCategory {
    pub id: i32,
    pub name: String,
    pub company: String,
    /// Optional default owner for equipment in this category
    pub responsible_user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name must not be empty"))]
    pub name: String,
    pub company: String,
    pub responsible_user_id: Option<i32>,
}

/// Update category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "Category name must not be empty"))]
    pub name: String,
    pub company: String,
    pub responsible_user_id: Option<i32>,
}
