//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Equipment name, e.g. Samsung Monitor 15"
    pub name: String,
    pub category_id: i32,
    pub company: String,
    pub department: String,
    pub serial_number: Option<String>,
    /// Employee currently using the equipment
    pub used_by_employee: Option<String>,
    /// Office / floor / lab
    pub used_in_location: Option<String>,
    /// Default technician
    pub technician_id: Option<i32>,
    /// Team that owns maintenance requests for this equipment
    pub maintenance_team_id: i32,
    pub assigned_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    /// One-way flag: set true when scrapped, never reset
    pub is_scrapped: bool,
    pub created_at: DateTime<Utc>,
}

/// Short equipment representation attached to enriched payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentRef {
    pub id: i32,
    pub name: String,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Equipment name must not be empty"))]
    pub name: String,
    pub category_id: i32,
    pub company: String,
    pub department: String,
    pub serial_number: Option<String>,
    pub used_by_employee: Option<String>,
    pub used_in_location: Option<String>,
    pub technician_id: Option<i32>,
    pub maintenance_team_id: i32,
    pub assigned_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// Update equipment request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub company: Option<String>,
    pub department: Option<String>,
    pub serial_number: Option<String>,
    pub used_by_employee: Option<String>,
    pub used_in_location: Option<String>,
    pub technician_id: Option<i32>,
    pub maintenance_team_id: Option<i32>,
    pub description: Option<String>,
    pub is_scrapped: Option<bool>,
}
