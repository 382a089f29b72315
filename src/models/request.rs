//! Maintenance request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::equipment::EquipmentRef;
use super::team::TeamRef;
use super::user::UserRef;

/// Maintenance request kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Breakdown repair
    Corrective,
    /// Routine scheduled check
    Preventive,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Corrective => "corrective",
            RequestType::Preventive => "preventive",
        }
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "corrective" => Ok(RequestType::Corrective),
            "preventive" => Ok(RequestType::Preventive),
            _ => Err(format!("Invalid request type: {}", s)),
        }
    }
}

/// Request priority, defaults to medium when not supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl RequestPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPriority::Low => "low",
            RequestPriority::Medium => "medium",
            RequestPriority::High => "high",
            RequestPriority::Critical => "critical",
        }
    }
}

impl std::str::FromStr for RequestPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RequestPriority::Low),
            "medium" => Ok(RequestPriority::Medium),
            "high" => Ok(RequestPriority::High),
            "critical" => Ok(RequestPriority::Critical),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

/// Lifecycle status of a request.
///
/// The transition table is deliberately permissive: any status may be set
/// from any other by a technician or manager. `Scrap` is terminal by UI
/// convention only, and additionally marks the equipment as scrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    InProgress,
    Repaired,
    Scrap,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Repaired => "repaired",
            RequestStatus::Scrap => "scrap",
        }
    }

    /// Open = still being worked (new or in progress)
    pub fn is_open(&self) -> bool {
        matches!(self, RequestStatus::New | RequestStatus::InProgress)
    }

    /// Closed = resolved one way or the other (repaired or scrapped)
    pub fn is_closed(&self) -> bool {
        matches!(self, RequestStatus::Repaired | RequestStatus::Scrap)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(RequestStatus::New),
            "in_progress" => Ok(RequestStatus::InProgress),
            "repaired" => Ok(RequestStatus::Repaired),
            "scrap" => Ok(RequestStatus::Scrap),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

macro_rules! string_enum_sqlx {
    ($ty:ty) => {
        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                let s: String = self.as_str().to_string();
                <String as Encode<Postgres>>::encode(s, buf)
            }
        }
    };
}

string_enum_sqlx!(RequestType);
string_enum_sqlx!(RequestPriority);
string_enum_sqlx!(RequestStatus);

/// Maintenance request row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    pub subject: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub priority: RequestPriority,
    pub equipment_id: i32,
    /// Owning team, derived from the equipment at creation time
    pub team_id: i32,
    pub status: RequestStatus,
    pub assigned_to: Option<i32>,
    /// Planned date for preventive maintenance
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Time spent completing the work, in hours
    pub duration_hours: Option<f64>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request enriched with referenced entities for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestDetails {
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub equipment: Option<EquipmentRef>,
    pub team: Option<TeamRef>,
    pub assigned_technician: Option<UserRef>,
    pub creator: Option<UserRef>,
}

/// Create request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    pub equipment_id: i32,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub priority: Option<RequestPriority>,
    pub scheduled_date: Option<DateTime<Utc>>,
}

/// Status change payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequestStatus {
    pub status: RequestStatus,
}

/// Assignment payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignTechnician {
    pub technician_id: i32,
}

/// Manager-only request detail patch
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRequest {
    pub subject: Option<String>,
    pub equipment_id: Option<i32>,
    pub priority: Option<RequestPriority>,
    pub scheduled_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            RequestStatus::New,
            RequestStatus::InProgress,
            RequestStatus::Repaired,
            RequestStatus::Scrap,
        ] {
            let parsed: RequestStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn open_and_closed_partition_the_statuses() {
        assert!(RequestStatus::New.is_open());
        assert!(RequestStatus::InProgress.is_open());
        assert!(RequestStatus::Repaired.is_closed());
        assert!(RequestStatus::Scrap.is_closed());
        for status in [
            RequestStatus::New,
            RequestStatus::InProgress,
            RequestStatus::Repaired,
            RequestStatus::Scrap,
        ] {
            assert_ne!(status.is_open(), status.is_closed());
        }
    }

    #[test]
    fn invalid_enum_values_are_rejected() {
        assert!("done".parse::<RequestStatus>().is_err());
        assert!("urgent".parse::<RequestPriority>().is_err());
        assert!("planned".parse::<RequestType>().is_err());
    }
}
