//! Role-based capability gate.
//!
//! Every mutation and gated query consults this matrix before acting;
//! failing the check aborts the operation with an authorization error and
//! no partial effect.

use crate::error::AppError;
use crate::models::user::Role;

/// Closed set of capabilities a role can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageEquipment,
    ManageTeams,
    ManageCategories,
    AssignRequest,
    UpdateStatus,
    ViewAllRequests,
    ViewCalendar,
    ViewReports,
    CreatePreventive,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageEquipment => "manage_equipment",
            Capability::ManageTeams => "manage_teams",
            Capability::ManageCategories => "manage_categories",
            Capability::AssignRequest => "assign_request",
            Capability::UpdateStatus => "update_status",
            Capability::ViewAllRequests => "view_all_requests",
            Capability::ViewCalendar => "view_calendar",
            Capability::ViewReports => "view_reports",
            Capability::CreatePreventive => "create_preventive",
        }
    }
}

impl Role {
    /// Pure capability check
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageEquipment
            | Capability::ManageTeams
            | Capability::ManageCategories
            | Capability::ViewReports => matches!(self, Role::Manager),
            Capability::AssignRequest
            | Capability::UpdateStatus
            | Capability::ViewAllRequests
            | Capability::ViewCalendar
            | Capability::CreatePreventive => {
                matches!(self, Role::Technician | Role::Manager)
            }
        }
    }

    /// Gate helper: error out unless the role holds the capability
    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.allows(capability) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Role {} lacks capability {}",
                self.as_str(),
                capability.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CAPABILITIES: [Capability; 9] = [
        Capability::ManageEquipment,
        Capability::ManageTeams,
        Capability::ManageCategories,
        Capability::AssignRequest,
        Capability::UpdateStatus,
        Capability::ViewAllRequests,
        Capability::ViewCalendar,
        Capability::ViewReports,
        Capability::CreatePreventive,
    ];

    #[test]
    fn managers_hold_every_capability() {
        for capability in ALL_CAPABILITIES {
            assert!(Role::Manager.allows(capability), "{:?}", capability);
            assert!(Role::Manager.require(capability).is_ok());
        }
    }

    #[test]
    fn plain_users_hold_no_capability() {
        for capability in ALL_CAPABILITIES {
            assert!(!Role::User.allows(capability), "{:?}", capability);
            assert!(Role::User.require(capability).is_err());
        }
    }

    #[test]
    fn technician_matrix() {
        let allowed = [
            Capability::AssignRequest,
            Capability::UpdateStatus,
            Capability::ViewAllRequests,
            Capability::ViewCalendar,
            Capability::CreatePreventive,
        ];
        let denied = [
            Capability::ManageEquipment,
            Capability::ManageTeams,
            Capability::ManageCategories,
            Capability::ViewReports,
        ];
        for capability in allowed {
            assert!(Role::Technician.allows(capability), "{:?}", capability);
        }
        for capability in denied {
            assert!(!Role::Technician.allows(capability), "{:?}", capability);
        }
    }

    #[test]
    fn require_reports_the_capability_name() {
        let err = Role::User.require(Capability::ViewReports).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("view_reports"), "{}", msg);
        assert!(msg.contains("user"), "{}", msg);
    }
}
