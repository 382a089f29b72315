//! Maintenance request lifecycle.
//!
//! Statuses run new → in_progress → repaired with scrap reachable from
//! anywhere, but the transition table is permissive: any status may be set
//! from any other by an actor holding `update_status`. Scrapping is the one
//! transition with a side effect: the equipment's one-way flag is set in
//! the same transaction.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::Equipment,
        request::{
            AssignTechnician, CreateRequest, MaintenanceRequest, RequestDetails,
            RequestPriority, RequestStatus, RequestType, UpdateRequest,
        },
        user::{Role, User},
    },
    permissions::Capability,
    repository::Repository,
    services::notifications::{NotificationsService, RequestEvent},
};

/// Derive the owning team for a request from its equipment. Requests always
/// route to the equipment's maintenance team; there is no fallback.
pub fn resolve_team(equipment: &Equipment) -> i32 {
    equipment.maintenance_team_id
}

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    notifications: NotificationsService,
}

impl RequestsService {
    pub fn new(repository: Repository, notifications: NotificationsService) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    /// Create a maintenance request. Any authenticated user may file a
    /// corrective request; preventive requests need `create_preventive`.
    /// Scrapped equipment never accepts new requests.
    pub async fn create(&self, actor: &User, data: CreateRequest) -> AppResult<MaintenanceRequest> {
        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;

        if equipment.is_scrapped {
            return Err(AppError::BusinessRule(
                "Cannot create maintenance request for scrapped equipment".to_string(),
            ));
        }

        if data.request_type != RequestType::Corrective {
            actor.role.require(Capability::CreatePreventive)?;
        }

        let request = self
            .repository
            .requests
            .create(
                &data.subject,
                data.request_type,
                data.priority.unwrap_or(RequestPriority::Medium),
                equipment.id,
                resolve_team(&equipment),
                data.scheduled_date,
                actor.id,
            )
            .await?;

        self.notifications.dispatch(RequestEvent::Created {
            request_id: request.id,
            subject: request.subject.clone(),
        });

        Ok(request)
    }

    /// Change a request's status. Same-value transitions are accepted; the
    /// UI is responsible for hiding no-op choices.
    pub async fn update_status(
        &self,
        actor: &User,
        request_id: i32,
        status: RequestStatus,
    ) -> AppResult<()> {
        actor.role.require(Capability::UpdateStatus)?;

        let request = self.repository.requests.get_by_id(request_id).await?;
        self.repository.requests.set_status(request_id, status).await?;

        self.notifications.dispatch(RequestEvent::StatusChanged {
            request_id,
            created_by: request.created_by,
            status,
        });

        Ok(())
    }

    /// Assign a request to a technician or manager. Team membership of the
    /// assignee is not checked.
    pub async fn assign_technician(
        &self,
        actor: &User,
        request_id: i32,
        data: AssignTechnician,
    ) -> AppResult<()> {
        actor.role.require(Capability::AssignRequest)?;

        let request = self.repository.requests.get_by_id(request_id).await?;
        let assignee = self.repository.users.get_by_id(data.technician_id).await?;
        assignee.require_assignable()?;

        self.repository
            .requests
            .set_assignee(request_id, assignee.id)
            .await?;

        self.notifications.dispatch(RequestEvent::Assigned {
            request_id,
            subject: request.subject,
            technician_id: assignee.id,
        });

        Ok(())
    }

    /// Patch request details. Moving the request to different equipment
    /// re-derives the owning team from that equipment.
    pub async fn update_request(
        &self,
        actor: &User,
        request_id: i32,
        data: UpdateRequest,
    ) -> AppResult<MaintenanceRequest> {
        actor.role.require(Capability::ManageEquipment)?;

        self.repository.requests.get_by_id(request_id).await?;

        let equipment_and_team = match data.equipment_id {
            Some(equipment_id) => {
                let equipment = self.repository.equipment.get_by_id(equipment_id).await?;
                Some((equipment.id, resolve_team(&equipment)))
            }
            None => None,
        };

        self.repository
            .requests
            .patch(
                request_id,
                data.subject.as_deref(),
                data.priority,
                data.scheduled_date,
                equipment_and_team,
            )
            .await
    }

    /// Close a request as scrap and retire its equipment. Both writes run
    /// in one transaction; afterwards the equipment can never accept a new
    /// request.
    pub async fn scrap_equipment(&self, actor: &User, request_id: i32) -> AppResult<()> {
        actor.role.require(Capability::ManageEquipment)?;

        let request = self.repository.requests.get_by_id(request_id).await?;
        self.repository
            .requests
            .scrap(request_id, request.equipment_id)
            .await
    }

    /// Requests created by the calling user, enriched, newest first
    pub async fn list_mine(&self, actor: &User) -> AppResult<Vec<RequestDetails>> {
        self.repository.requests.list_details_by_creator(actor.id).await
    }

    /// Every request, enriched, newest first
    pub async fn list_all(&self, actor: &User) -> AppResult<Vec<RequestDetails>> {
        actor.role.require(Capability::ViewAllRequests)?;
        self.repository.requests.list_all_details().await
    }

    /// Single enriched request. Plain users may only see their own.
    pub async fn get_details(&self, actor: &User, request_id: i32) -> AppResult<RequestDetails> {
        let details = self.repository.requests.get_details(request_id).await?;
        if actor.role == Role::User && details.request.created_by != actor.id {
            return Err(AppError::Authorization(
                "You can only view your own requests".to_string(),
            ));
        }
        Ok(details)
    }

    /// Preventive maintenance scheduled inside a window, for the calendar.
    /// Technicians with a team see only their team's requests.
    pub async fn scheduled_maintenance(
        &self,
        actor: &User,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RequestDetails>> {
        actor.role.require(Capability::ViewCalendar)?;

        let team_filter = match (actor.role, actor.team_id) {
            (Role::Technician, Some(team_id)) => Some(team_id),
            _ => None,
        };

        self.repository
            .requests
            .list_scheduled(start, end, team_filter)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn equipment(team_id: i32) -> Equipment {
        Equipment {
            id: 1,
            name: "Samsung Monitor 15\"".into(),
            category_id: 1,
            company: "My Company (San Francisco)".into(),
            department: "IT".into(),
            serial_number: None,
            used_by_employee: None,
            used_in_location: None,
            technician_id: None,
            maintenance_team_id: team_id,
            assigned_date: None,
            description: None,
            is_scrapped: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn team_routing_is_the_equipment_maintenance_team() {
        assert_eq!(resolve_team(&equipment(4)), 4);
        assert_eq!(resolve_team(&equipment(9)), 9);
    }
}
