//! Business logic services

pub mod categories;
pub mod equipment;
pub mod notifications;
pub mod reports;
pub mod requests;
pub mod teams;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub teams: teams::TeamsService,
    pub categories: categories::CategoriesService,
    pub equipment: equipment::EquipmentService,
    pub requests: requests::RequestsService,
    pub notifications: notifications::NotificationsService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let notifications = notifications::NotificationsService::new(repository.clone());
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            teams: teams::TeamsService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone(), notifications.clone()),
            reports: reports::ReportsService::new(repository),
            notifications,
        }
    }
}
