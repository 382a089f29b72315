//! Equipment service

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        user::User,
    },
    permissions::Capability,
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Visible to any authenticated user
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, actor: &User, data: CreateEquipment) -> AppResult<Equipment> {
        actor.role.require(Capability::ManageEquipment)?;
        self.repository.teams.get_by_id(data.maintenance_team_id).await?;
        self.repository.categories.get_by_id(data.category_id).await?;
        self.repository.equipment.create(&data).await
    }

    /// Patch equipment. `is_scrapped` is a one-way flag: a manager may set
    /// it, but never clear it again.
    pub async fn update(&self, actor: &User, id: i32, data: UpdateEquipment) -> AppResult<Equipment> {
        actor.role.require(Capability::ManageEquipment)?;

        let current = self.repository.equipment.get_by_id(id).await?;
        if current.is_scrapped && data.is_scrapped == Some(false) {
            return Err(AppError::Validation(
                "Scrapped equipment cannot be unscrapped".to_string(),
            ));
        }
        if let Some(team_id) = data.maintenance_team_id {
            self.repository.teams.get_by_id(team_id).await?;
        }
        if let Some(category_id) = data.category_id {
            self.repository.categories.get_by_id(category_id).await?;
        }

        self.repository.equipment.update(id, &data).await
    }
}
