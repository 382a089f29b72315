//! Equipment category service

use crate::{
    error::AppResult,
    models::{
        category::{CreateCategory, EquipmentCategory, UpdateCategory},
        user::User,
    },
    permissions::Capability,
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Visible to any authenticated user
    pub async fn list(&self) -> AppResult<Vec<EquipmentCategory>> {
        self.repository.categories.list().await
    }

    pub async fn create(&self, actor: &User, data: CreateCategory) -> AppResult<EquipmentCategory> {
        actor.role.require(Capability::ManageCategories)?;
        self.repository.categories.create(&data).await
    }

    pub async fn update(
        &self,
        actor: &User,
        id: i32,
        data: UpdateCategory,
    ) -> AppResult<EquipmentCategory> {
        actor.role.require(Capability::ManageCategories)?;
        self.repository.categories.update(id, &data).await
    }
}
