//! Equipment categories repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{CreateCategory, EquipmentCategory, UpdateCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>(
            "SELECT * FROM equipment_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// List all categories
    pub async fn list(&self) -> AppResult<Vec<EquipmentCategory>> {
        let categories = sqlx::query_as::<_, EquipmentCategory>(
            "SELECT * FROM equipment_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Create category
    pub async fn create(&self, data: &CreateCategory) -> AppResult<EquipmentCategory> {
        let category = sqlx::query_as::<_, EquipmentCategory>(
            r#"
            INSERT INTO equipment_categories (name, company, responsible_user_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.company)
        .bind(data.responsible_user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    /// Update category
    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>(
            r#"
            UPDATE equipment_categories
            SET name = $1, company = $2, responsible_user_id = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.company)
        .bind(data.responsible_user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }
}
