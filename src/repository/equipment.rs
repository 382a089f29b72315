//! Equipment repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    /// List all equipment
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, category_id, company, department, serial_number,
                used_by_employee, used_in_location, technician_id,
                maintenance_team_id, assigned_date, description, is_scrapped
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, FALSE)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category_id)
        .bind(&data.company)
        .bind(&data.department)
        .bind(&data.serial_number)
        .bind(&data.used_by_employee)
        .bind(&data.used_in_location)
        .bind(data.technician_id)
        .bind(data.maintenance_team_id)
        .bind(data.assigned_date)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment with a partial patch
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.category_id, "category_id");
        add_field!(data.company, "company");
        add_field!(data.department, "department");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.used_by_employee, "used_by_employee");
        add_field!(data.used_in_location, "used_in_location");
        add_field!(data.technician_id, "technician_id");
        add_field!(data.maintenance_team_id, "maintenance_team_id");
        add_field!(data.description, "description");
        add_field!(data.is_scrapped, "is_scrapped");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE equipment SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.category_id);
        bind_field!(data.company);
        bind_field!(data.department);
        bind_field!(data.serial_number);
        bind_field!(data.used_by_employee);
        bind_field!(data.used_in_location);
        bind_field!(data.technician_id);
        bind_field!(data.maintenance_team_id);
        bind_field!(data.description);
        bind_field!(data.is_scrapped);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    /// Count scrapped equipment items
    pub async fn count_scrapped(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE is_scrapped = TRUE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
