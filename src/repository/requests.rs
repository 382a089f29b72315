//! Maintenance requests repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::EquipmentRef,
        request::{
            MaintenanceRequest, RequestDetails, RequestPriority, RequestStatus, RequestType,
        },
        team::TeamRef,
        user::UserRef,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT r.*,
           e.name  AS equipment_name,
           t.name  AS team_name,
           a.name  AS assignee_name, a.email AS assignee_email,
           c.name  AS creator_name,  c.email AS creator_email
    FROM maintenance_requests r
    LEFT JOIN equipment e ON r.equipment_id = e.id
    LEFT JOIN teams t     ON r.team_id = t.id
    LEFT JOIN users a     ON r.assigned_to = a.id
    LEFT JOIN users c     ON r.created_by = c.id
"#;

fn details_from_row(row: &PgRow) -> Result<RequestDetails, sqlx::Error> {
    let request = MaintenanceRequest {
        id: row.try_get("id")?,
        subject: row.try_get("subject")?,
        request_type: row.try_get("request_type")?,
        priority: row.try_get("priority")?,
        equipment_id: row.try_get("equipment_id")?,
        team_id: row.try_get("team_id")?,
        status: row.try_get("status")?,
        assigned_to: row.try_get("assigned_to")?,
        scheduled_date: row.try_get("scheduled_date")?,
        duration_hours: row.try_get("duration_hours")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };

    let equipment = row
        .try_get::<Option<String>, _>("equipment_name")?
        .map(|name| EquipmentRef {
            id: request.equipment_id,
            name,
        });
    let team = row
        .try_get::<Option<String>, _>("team_name")?
        .map(|name| TeamRef {
            id: request.team_id,
            name,
        });
    let assigned_technician = match (request.assigned_to, row.try_get::<Option<String>, _>("assignee_name")?) {
        (Some(id), Some(name)) => Some(UserRef {
            id,
            name,
            email: row.try_get::<Option<String>, _>("assignee_email")?.unwrap_or_default(),
        }),
        _ => None,
    };
    let creator = row
        .try_get::<Option<String>, _>("creator_name")?
        .map(|name| -> Result<UserRef, sqlx::Error> {
            Ok(UserRef {
                id: request.created_by,
                name,
                email: row.try_get::<Option<String>, _>("creator_email")?.unwrap_or_default(),
            })
        })
        .transpose()?;

    Ok(RequestDetails {
        request,
        equipment,
        team,
        assigned_technician,
        creator,
    })
}

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// Insert a new request
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        subject: &str,
        request_type: RequestType,
        priority: RequestPriority,
        equipment_id: i32,
        team_id: i32,
        scheduled_date: Option<DateTime<Utc>>,
        created_by: i32,
    ) -> AppResult<MaintenanceRequest> {
        let now = Utc::now();
        let request = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (
                subject, request_type, priority, equipment_id, team_id,
                status, scheduled_date, created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, 'new', $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(subject)
        .bind(request_type)
        .bind(priority)
        .bind(equipment_id)
        .bind(team_id)
        .bind(scheduled_date)
        .bind(created_by)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    /// Every request, plain rows, for report aggregation
    pub async fn list_all(&self) -> AppResult<Vec<MaintenanceRequest>> {
        let requests = sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Every request enriched with its referenced entities, newest first
    pub async fn list_all_details(&self) -> AppResult<Vec<RequestDetails>> {
        let query = format!("{} ORDER BY r.created_at DESC", DETAILS_SELECT);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            result.push(details_from_row(row)?);
        }
        Ok(result)
    }

    /// Requests created by one user, enriched, newest first
    pub async fn list_details_by_creator(&self, user_id: i32) -> AppResult<Vec<RequestDetails>> {
        let query = format!(
            "{} WHERE r.created_by = $1 ORDER BY r.created_at DESC",
            DETAILS_SELECT
        );
        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            result.push(details_from_row(row)?);
        }
        Ok(result)
    }

    /// Single request, enriched
    pub async fn get_details(&self, id: i32) -> AppResult<RequestDetails> {
        let query = format!("{} WHERE r.id = $1", DETAILS_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))?;
        Ok(details_from_row(&row)?)
    }

    /// Preventive requests scheduled inside a window, optionally limited to a team
    pub async fn list_scheduled(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        team_id: Option<i32>,
    ) -> AppResult<Vec<RequestDetails>> {
        let mut query = format!(
            r#"{} WHERE r.request_type = 'preventive'
               AND r.scheduled_date IS NOT NULL
               AND r.scheduled_date >= $1 AND r.scheduled_date <= $2"#,
            DETAILS_SELECT
        );
        if team_id.is_some() {
            query.push_str(" AND r.team_id = $3");
        }
        query.push_str(" ORDER BY r.scheduled_date");

        let mut builder = sqlx::query(&query).bind(start).bind(end);
        if let Some(team_id) = team_id {
            builder = builder.bind(team_id);
        }
        let rows = builder.fetch_all(&self.pool).await?;
        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            result.push(details_from_row(row)?);
        }
        Ok(result)
    }

    /// Set the status, bumping updated_at
    pub async fn set_status(&self, id: i32, status: RequestStatus) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE maintenance_requests SET status = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Request with id {} not found", id)));
        }
        Ok(())
    }

    /// Set the assignee, bumping updated_at
    pub async fn set_assignee(&self, id: i32, technician_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE maintenance_requests SET assigned_to = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(technician_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Request with id {} not found", id)));
        }
        Ok(())
    }

    /// Apply a manager patch. When the equipment changes the caller passes
    /// the recomputed owning team alongside it.
    pub async fn patch(
        &self,
        id: i32,
        subject: Option<&str>,
        priority: Option<RequestPriority>,
        scheduled_date: Option<DateTime<Utc>>,
        equipment_and_team: Option<(i32, i32)>,
    ) -> AppResult<MaintenanceRequest> {
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(subject, "subject");
        add_field!(priority, "priority");
        add_field!(scheduled_date, "scheduled_date");
        if equipment_and_team.is_some() {
            sets.push(format!("equipment_id = ${}", idx));
            idx += 1;
            sets.push(format!("team_id = ${}", idx));
            idx += 1;
        }

        let query = format!(
            "UPDATE maintenance_requests SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&query).bind(Utc::now());
        if let Some(subject) = subject {
            builder = builder.bind(subject);
        }
        if let Some(priority) = priority {
            builder = builder.bind(priority);
        }
        if let Some(scheduled_date) = scheduled_date {
            builder = builder.bind(scheduled_date);
        }
        if let Some((equipment_id, team_id)) = equipment_and_team {
            builder = builder.bind(equipment_id).bind(team_id);
        }

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// Scrap a request and its equipment in one transaction: the request
    /// moves to status `scrap` and the equipment's one-way flag is set, or
    /// neither write happens.
    pub async fn scrap(&self, id: i32, equipment_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE maintenance_requests SET status = 'scrap', updated_at = $1 WHERE id = $2",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Request with id {} not found", id)));
        }

        let updated = sqlx::query("UPDATE equipment SET is_scrapped = TRUE WHERE id = $1")
            .bind(equipment_id)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Equipment with id {} not found",
                equipment_id
            )));
        }

        tx.commit().await?;
        Ok(())
    }
}
