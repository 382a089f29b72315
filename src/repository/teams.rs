//! Teams repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, Team, TeamWithCount, UpdateTeam},
};

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get team by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Team> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team with id {} not found", id)))
    }

    /// List all teams with their member counts
    pub async fn list_with_counts(&self) -> AppResult<Vec<TeamWithCount>> {
        let teams = sqlx::query_as::<_, TeamWithCount>(
            r#"
            SELECT t.*,
                   (SELECT COUNT(*) FROM users u WHERE u.team_id = t.id) AS member_count
            FROM teams t
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(teams)
    }

    /// List all teams
    pub async fn list(&self) -> AppResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>("SELECT * FROM teams ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(teams)
    }

    /// Create team
    pub async fn create(&self, data: &CreateTeam) -> AppResult<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(team)
    }

    /// Update team
    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<Team> {
        sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams SET name = $1, description = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team with id {} not found", id)))
    }
}
