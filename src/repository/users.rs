//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by upstream identity provider id
    pub async fn get_by_auth_id(&self, auth_id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE auth_id = $1")
            .bind(auth_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Get user by email
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Provision a user on first sign-in. Idempotent: an existing auth_id is
    /// left untouched. The role is computed inside the INSERT so two racing
    /// first sign-ins serialize on the database: only the statement that
    /// actually observes an empty table gets the elevated role.
    pub async fn bootstrap(&self, auth_id: &str, email: &str, name: &str) -> AppResult<User> {
        sqlx::query(
            r#"
            INSERT INTO users (auth_id, name, email, role)
            SELECT $1, $2, $3,
                   CASE WHEN (SELECT COUNT(*) FROM users) = 0
                        THEN 'manager' ELSE 'user' END
            ON CONFLICT (auth_id) DO NOTHING
            "#,
        )
        .bind(auth_id)
        .bind(name)
        .bind(email)
        .execute(&self.pool)
        .await?;

        self.get_by_auth_id(auth_id)
            .await?
            .ok_or_else(|| AppError::Internal("Bootstrap insert did not persist".to_string()))
    }

    /// List every user
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// List users holding a given role
    pub async fn list_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = $1 ORDER BY name",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// List users who may be assigned to requests (technicians and managers)
    pub async fn list_assignable(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role IN ('technician', 'manager') ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// List users who can be added to a team: plain users (promoted on add)
    /// and technicians without a team
    pub async fn list_promotable(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE role = 'user' OR (role = 'technician' AND team_id IS NULL)
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// List members of a team
    pub async fn list_by_team(&self, team_id: i32) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE team_id = $1 ORDER BY name",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Change a user's role
    pub async fn set_role(&self, id: i32, role: Role) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
            .bind(role)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }

    /// Move a user onto a team, optionally promoting them in the same write
    pub async fn set_team(&self, id: i32, team_id: Option<i32>, role: Option<Role>) -> AppResult<()> {
        let result = if let Some(role) = role {
            sqlx::query("UPDATE users SET team_id = $1, role = $2 WHERE id = $3")
                .bind(team_id)
                .bind(role)
                .bind(id)
                .execute(&self.pool)
                .await?
        } else {
            sqlx::query("UPDATE users SET team_id = $1 WHERE id = $2")
                .bind(team_id)
                .bind(id)
                .execute(&self.pool)
                .await?
        };
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }

    /// Total number of provisioned users
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
