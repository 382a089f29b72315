//! Team management service

use crate::{
    error::AppResult,
    models::{
        team::{CreateTeam, Team, TeamWithCount, UpdateTeam},
        user::{Role, User},
    },
    permissions::Capability,
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All teams with member counts; visible to any authenticated user
    pub async fn list(&self) -> AppResult<Vec<TeamWithCount>> {
        self.repository.teams.list_with_counts().await
    }

    pub async fn create(&self, actor: &User, data: CreateTeam) -> AppResult<Team> {
        actor.role.require(Capability::ManageTeams)?;
        self.repository.teams.create(&data).await
    }

    pub async fn update(&self, actor: &User, id: i32, data: UpdateTeam) -> AppResult<Team> {
        actor.role.require(Capability::ManageTeams)?;
        self.repository.teams.update(id, &data).await
    }

    /// Add a user to a team. A plain user is promoted to technician as part
    /// of joining.
    pub async fn add_member(&self, actor: &User, team_id: i32, user_id: i32) -> AppResult<()> {
        actor.role.require(Capability::ManageTeams)?;

        self.repository.teams.get_by_id(team_id).await?;
        let target = self.repository.users.get_by_id(user_id).await?;

        let promotion = if target.role == Role::User {
            Some(Role::Technician)
        } else {
            None
        };
        self.repository
            .users
            .set_team(user_id, Some(team_id), promotion)
            .await
    }

    /// Detach a user from their team; the role is kept
    pub async fn remove_member(&self, actor: &User, user_id: i32) -> AppResult<()> {
        actor.role.require(Capability::ManageTeams)?;
        self.repository.users.set_team(user_id, None, None).await
    }

    /// Members of a team
    pub async fn members(&self, team_id: i32) -> AppResult<Vec<User>> {
        self.repository.teams.get_by_id(team_id).await?;
        self.repository.users.list_by_team(team_id).await
    }
}
