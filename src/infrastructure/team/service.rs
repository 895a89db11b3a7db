//! Team service for team management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// Team service for managing teams
#[derive(Debug)]
pub struct TeamService<R: TeamRepository> {
    repository: Arc<R>,
}

impl<R: TeamRepository> TeamService<R> {
    /// Create a new team service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List all teams
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.repository.list().await
    }

    /// Get a team by ID
    pub async fn get(&self, id: TeamId) -> Result<Team, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| invalid_id(id))
    }

    /// Create a team; any client-supplied identifier is discarded
    pub async fn create(&self, team: NewTeam) -> Result<Team, DomainError> {
        let team = self.repository.create(team).await?;
        info!(id = %team.id(), country = %team.country(), "Created team");
        Ok(team)
    }

    /// Overwrite the country of an existing team
    pub async fn update_country(&self, id: TeamId, country: &str) -> Result<Team, DomainError> {
        info!(id = %id, country = %country, "Updating team country");

        self.repository
            .update_country(id, country)
            .await?
            .ok_or_else(|| invalid_id(id))
    }

    /// Delete a team
    pub async fn delete(&self, id: TeamId) -> Result<(), DomainError> {
        info!(id = %id, "Deleting team");

        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(invalid_id(id))
        }
    }

    /// Round-trip to the store, used by readiness checks
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.list().await.map(|teams| {
            debug!(count = teams.len(), "Team store reachable");
        })
    }
}

fn invalid_id(id: TeamId) -> DomainError {
    DomainError::invalid_id(format!("Team '{}' not found", id))
}
