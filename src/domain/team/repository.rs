//! Team repository trait

use async_trait::async_trait;

use super::entity::{NewTeam, Team, TeamId};
use crate::domain::DomainError;

/// Repository for managing teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// List all teams ordered by id
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Insert a team, assigning its identifier
    async fn create(&self, team: NewTeam) -> Result<Team, DomainError>;

    /// Overwrite the country of a team, returning `None` when it does not exist
    async fn update_country(&self, id: TeamId, country: &str)
        -> Result<Option<Team>, DomainError>;

    /// Delete a team by ID, returning whether it existed
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;
}
