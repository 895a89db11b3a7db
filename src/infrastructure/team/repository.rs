//! In-memory team repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::DomainError;

#[derive(Debug)]
struct TeamTable {
    next_id: i64,
    teams: BTreeMap<TeamId, Team>,
}

impl Default for TeamTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            teams: BTreeMap::new(),
        }
    }
}

/// In-memory implementation of TeamRepository
///
/// Identifiers start at 1 and are never reused, even after deletion.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    table: RwLock<TeamTable>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let table = self.table.read().await;
        Ok(table.teams.values().cloned().collect())
    }

    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let table = self.table.read().await;
        Ok(table.teams.get(&id).cloned())
    }

    async fn create(&self, team: NewTeam) -> Result<Team, DomainError> {
        let mut table = self.table.write().await;

        let id = TeamId::new(table.next_id);
        table.next_id += 1;

        let team = Team::new(id, team.without_reserved_fields());
        table.teams.insert(id, team.clone());

        Ok(team)
    }

    async fn update_country(
        &self,
        id: TeamId,
        country: &str,
    ) -> Result<Option<Team>, DomainError> {
        let mut table = self.table.write().await;

        Ok(table.teams.get_mut(&id).map(|team| {
            team.set_country(country);
            team.clone()
        }))
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.teams.remove(&id).is_some())
    }
}
