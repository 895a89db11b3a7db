//! PostgreSQL team repository implementation

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of TeamRepository
///
/// Identifiers come from the `BIGSERIAL` sequence; extra fields are stored
/// in a `JSONB` column.
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query("SELECT id, country, attributes FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, country, attributes FROM teams WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn create(&self, team: NewTeam) -> Result<Team, DomainError> {
        let team = team.without_reserved_fields();

        let row = sqlx::query(
            r#"
            INSERT INTO teams (country, attributes)
            VALUES ($1, $2)
            RETURNING id, country, attributes
            "#,
        )
        .bind(team.country())
        .bind(Json(team.attributes()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create team: {}", e)))?;

        row_to_team(&row)
    }

    async fn update_country(
        &self,
        id: TeamId,
        country: &str,
    ) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE teams SET country = $2
            WHERE id = $1
            RETURNING id, country, attributes
            "#,
        )
        .bind(id.value())
        .bind(country)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let column_error = |e: sqlx::Error| DomainError::storage(format!("Invalid team row: {}", e));

    let id: i64 = row.try_get("id").map_err(column_error)?;
    let country: String = row.try_get("country").map_err(column_error)?;
    let Json(attributes): Json<Map<String, Value>> =
        row.try_get("attributes").map_err(column_error)?;

    Ok(Team::new(TeamId::new(id), NewTeam::new(country, attributes)))
}
