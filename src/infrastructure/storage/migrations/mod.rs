//! Versioned schema migrations tracked in `_migrations`

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// One schema step; `up` and `down` are single statements
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

/// Schema steps in ascending version order
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Create users table",
        up: r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(64) PRIMARY KEY,
                email TEXT NOT NULL,
                normalized_email TEXT NOT NULL,
                username TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT users_normalized_email_key UNIQUE (normalized_email)
            )
        "#,
        down: "DROP TABLE IF EXISTS users",
    },
    Migration {
        version: 2,
        description: "Create teams table",
        up: r#"
            CREATE TABLE IF NOT EXISTS teams (
                id BIGSERIAL PRIMARY KEY,
                country TEXT NOT NULL,
                attributes JSONB NOT NULL DEFAULT '{}'::jsonb
            )
        "#,
        down: "DROP TABLE IF EXISTS teams",
    },
];

const CREATE_MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        version BIGINT PRIMARY KEY,
        description TEXT NOT NULL,
        installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

fn storage_error(action: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::storage(format!("Failed to {}: {}", action, e))
}

/// Applies and reverts `MIGRATIONS` against a Postgres pool
///
/// Each step runs in its own transaction together with its `_migrations` row.
#[derive(Debug, Clone)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Latest applied version, `None` on an empty schema
    pub async fn version(&self) -> Result<Option<i64>, DomainError> {
        sqlx::query(CREATE_MIGRATIONS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(storage_error("create migrations table"))?;

        sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("read migration version"))
    }

    /// Apply every step newer than the current version
    pub async fn run(&self) -> Result<(), DomainError> {
        let current = self.version().await?.unwrap_or(0);

        for migration in pending(current) {
            let mut tx = self.pool.begin().await.map_err(storage_error("begin migration"))?;

            sqlx::query(migration.up)
                .execute(&mut *tx)
                .await
                .map_err(storage_error(migration.description))?;
            sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2) ON CONFLICT (version) DO NOTHING")
                .bind(migration.version)
                .bind(migration.description)
                .execute(&mut *tx)
                .await
                .map_err(storage_error("record migration"))?;

            tx.commit().await.map_err(storage_error("commit migration"))?;
            info!(version = migration.version, description = migration.description, "Migration applied");
        }

        Ok(())
    }

    /// Undo the most recently applied step, if any
    pub async fn revert(&self) -> Result<(), DomainError> {
        let Some(current) = self.version().await? else {
            return Ok(());
        };

        let migration = MIGRATIONS
            .iter()
            .find(|m| m.version == current)
            .ok_or_else(|| {
                DomainError::storage(format!("Unknown applied migration version {}", current))
            })?;

        let mut tx = self.pool.begin().await.map_err(storage_error("begin revert"))?;

        sqlx::query(migration.down)
            .execute(&mut *tx)
            .await
            .map_err(storage_error(migration.description))?;
        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("remove migration record"))?;

        tx.commit().await.map_err(storage_error("commit revert"))?;
        info!(version = migration.version, description = migration.description, "Migration reverted");

        Ok(())
    }
}

fn pending(current: i64) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS.iter().filter(move |m| m.version > current)
}

/// Bring the schema up to date, used at startup
pub async fn run_storage_migrations(pool: &PgPool) -> Result<(), DomainError> {
    PostgresMigrator::new(pool.clone()).run().await
}
