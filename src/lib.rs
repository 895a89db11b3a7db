//! FormulaOne API
//!
//! An HTTP backend providing:
//! - User registration and login with HS256 JWT issuance
//! - CRUD endpoints for the Team resource
//! - In-memory or PostgreSQL persistence

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::info;

use api::state::{AppState, AuthServiceTrait, TeamServiceTrait};
use infrastructure::{
    auth::{AuthService, JwtConfig, JwtService, TokenIssuer},
    storage::{run_storage_migrations, PostgresConfig, StorageType},
    team::{InMemoryTeamRepository, PostgresTeamRepository, TeamService},
    user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService},
};

/// Create the application state with default configuration
///
/// Fails unless a signing secret is supplied through `APP__AUTH__JWT_SECRET`.
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::load()?).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let token_issuer = create_token_issuer(config)?;

    let storage_backend = StorageType::from_str(&config.storage.backend)
        .ok_or_else(|| anyhow!("Unknown storage backend '{}'", config.storage.backend))?;

    info!("Storage backend: {:?}", storage_backend);

    match storage_backend {
        StorageType::InMemory => Ok(create_in_memory_state(token_issuer)),
        StorageType::Postgres => {
            let pool = connect_postgres(config).await?;
            run_storage_migrations(&pool).await?;

            Ok(create_postgres_state(pool, token_issuer))
        }
    }
}

/// Build state backed entirely by in-memory repositories
pub fn create_in_memory_state(token_issuer: Arc<dyn TokenIssuer>) -> AppState {
    info!("Using in-memory storage");

    let users = Arc::new(UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2Hasher::new()),
    ));
    let auth_service: Arc<dyn AuthServiceTrait> = Arc::new(AuthService::new(users, token_issuer));
    let team_service: Arc<dyn TeamServiceTrait> =
        Arc::new(TeamService::new(Arc::new(InMemoryTeamRepository::new())));

    AppState::new(auth_service, team_service)
}

/// Build state backed by PostgreSQL repositories sharing one pool
pub fn create_postgres_state(pool: PgPool, token_issuer: Arc<dyn TokenIssuer>) -> AppState {
    info!("Using PostgreSQL storage");

    let users = Arc::new(UserService::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(Argon2Hasher::new()),
    ));
    let auth_service: Arc<dyn AuthServiceTrait> = Arc::new(AuthService::new(users, token_issuer));
    let team_service: Arc<dyn TeamServiceTrait> =
        Arc::new(TeamService::new(Arc::new(PostgresTeamRepository::new(pool))));

    AppState::new(auth_service, team_service)
}

/// Open the PostgreSQL pool described by the storage configuration
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<PgPool> {
    let database_url = config.storage.resolve_database_url().ok_or_else(|| {
        anyhow!("storage.database_url or DATABASE_URL is required for the postgres backend")
    })?;

    info!("Connecting to PostgreSQL...");
    let pool = PostgresConfig::new(database_url)
        .with_max_connections(config.storage.max_connections)
        .connect()
        .await?;

    Ok(pool)
}

/// Create the token issuer from the configured signing secret
fn create_token_issuer(config: &AppConfig) -> anyhow::Result<Arc<dyn TokenIssuer>> {
    let service = JwtService::new(JwtConfig::new(config.auth.jwt_secret.clone()))?;
    Ok(Arc::new(service))
}
