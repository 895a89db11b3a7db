//! Application state for shared services

use std::sync::Arc;

use crate::domain::team::TeamRepository;
use crate::domain::user::UserRepository;
use crate::domain::{AuthError, DomainError, NewTeam, Team, TeamId};
use crate::infrastructure::auth::{AuthService, Credentials};
use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::PasswordHasher;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
    pub team_service: Arc<dyn TeamServiceTrait>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        auth_service: Arc<dyn AuthServiceTrait>,
        team_service: Arc<dyn TeamServiceTrait>,
    ) -> Self {
        Self {
            auth_service,
            team_service,
        }
    }
}

/// Trait for the registration and login flows
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn register(&self, credentials: &Credentials) -> Result<String, AuthError>;
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError>;
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
    async fn get(&self, id: TeamId) -> Result<Team, DomainError>;
    async fn create(&self, team: NewTeam) -> Result<Team, DomainError>;
    async fn update_country(&self, id: TeamId, country: &str) -> Result<Team, DomainError>;
    async fn delete(&self, id: TeamId) -> Result<(), DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> AuthServiceTrait for AuthService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, credentials: &Credentials) -> Result<String, AuthError> {
        AuthService::register(self, credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        AuthService::login(self, credentials).await
    }
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamServiceTrait for TeamService<R> {
    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self).await
    }

    async fn get(&self, id: TeamId) -> Result<Team, DomainError> {
        TeamService::get(self, id).await
    }

    async fn create(&self, team: NewTeam) -> Result<Team, DomainError> {
        TeamService::create(self, team).await
    }

    async fn update_country(&self, id: TeamId, country: &str) -> Result<Team, DomainError> {
        TeamService::update_country(self, id, country).await
    }

    async fn delete(&self, id: TeamId) -> Result<(), DomainError> {
        TeamService::delete(self, id).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        TeamService::ping(self).await
    }
}
