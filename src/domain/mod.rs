//! Domain layer - Core business logic and entities

pub mod auth;
pub mod error;
pub mod team;
pub mod user;

pub use auth::AuthError;
pub use error::DomainError;
pub use team::{NewTeam, Team, TeamId, TeamRepository};
pub use user::{User, UserId, UserRepository};
