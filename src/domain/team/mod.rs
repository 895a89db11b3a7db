//! Team domain
//!
//! Teams are a standalone resource with no relationship to user identities.

mod entity;
mod repository;

pub use entity::{NewTeam, Team, TeamId};
pub use repository::TeamRepository;
