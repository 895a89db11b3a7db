//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for user storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by normalized email
    async fn get_by_email(&self, normalized_email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a user, failing with `DomainError::Conflict` when the email is taken
    ///
    /// The uniqueness check and the insert happen as one operation.
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
