//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::hash_map::{Entry, HashMap};
use tokio::sync::RwLock;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
///
/// Users are keyed by normalized email, so the uniqueness check and the
/// insert happen under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_email(&self, normalized_email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(normalized_email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        match users.entry(user.normalized_email()) {
            Entry::Occupied(_) => Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                user.email()
            ))),
            Entry::Vacant(slot) => Ok(slot.insert(user).clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;
    use std::sync::Arc;

    fn create_test_user(email: &str) -> User {
        User::new(UserId::generate(), email, "hashed_password")
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("Oscar@McLaren.com");

        repo.create(user.clone()).await.unwrap();

        let retrieved = repo.get_by_email("oscar@mclaren.com").await.unwrap();
        assert_eq!(retrieved.unwrap().id(), user.id());

        assert!(repo.get_by_email("nobody@mclaren.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_uniqueness_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        let first = create_test_user("george@williams.com");

        repo.create(first.clone()).await.unwrap();

        let result = repo.create(create_test_user("GEORGE@williams.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        let stored = repo.get_by_email("george@williams.com").await.unwrap().unwrap();
        assert_eq!(stored.id(), first.id());
    }

    #[tokio::test]
    async fn test_concurrent_creates_admit_one() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(create_test_user("race@track.com")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
    }
}
