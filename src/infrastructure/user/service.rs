//! Credential store: user creation, lookup, and password verification

use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::domain::user::{
    normalize_email, validate_password_strength, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Verified against when the email is unknown, so both login failures cost one hash check
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

/// User service backing registration and login
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    dummy_hash: OnceLock<String>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Create a new user whose username is its email
    ///
    /// Fails with `DomainError::Conflict` when the email is already registered
    /// and `DomainError::Validation` when the password violates the policy.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_password_strength(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(UserId::generate(), request.email.trim(), password_hash);

        debug!(user_id = %user.id(), "Creating user");

        self.repository.create(user).await
    }

    /// Look up a user by email, ignoring case and surrounding whitespace
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_email(&normalize_email(email)).await
    }

    /// Return the user only if the email exists and the password matches
    ///
    /// Exactly one hash verification runs whether or not the email is known.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        match self.find_by_email(email).await? {
            Some(user) if self.hasher.verify(password, user.password_hash()) => Ok(Some(user)),
            Some(_) => Ok(None),
            None => {
                self.hasher.verify(password, self.dummy_hash());
                Ok(None)
            }
        }
    }

    fn dummy_hash(&self) -> &str {
        self.dummy_hash
            .get_or_init(|| self.hasher.hash(DUMMY_PASSWORD).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    /// Plain-text hasher that counts verify calls
    #[derive(Debug, Default)]
    struct CountingHasher {
        verifies: AtomicUsize,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            hash == format!("hashed:{}", password)
        }
    }

    fn create_service() -> UserService<InMemoryUserRepository, Argon2Hasher> {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::new());
        UserService::new(repository, hasher)
    }

    fn make_request(email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = create_service();

        let user = service
            .create(make_request("fernando@aston.com", "Alonso#14"))
            .await
            .unwrap();

        assert_eq!(user.email(), "fernando@aston.com");
        assert_eq!(user.username(), "fernando@aston.com");
        assert_ne!(user.password_hash(), "Alonso#14");

        let stored = service.find_by_email("fernando@aston.com").await.unwrap();
        assert_eq!(stored.unwrap().id(), user.id());
    }

    #[tokio::test]
    async fn test_create_user_weak_password() {
        let service = create_service();

        let result = service.create(make_request("kimi@alfa.com", "short")).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(service.find_by_email("kimi@alfa.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let service = create_service();

        service
            .create(make_request("checo@redbull.com", "Perez#11a"))
            .await
            .unwrap();

        let result = service
            .create(make_request("Checo@RedBull.com", "Another#22b"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = create_service();

        service
            .create(make_request("yuki@rb.com", "Tsunoda#22"))
            .await
            .unwrap();

        let user = service.authenticate(" YUKI@rb.com ", "Tsunoda#22").await.unwrap();
        assert_eq!(user.unwrap().email(), "yuki@rb.com");

        let wrong = service.authenticate("yuki@rb.com", "tsunoda#22").await.unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn test_find_unknown_email() {
        let service = create_service();
        assert!(service.find_by_email("ghost@nowhere.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_verify_once_each() {
        let hasher = Arc::new(CountingHasher::default());
        let service = UserService::new(Arc::new(InMemoryUserRepository::new()), hasher.clone());

        service
            .create(make_request("lewis@ferrari.com", "Hamilton#44"))
            .await
            .unwrap();

        let unknown = service
            .authenticate("nobody@ferrari.com", "Hamilton#44")
            .await
            .unwrap();
        assert!(unknown.is_none());
        assert_eq!(hasher.verifies.load(Ordering::SeqCst), 1);

        let wrong = service
            .authenticate("lewis@ferrari.com", "Wrong#4444")
            .await
            .unwrap();
        assert!(wrong.is_none());
        assert_eq!(hasher.verifies.load(Ordering::SeqCst), 2);
    }
}
