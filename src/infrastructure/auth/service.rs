//! Registration and login flows

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::user::{validate_email, validate_password, UserRepository};
use crate::domain::{AuthError, DomainError};
use crate::infrastructure::user::{CreateUserRequest, PasswordHasher, UserService};

use super::jwt::TokenIssuer;

/// Email and password as submitted, before structural validation
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Check presence and format, returning every failing rule
    fn validate(&self) -> Result<(&str, &str), AuthError> {
        let mut messages = Vec::new();

        if let Err(e) = validate_email(self.email.as_deref()) {
            messages.push(e.to_string());
        }

        if let Err(e) = validate_password(self.password.as_deref()) {
            messages.push(e.to_string());
        }

        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if messages.is_empty() => Ok((email, password)),
            _ => Err(AuthError::ValidationFailure(messages)),
        }
    }
}

/// Orchestrates the credential store and the token issuer
#[derive(Debug)]
pub struct AuthService<R: UserRepository, H: PasswordHasher> {
    users: Arc<UserService<R, H>>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<R: UserRepository, H: PasswordHasher> AuthService<R, H> {
    pub fn new(users: Arc<UserService<R, H>>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    /// Register a new identity and return a token for it
    ///
    /// A known email is rejected before the password policy runs. The store's
    /// atomic uniqueness check still settles concurrent registrations; any
    /// other store failure collapses into `ServerError`.
    pub async fn register(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let (email, password) = credentials.validate()?;

        if self
            .users
            .find_by_email(email)
            .await
            .map_err(log_server_error)?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists);
        }

        let request = CreateUserRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let user = match self.users.create(request).await {
            Ok(user) => user,
            Err(e) if e.is_conflict() => return Err(AuthError::EmailAlreadyExists),
            Err(e) => {
                warn!(error = %e, "User creation failed");
                return Err(AuthError::ServerError);
            }
        };

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id(), "User registered");

        Ok(token)
    }

    /// Authenticate an identity and return a fresh token
    ///
    /// Unknown email and wrong password yield the same `InvalidPayload`.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let (email, password) = credentials.validate()?;

        let user = self
            .users
            .authenticate(email, password)
            .await
            .map_err(log_server_error)?
            .ok_or(AuthError::InvalidPayload)?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id(), "User logged in");

        Ok(token)
    }

    fn issue_token(&self, user: &crate::domain::User) -> Result<String, AuthError> {
        self.tokens.issue(user).map_err(log_server_error)
    }
}

fn log_server_error(e: DomainError) -> AuthError {
    warn!(error = %e, "Authentication dependency failed");
    AuthError::ServerError
}
