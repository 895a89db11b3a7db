//! Authentication flow errors

use thiserror::Error;

/// Failures of the registration and login flows
///
/// The display strings are the messages returned to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The request failed structural validation
    #[error("Invalid request")]
    ValidationFailure(Vec<String>),

    #[error("Email already exist")]
    EmailAlreadyExists,

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid payload")]
    InvalidPayload,

    /// Any downstream failure; the underlying reason is not exposed
    #[error("Server error")]
    ServerError,
}

impl AuthError {
    /// User-facing error list for the response body
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::ValidationFailure(messages) if !messages.is_empty() => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
