//! User validation utilities

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("User ID cannot contain whitespace")]
    IdContainsWhitespace,

    #[error("The Email field is required.")]
    EmailRequired,

    #[error("The Email field is not a valid e-mail address.")]
    InvalidEmail,

    #[error("The Password field is required.")]
    PasswordRequired,

    #[error("Passwords must be at least {0} characters.")]
    PasswordTooShort(usize),

    #[error("Passwords must have at least one digit ('0'-'9').")]
    PasswordRequiresDigit,

    #[error("Passwords must have at least one lowercase ('a'-'z').")]
    PasswordRequiresLower,

    #[error("Passwords must have at least one uppercase ('A'-'Z').")]
    PasswordRequiresUpper,

    #[error("Passwords must have at least one non alphanumeric character.")]
    PasswordRequiresNonAlphanumeric,
}

const MAX_USER_ID_LENGTH: usize = 64;
const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a user ID
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.trim().is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    if id.chars().any(char::is_whitespace) {
        return Err(UserValidationError::IdContainsWhitespace);
    }

    Ok(())
}

/// Validate that an email is present and well formed
pub fn validate_email(email: Option<&str>) -> Result<(), UserValidationError> {
    let email = match email.map(str::trim) {
        Some(e) if !e.is_empty() => e,
        _ => return Err(UserValidationError::EmailRequired),
    };

    if !email.validate_email() {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate that a password is present
///
/// Strength is a credential store concern, see [`validate_password_strength`].
pub fn validate_password(password: Option<&str>) -> Result<(), UserValidationError> {
    match password {
        Some(p) if !p.is_empty() => Ok(()),
        _ => Err(UserValidationError::PasswordRequired),
    }
}

/// Validate a password against the credential store policy
///
/// Rules:
/// - Minimum 6 characters
/// - At least one digit, one lowercase and one uppercase ASCII letter
/// - At least one character outside `[A-Za-z0-9]`, so `é` or `ß` also counts
pub fn validate_password_strength(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(UserValidationError::PasswordRequiresDigit);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(UserValidationError::PasswordRequiresLower);
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(UserValidationError::PasswordRequiresUpper);
    }

    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(UserValidationError::PasswordRequiresNonAlphanumeric);
    }

    Ok(())
}

/// Canonical form of an email used for uniqueness and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
