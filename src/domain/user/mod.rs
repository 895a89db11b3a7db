//! User domain
//!
//! This module provides domain types and traits for user identities,
//! including the entity, validation rules, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{
    normalize_email, validate_email, validate_password, validate_password_strength,
    validate_user_id, UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;
