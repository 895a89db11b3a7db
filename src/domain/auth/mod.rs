//! Authentication domain

mod error;

pub use error::AuthError;
