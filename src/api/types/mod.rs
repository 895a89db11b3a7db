//! HTTP request/response types shared across endpoints

pub mod error;
pub mod json;

pub use error::ApiError;
pub use json::Json;
