//! Infrastructure layer - Storage, security and service implementations

pub mod auth;
pub mod logging;
pub mod storage;
pub mod team;
pub mod user;
