//! Authentication infrastructure module
//!
//! This module provides JWT issuance and the registration/login flows.

mod jwt;
mod service;

pub use jwt::{
    JwtClaims, JwtConfig, JwtService, TokenIssuer, MIN_SECRET_LENGTH, TOKEN_LIFETIME_SECS,
};
pub use service::{AuthService, Credentials};
