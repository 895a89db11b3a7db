//! Authentication API endpoints
//!
//! Registration and login, both answering with an `AuthResult` body that
//! carries either a freshly issued token or the list of error messages.

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::AuthError;
use crate::infrastructure::auth::Credentials;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/Register", post(register))
        .route("/Login", post(login))
}

/// Registration and login request
///
/// Both fields are optional at the JSON level so that absent values reach
/// validation and are reported in the error list.
#[derive(Debug, Default, Deserialize)]
pub struct AuthRequest {
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(default, alias = "Password")]
    pub password: Option<String>,
}

impl From<AuthRequest> for Credentials {
    fn from(request: AuthRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
        }
    }
}

/// Outcome of a registration or login attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl AuthResult {
    pub fn success(token: String) -> Self {
        Self {
            result: true,
            token: Some(token),
            errors: None,
        }
    }

    pub fn failure(error: &AuthError) -> Self {
        Self {
            result: false,
            token: None,
            errors: Some(error.messages()),
        }
    }
}

type AuthResponse = (StatusCode, Json<AuthResult>);

fn respond(outcome: Result<String, AuthError>) -> AuthResponse {
    match outcome {
        Ok(token) => (StatusCode::OK, Json(AuthResult::success(token))),
        Err(e) => (StatusCode::BAD_REQUEST, Json(AuthResult::failure(&e))),
    }
}

/// Register a new user
///
/// POST /api/Authentication/Register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> AuthResponse {
    let credentials = Credentials::from(request);
    respond(state.auth_service.register(&credentials).await)
}

/// Login with email and password
///
/// POST /api/Authentication/Login
///
/// Unknown email and wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> AuthResponse {
    let credentials = Credentials::from(request);
    respond(state.auth_service.login(&credentials).await)
}
