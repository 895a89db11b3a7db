//! Liveness and readiness endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::warn;

use crate::api::types::Json;
use crate::domain::DomainError;

use super::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
    /// Store reachability, only reported by `/ready`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<&'static str>,
}

impl HealthBody {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store: None,
        }
    }
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(HealthBody::new("healthy"))
}

/// GET /ready, 503 while the store cannot be reached
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, body) = readiness(state.team_service.ping().await);
    (status, Json(body))
}

/// GET /live
pub async fn live_check() -> StatusCode {
    StatusCode::OK
}

fn readiness(store: Result<(), DomainError>) -> (StatusCode, HealthBody) {
    match store {
        Ok(()) => (
            StatusCode::OK,
            HealthBody {
                store: Some("up"),
                ..HealthBody::new("healthy")
            },
        ),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthBody {
                    store: Some("down"),
                    ..HealthBody::new("unhealthy")
                },
            )
        }
    }
}
