//! API error type and its JSON body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::domain::DomainError;

/// Errors returned by the Team endpoints and the JSON extractor
///
/// Rendered as `{"error": {"message", "type", "param"?}}`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Unknown, missing or unparseable team identifier
    #[error("Invalid Id")]
    InvalidId,

    #[error("{message}")]
    BadRequest {
        message: String,
        param: Option<&'static str>,
    },

    /// Store or configuration failure; the detail is only logged
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            param: None,
        }
    }

    /// A required query parameter is absent
    pub fn missing_param(param: &'static str) -> Self {
        Self::BadRequest {
            message: format!("The {} parameter is required", param),
            param: Some(param),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidId | Self::BadRequest { .. } => "invalid_request_error",
            Self::Internal => "server_error",
        }
    }

    fn param(&self) -> Option<&'static str> {
        match self {
            Self::InvalidId => Some("id"),
            Self::BadRequest { param, .. } => *param,
            Self::Internal => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut detail = json!({
            "message": self.to_string(),
            "type": self.error_type(),
        });
        if let Some(param) = self.param() {
            detail["param"] = param.into();
        }

        (self.status(), Json(json!({ "error": detail }))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidId { .. } => Self::InvalidId,
            DomainError::Validation { message } | DomainError::Conflict { message } => {
                Self::bad_request(message)
            }
            DomainError::Configuration { .. }
            | DomainError::Internal { .. }
            | DomainError::Storage { .. } => {
                warn!(error = %err, "Request failed");
                Self::Internal
            }
        }
    }
}
