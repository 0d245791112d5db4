//! Application error type and its HTTP rendering.
//!
//! Every service operation returns [`AppError`]. Handlers return it directly and
//! rely on the [`IntoResponse`] impl to produce the JSON error body:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Shortcode not found", "details": {} } }
//! ```
//!
//! Store failures and other unexpected conditions are logged here and rendered
//! as a generic `internal_error` so that no storage details leak to clients.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serialized error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL, shortcode or validity value. Client's fault, no retry.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Shortcode already taken, either by pre-check or by a lost insert race.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The code exists but its expiry has passed.
    #[error("{message}")]
    Gone { message: String, details: Value },

    /// The generator could not find a free code within the attempt bound.
    #[error("{message}")]
    ExhaustedNamespace { message: String, details: Value },

    /// Storage failed or timed out.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::ExhaustedNamespace {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable(reason.into())
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Gone { .. } => StatusCode::GONE,
            Self::ExhaustedNamespace { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::StoreUnavailable(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing payload.
    ///
    /// Internal failures are reduced to a generic message with empty details.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => ("validation_error", message, details),
            Self::Conflict { message, details } => ("conflict", message, details),
            Self::NotFound { message, details } => ("not_found", message, details),
            Self::Gone { message, details } => ("gone", message, details),
            Self::ExhaustedNamespace { message, details } => {
                ("namespace_exhausted", message, details)
            }
            Self::StoreUnavailable(_) | Self::Internal { .. } => {
                return ErrorInfo {
                    code: "internal_error",
                    message: "Internal server error".to_string(),
                    details: json!({}),
                };
            }
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::StoreUnavailable(reason) => {
                tracing::error!(%reason, "store unavailable");
            }
            Self::Internal { message, details } => {
                tracing::error!(%message, %details, "internal error");
            }
            Self::ExhaustedNamespace { message, .. } => {
                tracing::error!(%message, "short code namespace exhausted");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateCode(code) => AppError::conflict(
                "Shortcode already in use",
                json!({ "shortcode": code }),
            ),
            StoreError::NotFound(code) => {
                AppError::not_found("Shortcode not found", json!({ "shortcode": code }))
            }
            StoreError::Unavailable(reason) => AppError::StoreUnavailable(reason),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, json!(errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
