//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how it is
//! rendered at the HTTP boundary.

use crate::config::ConfigError;
use assistance_core::ports::PortError;
use assistance_core::validation::FieldError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents an error from running the schema migrations.
    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The request body or path could not be decoded into the expected shape.
    #[error("Malformed request: {0}")]
    Malformed(String),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Port(PortError::NotFound(message)) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "not_found".to_string(),
                    message,
                    details: None,
                },
            ),
            ApiError::Port(PortError::Invalid(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    code: "validation_failed".to_string(),
                    message: errors.to_string(),
                    details: Some(errors.errors),
                },
            ),
            ApiError::Malformed(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    code: "validation_failed".to_string(),
                    message,
                    details: None,
                },
            ),
            other => {
                error!("Request failed: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "internal".to_string(),
                        message: "An internal error occurred".to_string(),
                        details: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// A convenience type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use assistance_core::validation::ValidationErrors;

    #[test]
    fn port_errors_map_to_http_statuses() {
        let not_found = ApiError::Port(PortError::NotFound("Application x not found".into()));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let mut errors = ValidationErrors::new();
        errors.push("nik", "must be exactly 16 characters");
        let invalid = ApiError::Port(PortError::Invalid(errors));
        assert_eq!(
            invalid.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let unexpected = ApiError::Port(PortError::Unexpected("connection reset".into()));
        assert_eq!(
            unexpected.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
