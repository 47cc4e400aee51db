//! Typed error handling for the response-shaping layer
//!
//! The error taxonomy here is deliberately small: directive extraction is
//! total and never errors, so the only domain failure is [`ApiError::NotFound`],
//! raised when a single-resource response is requested for an absent item.
//! The remaining variants cover the consumed seams (transformer resolution,
//! configuration) rather than the shaping protocol itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use shaper::prelude::*;
//!
//! match controller.respond_with_resource(item, "user", true).await {
//!     Ok(envelope) => Json(envelope).into_response(),
//!     Err(err) => err.into_response(), // NotFound maps to 404
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Errors produced by the controller and its consumed capabilities
#[derive(Debug)]
pub enum ApiError {
    /// The requested item does not exist
    NotFound { resource: String },

    /// No transformer is registered under the given identifier
    UnknownTransformer { name: String },

    /// Configuration could not be read or parsed
    Config { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { resource } => {
                write!(f, "{} not found", resource)
            }
            ApiError::UnknownTransformer { name } => {
                write!(f, "Unknown transformer: {}", name)
            }
            ApiError::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::UnknownTransformer { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::UnknownTransformer { .. } => "UNKNOWN_TRANSFORMER",
            ApiError::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::NotFound { resource } => {
                Some(serde_json::json!({ "resource": resource }))
            }
            ApiError::UnknownTransformer { name } => {
                Some(serde_json::json!({ "transformer": name }))
            }
            ApiError::Config { .. } => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(err: serde_yaml::Error) -> Self {
        ApiError::Config {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Config {
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for shaping operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ApiError::NotFound {
            resource: "user".to_string(),
        };
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::NotFound {
            resource: "user".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_unknown_transformer_maps_to_500() {
        let err = ApiError::UnknownTransformer {
            name: "ghost".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "UNKNOWN_TRANSFORMER");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = ApiError::NotFound {
            resource: "invoice".to_string(),
        };
        let response = err.to_response();
        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(
            response.details,
            Some(serde_json::json!({ "resource": "invoice" }))
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound {
            resource: "user".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: ApiError = io_err.into();
        assert!(matches!(err, ApiError::Config { .. }));
    }
}
