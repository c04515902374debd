//! Error handling module for the pet server.
//!
//! Every handler returns `AppError` on failure; the mapping to HTTP status
//! codes and response bodies lives here and nowhere else.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Message sent for every server-side failure, whatever the cause.
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed identifier, missing required field, or unparsable body
    InvalidInput(String),
    /// No document matches the request
    NotFound(String),
    /// The store cannot be reached (pool closed, timed out, I/O failure)
    StoreUnavailable(String),
    /// Any other failure
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client.
    ///
    /// Server-side failures all share one message; the detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::StoreUnavailable(_) | AppError::Internal(_) => {
                GENERIC_SERVER_ERROR.to_string()
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::Internal(_) => "internal",
        }
    }

    fn detail(&self) -> &str {
        match self {
            AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::StoreUnavailable(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.detail())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                AppError::StoreUnavailable(format!("Store unavailable: {}", err))
            }
            other => AppError::Internal(format!("Database error: {}", other)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("Stored document is not valid JSON: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "Request failed: {}", self.detail());
        } else {
            tracing::warn!(kind = self.kind(), "Request rejected: {}", self.detail());
        }

        let body = ErrorResponse {
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::StoreUnavailable("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_share_public_message() {
        let unavailable = AppError::StoreUnavailable("connection refused".into());
        let internal = AppError::Internal("constraint failed".into());

        assert_eq!(unavailable.public_message(), GENERIC_SERVER_ERROR);
        assert_eq!(internal.public_message(), unavailable.public_message());
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = AppError::InvalidInput("petId and userId are required".into());
        assert_eq!(err.public_message(), "petId and userId are required");
    }

    #[test]
    fn test_pool_closed_is_store_unavailable() {
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, AppError::StoreUnavailable(_)));

        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Internal(_)));
    }
}
