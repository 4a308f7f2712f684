//! Error types for the Explore API server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// A specialized `Result` type for Explore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type for all operations within the Explore server.
#[derive(Debug, Error)]
pub enum Error {
    /// A required parameter or header was missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The caller's credential was absent, invalid or rejected upstream.
    #[error("{0}")]
    AuthError(String),

    /// The triplestore or search index answered with a non-2xx status.
    #[error("Upstream error: {message}")]
    Upstream {
        /// Status returned by the upstream service, if it answered at all.
        status: Option<u16>,
        /// Message taken from the upstream response or transport failure.
        message: String,
    },

    /// An upstream call did not complete within its deadline.
    #[error("Upstream timed out: {0}")]
    Timeout(String),

    /// The triplestore returned a term kind the aggregator cannot render.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// An unexpected internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// An error from the underlying I/O system.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The standard JSON response body for an API error.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// A human-readable error message.
    pub error: String,
    /// A machine-readable error code string.
    pub code: String,
}

impl Error {
    /// Builds an [`Error::Upstream`] from a status code and message.
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Error::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Returns the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::AuthError(_) => StatusCode::UNAUTHORIZED,
            Error::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Rendering(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a machine-readable error code string for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::BadRequest(_) => "BAD_REQUEST",
            Error::AuthError(_) => "AUTH_ERROR",
            Error::Upstream { .. } => "UPSTREAM_ERROR",
            Error::Timeout(_) => "TIMEOUT",
            Error::Rendering(_) => "RENDERING_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }

    /// Caller and credential errors are not server faults.
    pub fn is_server_fault(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_server_fault() {
            tracing::error!(code = self.error_code(), "{}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err.to_string())
        } else {
            Error::upstream(err.status().map(|s| s.as_u16()), err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::upstream(None, format!("Malformed upstream payload: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::BadRequest("q".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::AuthError("no".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::upstream(Some(502), "bad gateway").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Timeout("900ms".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Rendering("bnode".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_caller_errors_are_not_server_faults() {
        assert!(!Error::BadRequest("x".into()).is_server_fault());
        assert!(!Error::AuthError("x".into()).is_server_fault());
        assert!(Error::upstream(None, "x").is_server_fault());
    }

    #[test]
    fn test_caller_messages_are_verbatim() {
        let err = Error::BadRequest("Authorization header not set".into());
        assert_eq!(err.to_string(), "Authorization header not set");
    }

    #[test]
    fn test_into_response() {
        let response = Error::AuthError("Invalid API key given".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
