//! Error types for tick-core

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias using tick-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tick-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input, caught before any remote call is made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request
    #[error("Remote operation failed: {0}")]
    Remote(String),

    /// The authenticated identity may not touch this document
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Task not found
    #[error("Task not found: {0}")]
    NotFound(String),

    /// The live snapshot feed failed
    #[error("Subscription error: {0}")]
    Subscription(String),

    /// JSON payload error
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Local persistence error (preferences, session store)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Map a non-success HTTP status to the matching error kind.
    #[must_use]
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::PermissionDenied(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Remote(message),
        }
    }

    /// Whether this error means the target document no longer exists.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_auth_failures() {
        assert!(matches!(
            Error::from_status(StatusCode::UNAUTHORIZED, "no".into()),
            Error::PermissionDenied(_)
        ));
        assert!(matches!(
            Error::from_status(StatusCode::FORBIDDEN, "no".into()),
            Error::PermissionDenied(_)
        ));
    }

    #[test]
    fn test_from_status_maps_missing_documents() {
        let error = Error::from_status(StatusCode::NOT_FOUND, "gone".into());
        assert!(error.is_not_found());
    }

    #[test]
    fn test_from_status_falls_back_to_remote() {
        assert!(matches!(
            Error::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            Error::Remote(_)
        ));
    }
}
