//! Error type for remote data access.

use thiserror::Error;

/// Errors that can occur talking to remote collaborators.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl DataError {
    /// The HTTP status code, when the failure was an HTTP error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            DataError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Deserialization(e.to_string())
    }
}
