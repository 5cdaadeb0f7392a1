//! Errors returned by the REST layer.

use serde::Deserialize;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// A failed call to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS...).
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{}", .message.as_deref().unwrap_or("Request failed"))]
    Server { status: u16, message: Option<String> },

    /// The response body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response was fine but the session could not be persisted.
    #[error(transparent)]
    Session(#[from] store::SessionError),
}

/// Error body the backend sends with failed responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::Session(_) => None,
        }
    }

    /// The `error` string from the backend, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for an error banner: the backend's message verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
