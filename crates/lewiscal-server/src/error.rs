//! Server error types.
//!
//! [`ServerError`] covers startup and shutdown. [`ApiError`] is what a
//! request handler returns; it renders as a JSON body with a status code.

use std::io;
use std::net::SocketAddr;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lewiscal_providers::{ProviderError, ProviderErrorCode};
use serde::Serialize;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error while serving.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Provider setup failed (e.g. HTTP client construction).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The listening socket could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// JSON error body returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorBody {
    fn new(error: &'static str) -> Self {
        Self {
            error,
            status: None,
            details: None,
            path: None,
        }
    }
}

/// An error response from a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// The save request had no usable `url`.
    pub fn missing_calendar_url() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::new("Missing calendar URL"),
        }
    }

    /// Writing the saved URL failed.
    pub fn save_failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody::new("Could not save URL"),
        }
    }

    /// Maps a refresh failure onto the response the frontend expects.
    pub fn refresh(err: &ProviderError) -> Self {
        match err.code() {
            ProviderErrorCode::HttpStatus => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    status: err.status(),
                    ..ErrorBody::new("Invalid calendar link.")
                },
            },
            ProviderErrorCode::NetworkError | ProviderErrorCode::InvalidUrl => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody {
                    details: Some(err.message().to_string()),
                    ..ErrorBody::new("Unable to fetch calendar URL.")
                },
            },
            ProviderErrorCode::NotFound => Self {
                status: StatusCode::NOT_FOUND,
                body: ErrorBody {
                    path: err.path().map(|p| p.display().to_string()),
                    ..ErrorBody::new("Local calendar.ics file not found.")
                },
            },
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody {
                    details: Some(err.message().to_string()),
                    ..ErrorBody::new("Unable to refresh calendar.")
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
