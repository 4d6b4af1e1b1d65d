//! Error types for calendar sources.
//!
//! Covers fetching a remote calendar, reading the local fallback file, and
//! persisting the saved calendar URL.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The category of a provider error.
///
/// The HTTP layer maps these onto status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The calendar URL could not be parsed.
    InvalidUrl,
    /// The calendar server answered with a non-success status.
    HttpStatus,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// A local file does not exist.
    NotFound,
    /// Reading or writing a local file failed.
    IoError,
    /// The response body or stored data could not be decoded.
    InvalidResponse,
    /// Internal error - unexpected state, bug.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError)
    }

    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid_url",
            Self::HttpStatus => "http_status",
            Self::NetworkError => "network_error",
            Self::NotFound => "not_found",
            Self::IoError => "io_error",
            Self::InvalidResponse => "invalid_response",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while loading a calendar or its settings.
#[derive(Debug, Error)]
pub struct ProviderError {
    /// The error code categorizing this error.
    code: ProviderErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// Which source produced the error (e.g. "http", "file").
    origin: Option<String>,
    /// Upstream HTTP status, for [`ProviderErrorCode::HttpStatus`].
    status: Option<u16>,
    /// The local path involved, if any.
    path: Option<PathBuf>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            origin: None,
            status: None,
            path: None,
            source: None,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidUrl, message)
    }

    /// Creates an error for a non-success HTTP status.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ProviderErrorCode::HttpStatus, message);
        err.status = Some(status);
        err
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates a not found error for a local path.
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut err = Self::new(
            ProviderErrorCode::NotFound,
            format!("{} does not exist", path.display()),
        );
        err.path = Some(path.to_path_buf());
        err
    }

    /// Creates an IO error for a local path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref();
        let mut err = Self::new(
            ProviderErrorCode::IoError,
            format!("{}: {}", path.display(), source),
        )
        .with_source(source);
        err.path = Some(path.to_path_buf());
        err
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Sets the origin name for this error.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the origin name, if set.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Returns the upstream HTTP status, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the local path involved, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref origin) = self.origin {
            write!(f, "[{}] ", origin)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
