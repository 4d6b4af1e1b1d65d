//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Calendar fetch or storage error.
    Provider(String),
    /// HTTP server error.
    Server(String),
    /// Output could not be encoded.
    Output(String),
    /// Invalid command-line input.
    Usage(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Provider(msg) => write!(f, "provider error: {}", msg),
            Self::Server(msg) => write!(f, "server error: {}", msg),
            Self::Output(msg) => write!(f, "output error: {}", msg),
            Self::Usage(msg) => write!(f, "{}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<lewiscal_providers::ProviderError> for ClientError {
    fn from(err: lewiscal_providers::ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl From<lewiscal_server::ServerError> for ClientError {
    fn from(err: lewiscal_server::ServerError) -> Self {
        Self::Server(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_kind() {
        assert_eq!(
            ClientError::Config("bad port".to_string()).to_string(),
            "configuration error: bad port"
        );
        assert_eq!(
            ClientError::Usage("URL must not be empty".to_string()).to_string(),
            "URL must not be empty"
        );
    }

    #[test]
    fn provider_errors_convert() {
        let err: ClientError = lewiscal_providers::ProviderError::network("timed out").into();
        assert!(matches!(err, ClientError::Provider(_)));
        assert!(err.to_string().contains("timed out"));
    }
}
