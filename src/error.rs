//! Error types for depbump operations.

use thiserror::Error;

/// Main error type for depbump operations.
#[derive(Error, Debug)]
pub enum DepBumpError {
    // Options resolution errors
    #[error("{0}")]
    ConfigurationError(String),

    // package.json errors
    #[error("{0}")]
    ManifestError(String),

    // Forge/network errors
    #[error("{0}")]
    RemoteError(String),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using DepBumpError
pub type Result<T> = std::result::Result<T, DepBumpError>;

impl DepBumpError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a manifest error
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::ManifestError(msg.into())
    }

    /// Create a remote error
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteError(msg.into())
    }

    /// Category name printed in front of the message on failure.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationError(_) => "ConfigurationError",
            Self::ManifestError(_) => "ManifestError",
            Self::RemoteError(_) => "RemoteError",
            Self::LoggerError(_) | Self::Other(_) => "Error",
        }
    }

    /// One-line `kind: message` summary.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

// Transport level failures (connect, timeout, decode) carry no provider
// message, so reqwest's description is all we have
impl From<reqwest::Error> for DepBumpError {
    fn from(err: reqwest::Error) -> Self {
        Self::RemoteError(err.to_string())
    }
}

impl From<url::ParseError> for DepBumpError {
    fn from(err: url::ParseError) -> Self {
        Self::ConfigurationError(format!("invalid api url: {err}"))
    }
}
