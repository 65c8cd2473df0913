//! Error types shared by the skycast crates.
//!
//! [`AppError`] is what the command line reports when a run cannot start or
//! cannot finish. Weather facet failures never reach it; the aggregation
//! engine absorbs those and returns empty defaults instead.

use thiserror::Error;

/// Failure of a whole command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Network(#[from] NetworkError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0:#}")]
    Io(anyhow::Error),

    #[error("{0:#}")]
    Other(anyhow::Error),
}

impl AppError {
    /// One-line hint for the terminal. The `Display` form carries the detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Config(e) => e.user_message(),
            Self::Network(e) => e.user_message(),
            Self::InvalidInput(_) => "The command arguments were rejected. See --help.",
            Self::Io(_) => "Could not read or write the configuration file.",
            Self::Other(_) => "Skycast could not complete the command.",
        }
    }
}

impl From<anyhow::Error> for AppError {
    /// Recovers typed configuration and file errors from the loader's `anyhow` chain.
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<ConfigError>() {
            Ok(config) => Self::Config(config),
            Err(e) if e.root_cause().is::<std::io::Error>() => Self::Io(e),
            Err(e) => Self::Other(e),
        }
    }
}

/// Transport-level HTTP failures.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Provider answered with HTTP {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => "Could not reach the weather provider. Check your connection.",
            Self::Timeout => "The weather provider did not answer in time. Raise fetch.timeout_secs or retry.",
            Self::ServerError { status: 401 | 403, .. } => {
                "The weather provider refused the credentials. Check provider.client_id and provider.client_secret."
            }
            Self::ServerError { status, .. } if *status >= 500 => {
                "The weather provider is having trouble. Try again later."
            }
            Self::ServerError { .. } => "The weather provider rejected the request.",
            Self::InvalidResponse(_) => "The weather provider sent a response skycast could not read.",
        }
    }
}

/// Problems with the configuration file or values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "No config file at that path. Drop --config to use the default location.",
            Self::Invalid(_) => "The configuration has invalid values. Fix them and retry.",
            Self::ParseError(_) => "The config file is not valid TOML for skycast.",
        }
    }
}

/// Classifies a reqwest failure by what went wrong on the wire.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() || self.is_body() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
