//! Per-facet failure causes.
//!
//! None of these reach the aggregation caller. Fetchers turn every variant
//! into the facet's empty default and report the cause through tracing.

use skycast_core::{AppError, NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Provider answered with HTTP {0}")]
    Status(u16),

    #[error("Empty response body")]
    EmptyBody,

    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Provider rejected request ({}): {}", .code.as_deref().unwrap_or("no code"), .description.as_deref().unwrap_or("success flag not set"))]
    ProviderRejected {
        code: Option<String>,
        description: Option<String>,
    },

    #[error("Response is missing {0}")]
    MissingData(&'static str),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Search query must be at least {min} characters")]
    QueryTooShort { min: usize },
}

impl From<reqwest::Error> for FetchError {
    /// The request URL carries credentials, so it is stripped before the error is kept.
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.without_url().into_network_error())
    }
}

impl FetchError {
    /// Short stable label for the diagnostic `cause` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "transport",
            Self::Status(_) => "status",
            Self::EmptyBody => "empty_body",
            Self::MalformedBody(_) => "malformed_body",
            Self::ProviderRejected { .. } => "provider_rejected",
            Self::MissingData(_) => "missing_data",
            Self::InvalidUrl(_) => "invalid_url",
            Self::QueryTooShort { .. } => "invalid_query",
        }
    }

    /// Structural misses mean "nothing to report" rather than a broken exchange.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::MissingData(_))
    }
}

impl From<FetchError> for AppError {
    /// Only place search returns a `FetchError` to the command line.
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Network(network) => Self::Network(network),
            FetchError::Status(status) => Self::Network(NetworkError::ServerError {
                status,
                message: "request failed".to_string(),
            }),
            FetchError::QueryTooShort { .. } => Self::InvalidInput(e.to_string()),
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}
