//! Outbound GET returning the raw body text.

use reqwest::Client;
use skycast_core::FetchConfig;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;

/// Shared HTTP client. Cheap to clone; one connection pool per process.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Arc<Client>,
}

impl FetchClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        Self::new(config.timeout(), &config.user_agent)
    }

    /// Single best-effort GET. Non-2xx statuses are errors; the body is not inspected.
    pub async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
