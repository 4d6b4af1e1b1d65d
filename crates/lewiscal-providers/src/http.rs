//! HTTP client for downloading ICS feeds.

use reqwest::{Client, Response};
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{ProviderError, ProviderResult};

/// HTTP client for calendar feeds.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct IcsClient {
    /// The underlying HTTP client.
    client: Client,
    /// Configuration.
    config: FetchConfig,
}

impl IcsClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: FetchConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("Failed to create HTTP client: {}", e))
                    .with_origin("http")
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    /// Downloads `url` and returns the body as text.
    ///
    /// Non-2xx statuses yield [`ProviderErrorCode::HttpStatus`] carrying the
    /// status code; transport failures yield
    /// [`ProviderErrorCode::NetworkError`].
    ///
    /// [`ProviderErrorCode::HttpStatus`]: crate::error::ProviderErrorCode::HttpStatus
    /// [`ProviderErrorCode::NetworkError`]: crate::error::ProviderErrorCode::NetworkError
    pub async fn get(&self, url: &Url) -> ProviderResult<String> {
        trace!(url = %url, "Sending request");

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "text/calendar, text/plain;q=0.9, */*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                ProviderError::network(format!("Request failed: {}", e))
                    .with_origin("http")
                    .with_source(e)
            })?;

        self.handle_response(response).await
    }

    /// Checks the status and extracts the body.
    async fn handle_response(&self, response: Response) -> ProviderResult<String> {
        let status = response.status();
        trace!(status = %status, "Received response");

        if !status.is_success() {
            warn!(status = %status, url = %response.url(), "Calendar server returned an error");
            return Err(ProviderError::http_status(
                status.as_u16(),
                format!("Calendar server returned {}", status),
            )
            .with_origin("http"));
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::network(format!("Failed to read response: {}", e))
                .with_origin("http")
                .with_source(e)
        })?;

        debug!(bytes = body.len(), "Downloaded calendar");
        Ok(body)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}
