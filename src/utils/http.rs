//! HTTP client utilities.

use reqwest::{redirect, Client};
use std::time::Duration;

use crate::config::HttpConfig;
use crate::sources::FetchError;

/// Shared HTTP client with configured timeouts
///
/// Each fetch is a single GET: no retries, and redirects are not followed.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let user_agent = config.user_agent.clone().unwrap_or_else(|| {
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
        });

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET a URL and return the body, failing on any non-success status
    pub async fn get_bytes(&self, url: &str, accept: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", accept)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Api(format!("{} returned status: {}", url, status)));
        }

        let bytes = response.bytes().await?;

        tracing::debug!(url, bytes = bytes.len(), "fetched feed payload");

        Ok(bytes.to_vec())
    }
}
