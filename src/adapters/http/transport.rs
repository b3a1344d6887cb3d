//! HTTP adapter. Implements ProviderTransport by POSTing JSON to `{base_url}{endpoint}`.

use crate::domain::{DomainError, FetchError};
use crate::ports::ProviderTransport;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// reqwest-backed provider transport.
///
/// No overall request timeout is set here: the fetch service bounds every
/// provider invocation with its own deadline.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a new transport.
    ///
    /// # Arguments
    /// * `base_url` - Prefix for every endpoint (e.g. "http://localhost:5000"); a trailing `/` is dropped
    /// * `connect_timeout` - TCP/TLS connect timeout
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait::async_trait]
impl ProviderTransport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        body: &Map<String, Value>,
    ) -> Result<String, FetchError> {
        let url = self.url(endpoint);
        debug!(%url, "posting to provider endpoint");

        let res = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            return Err(FetchError::Status(res.status().as_u16()));
        }

        res.text()
            .await
            .map_err(|e| FetchError::Transport(format!("read body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let t = HttpTransport::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(t.url("/api/hydro"), "http://localhost:5000/api/hydro");

        let t = HttpTransport::new("", Duration::from_secs(1)).unwrap();
        assert_eq!(t.url("/api/hydro"), "/api/hydro");
    }
}
