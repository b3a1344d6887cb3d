//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::FetchError;
use serde_json::{Map, Value};

/// Persistent key-value storage (credentials, UI flags, last aggregated result).
///
/// Storage failures never reach the caller: the adapter logs them, and a failed
/// read looks the same as a key that was never written.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if never saved (or unreadable).
    async fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str);
}

/// Request channel to the provider endpoints.
#[async_trait::async_trait]
pub trait ProviderTransport: Send + Sync {
    /// POST `body` as JSON to `endpoint` and return the raw response body.
    ///
    /// # Errors
    /// `FetchError::Transport` for network errors, `FetchError::Status` for non-2xx answers.
    async fn post_json(
        &self,
        endpoint: &str,
        body: &Map<String, Value>,
    ) -> Result<String, FetchError>;
}
