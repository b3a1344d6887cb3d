//! Provider client: credentials -> request body -> endpoint -> envelope.
//!
//! Every outcome is a value. Nothing here returns `Err` to the orchestrator.

use crate::domain::{FetchError, ProviderDescriptor, ProviderEnvelope};
use crate::ports::ProviderTransport;
use crate::usecases::credentials::ProviderCredentials;
use std::sync::Arc;
use tracing::debug;

/// Result of one provider invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// Endpoint answered with a parseable envelope (whatever its `status`).
    Success(ProviderEnvelope),
    /// A declared field was absent or empty; no request was sent.
    PreconditionFailed { missing: &'static str },
    FetchFailed(FetchError),
}

/// Outcome tagged with the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResult {
    pub provider: &'static str,
    pub outcome: ProviderOutcome,
}

pub struct ProviderClient {
    transport: Arc<dyn ProviderTransport>,
}

impl ProviderClient {
    pub fn new(transport: Arc<dyn ProviderTransport>) -> Self {
        Self { transport }
    }

    /// Invoke `descriptor`'s endpoint with the given credentials.
    pub async fn fetch(
        &self,
        descriptor: &ProviderDescriptor,
        credentials: &ProviderCredentials,
    ) -> ProviderOutcome {
        let body = match credentials.to_body() {
            Ok(body) => body,
            Err(missing) => {
                debug!(
                    provider = descriptor.name,
                    field = missing,
                    "credential missing, skipping provider"
                );
                return ProviderOutcome::PreconditionFailed { missing };
            }
        };

        let raw = match self.transport.post_json(descriptor.endpoint, &body).await {
            Ok(raw) => raw,
            Err(e) => return ProviderOutcome::FetchFailed(e),
        };

        match parse_envelope(&raw) {
            Ok(envelope) => ProviderOutcome::Success(envelope),
            Err(e) => ProviderOutcome::FetchFailed(e),
        }
    }
}

/// Parse a raw response body into a [`ProviderEnvelope`].
pub fn parse_envelope(raw: &str) -> Result<ProviderEnvelope, FetchError> {
    serde_json::from_str(raw).map_err(|e| FetchError::Malformed(e.to_string()))
}
