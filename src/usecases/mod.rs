//! Application use cases. Orchestrate domain logic via ports.

pub mod aggregator;
pub mod credentials;
pub mod fetch_service;
pub mod provider_client;
pub mod result_cache;

pub use aggregator::aggregate;
pub use credentials::{CredentialStore, ProviderCredentials};
pub use fetch_service::{CycleReport, FetchService, ProviderReport, ProviderStatus};
pub use provider_client::{ProviderClient, ProviderOutcome, ProviderResult};
pub use result_cache::ResultCache;
