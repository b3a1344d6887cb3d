//! Fetch cycle: snapshot credentials -> fan out to every provider -> fan in -> aggregate -> cache.
//!
//! - One provider's failure never removes another provider's items
//! - Every provider runs under its own deadline; a late one becomes `FetchFailed(Timeout)`
//! - Overlapping cycles are rejected (single-flight)
//! - Loading flags and the current timeline are published through `watch` channels

use crate::domain::{DeadlineItem, DomainError, FetchError, FetchState, ProviderDescriptor};
use crate::usecases::aggregator::aggregate;
use crate::usecases::credentials::{CredentialStore, ProviderCredentials};
use crate::usecases::provider_client::{ProviderClient, ProviderOutcome, ProviderResult};
use crate::usecases::result_cache::ResultCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Fetch orchestrator. Owns `FetchState` and the exposed timeline.
pub struct FetchService {
    registry: Vec<ProviderDescriptor>,
    credentials: Arc<CredentialStore>,
    client: ProviderClient,
    cache: ResultCache,
    provider_timeout: Duration,
    state: watch::Sender<FetchState>,
    deadlines: watch::Sender<Vec<DeadlineItem>>,
    /// Held for the whole cycle.
    cycle_lock: Mutex<()>,
}

impl FetchService {
    pub fn new(
        registry: Vec<ProviderDescriptor>,
        credentials: Arc<CredentialStore>,
        client: ProviderClient,
        cache: ResultCache,
        provider_timeout: Duration,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::idle(&registry));
        let (deadlines, _) = watch::channel(Vec::new());
        Self {
            registry,
            credentials,
            client,
            cache,
            provider_timeout,
            state,
            deadlines,
            cycle_lock: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &[ProviderDescriptor] {
        &self.registry
    }

    /// Expose the cached timeline before any cycle completes. Returns its length.
    pub async fn restore_cached(&self) -> usize {
        let items = self.cache.load().await;
        let count = items.len();
        self.deadlines.send_replace(items);
        info!(count, "restored cached deadlines");
        count
    }

    /// Current loading flags.
    pub fn fetch_state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Current timeline (cached or from the last completed cycle).
    pub fn deadlines(&self) -> Vec<DeadlineItem> {
        self.deadlines.borrow().clone()
    }

    pub fn subscribe_deadlines(&self) -> watch::Receiver<Vec<DeadlineItem>> {
        self.deadlines.subscribe()
    }

    /// Run one fetch cycle across all providers.
    ///
    /// Always completes with a (possibly empty) result that replaces both the
    /// exposed timeline and the cache.
    ///
    /// # Errors
    /// `DomainError::CycleInProgress` if another cycle is still running.
    pub async fn run_fetch_cycle(&self) -> Result<CycleReport, DomainError> {
        let _guard = self
            .cycle_lock
            .try_lock()
            .map_err(|_| DomainError::CycleInProgress)?;

        self.state.send_modify(FetchState::clear);
        info!(providers = self.registry.len(), "fetch cycle started");

        let mut snapshots = Vec::with_capacity(self.registry.len());
        for descriptor in &self.registry {
            snapshots.push(self.credentials.snapshot(descriptor).await);
        }

        let futures: Vec<_> = self
            .registry
            .iter()
            .zip(&snapshots)
            .map(|(descriptor, creds)| self.fetch_one(descriptor, creds))
            .collect();
        let results = futures::future::join_all(futures).await;

        let items = aggregate(&results);
        self.cache.store(&items).await;
        self.deadlines.send_replace(items.clone());
        self.state.send_modify(FetchState::clear);

        let report = CycleReport::new(&results, items);
        info!(
            deadlines = report.items.len(),
            succeeded = report.succeeded(),
            failed = report.notices().len(),
            "fetch cycle complete"
        );
        Ok(report)
    }

    async fn fetch_one(
        &self,
        descriptor: &ProviderDescriptor,
        credentials: &ProviderCredentials,
    ) -> ProviderResult {
        let name = descriptor.name;
        self.state.send_modify(|s| s.set_loading(name, true));

        let outcome = match tokio::time::timeout(
            self.provider_timeout,
            self.client.fetch(descriptor, credentials),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => ProviderOutcome::FetchFailed(FetchError::Timeout(self.provider_timeout)),
        };

        self.state.send_modify(|s| s.set_loading(name, false));

        match &outcome {
            ProviderOutcome::Success(env) if env.is_success() => {
                debug!(provider = name, count = env.data.len(), "provider fetched")
            }
            ProviderOutcome::Success(env) => warn!(
                provider = name,
                status = %env.status,
                reason = env.message.as_deref().unwrap_or(""),
                "provider rejected request"
            ),
            ProviderOutcome::PreconditionFailed { missing } => {
                debug!(provider = name, field = missing, "provider skipped")
            }
            ProviderOutcome::FetchFailed(e) => {
                warn!(provider = name, error = %e, "provider fetch failed")
            }
        }

        ProviderResult {
            provider: name,
            outcome,
        }
    }
}

/// What happened to one provider during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    /// Envelope accepted; `count` items received (submitted ones included).
    Fetched { count: usize },
    Skipped { missing: &'static str },
    /// Endpoint answered with a non-success envelope.
    Rejected { status: String, message: Option<String> },
    Failed(FetchError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReport {
    pub provider: &'static str,
    pub status: ProviderStatus,
}

/// Outcome of a completed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub items: Vec<DeadlineItem>,
    pub providers: Vec<ProviderReport>,
}

impl CycleReport {
    fn new(results: &[ProviderResult], items: Vec<DeadlineItem>) -> Self {
        let providers = results
            .iter()
            .map(|r| ProviderReport {
                provider: r.provider,
                status: match &r.outcome {
                    ProviderOutcome::Success(env) if env.is_success() => ProviderStatus::Fetched {
                        count: env.data.len(),
                    },
                    ProviderOutcome::Success(env) => ProviderStatus::Rejected {
                        status: env.status.clone(),
                        message: env.message.clone(),
                    },
                    ProviderOutcome::PreconditionFailed { missing } => {
                        ProviderStatus::Skipped { missing: *missing }
                    }
                    ProviderOutcome::FetchFailed(e) => ProviderStatus::Failed(e.clone()),
                },
            })
            .collect();
        Self { items, providers }
    }

    /// Providers whose items made it into the result.
    pub fn succeeded(&self) -> usize {
        self.providers
            .iter()
            .filter(|p| matches!(p.status, ProviderStatus::Fetched { .. }))
            .count()
    }

    /// User-facing notices (`"{provider} : {cause}"`) for failed or rejected providers.
    /// Skipped providers are silent.
    pub fn notices(&self) -> Vec<String> {
        self.providers
            .iter()
            .filter_map(|p| match &p.status {
                ProviderStatus::Failed(e) => Some(format!("{} : {}", p.provider, e)),
                ProviderStatus::Rejected { status, message } => Some(format!(
                    "{} : {}",
                    p.provider,
                    message.as_deref().unwrap_or(status)
                )),
                _ => None,
            })
            .collect()
    }
}
