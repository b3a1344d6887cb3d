//! Aggregator: merge successful providers' unsubmitted items into one timeline.

use crate::domain::DeadlineItem;
use crate::usecases::provider_client::{ProviderOutcome, ProviderResult};

/// Flatten unsubmitted items of every successful envelope, in provider order,
/// then stable-sort ascending by `due`.
///
/// Skipped and failed providers contribute nothing. Envelopes whose status is
/// not `"success"` are treated the same way.
pub fn aggregate(results: &[ProviderResult]) -> Vec<DeadlineItem> {
    let mut items: Vec<DeadlineItem> = results
        .iter()
        .filter_map(|r| match &r.outcome {
            ProviderOutcome::Success(env) if env.is_success() => Some(&env.data),
            _ => None,
        })
        .flatten()
        .filter(|item| !item.submitted)
        .cloned()
        .collect();

    // sort_by_key is stable: equal due dates keep registry order
    items.sort_by_key(|item| item.due);
    items
}
