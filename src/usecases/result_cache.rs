//! Last known good timeline, persisted under the `data` key.

use crate::domain::DeadlineItem;
use crate::ports::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key of the persisted aggregation result (JSON array).
pub const RESULT_KEY: &str = "data";

pub struct ResultCache {
    kv: Arc<dyn KeyValueStore>,
}

impl ResultCache {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Previously stored result. Missing or unreadable data yields an empty list.
    pub async fn load(&self) -> Vec<DeadlineItem> {
        let Some(raw) = self.kv.get(RESULT_KEY).await else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "cached deadlines unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored result, including with an empty one.
    pub async fn store(&self, items: &[DeadlineItem]) {
        match serde_json::to_string(items) {
            Ok(json) => {
                self.kv.set(RESULT_KEY, &json).await;
                debug!(count = items.len(), "cached deadlines replaced");
            }
            Err(e) => warn!(error = %e, "failed to serialize deadlines for cache"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;

    fn item(due: i64) -> DeadlineItem {
        DeadlineItem {
            title: format!("hw{due}"),
            course: "CS".into(),
            due,
            status: "open".into(),
            url: String::new(),
            submitted: false,
            latedue: Some(due + 3600),
        }
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let cache = ResultCache::new(Arc::new(MemoryStore::new()));
        assert!(cache.load().await.is_empty());

        cache.store(&[item(1), item(2)]).await;
        assert_eq!(cache.load().await, vec![item(1), item(2)]);

        cache.store(&[]).await;
        assert!(cache.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_cache_loads_empty() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(RESULT_KEY, "not json").await;
        let cache = ResultCache::new(kv);
        assert!(cache.load().await.is_empty());
    }
}
