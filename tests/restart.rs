//! The last timeline survives a restart and is replaced by the first new cycle.

use holly_ddl::adapters::persistence::JsonFileStore;
use holly_ddl::domain::registry::PROVIDERS;
use holly_ddl::domain::FetchError;
use holly_ddl::ports::{KeyValueStore, ProviderTransport};
use holly_ddl::usecases::{CredentialStore, FetchService, ProviderClient, ResultCache};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Answers every endpoint with the same body.
struct StaticTransport(&'static str);

#[async_trait::async_trait]
impl ProviderTransport for StaticTransport {
    async fn post_json(
        &self,
        _endpoint: &str,
        _body: &Map<String, Value>,
    ) -> Result<String, FetchError> {
        Ok(self.0.to_string())
    }
}

async fn boot(path: &Path, body: &'static str) -> (Arc<CredentialStore>, FetchService) {
    let store = JsonFileStore::new(path);
    store.load().await.unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let credentials = Arc::new(CredentialStore::new(Arc::clone(&store)));
    let service = FetchService::new(
        PROVIDERS[..1].to_vec(),
        Arc::clone(&credentials),
        ProviderClient::new(Arc::new(StaticTransport(body))),
        ResultCache::new(store),
        Duration::from_secs(5),
    );
    (credentials, service)
}

const FIRST: &str = r#"{"status":"success","data":[
    {"title":"old-b","course":"C","due":20,"status":"","url":"","submitted":false},
    {"title":"old-a","course":"C","due":10,"status":"","url":"","submitted":false}]}"#;
const SECOND: &str = r#"{"status":"success","data":[
    {"title":"new","course":"C","due":5,"status":"","url":"","submitted":false}]}"#;

#[tokio::test]
async fn test_cached_timeline_restored_then_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let (credentials, service) = boot(&path, FIRST).await;
        credentials.set("Hydro", "username", "alice").await;
        credentials.set("Hydro", "password", "pw").await;
        credentials.set_show_form(false).await;
        assert_eq!(service.restore_cached().await, 0);
        service.run_fetch_cycle().await.unwrap();
    }

    let (credentials, service) = boot(&path, SECOND).await;
    assert!(!credentials.show_form().await);
    assert_eq!(service.restore_cached().await, 2);
    let titles: Vec<String> = service.deadlines().into_iter().map(|i| i.title).collect();
    assert_eq!(titles, ["old-a", "old-b"]);

    let report = service.run_fetch_cycle().await.unwrap();
    let titles: Vec<&str> = report.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["new"]);
    assert_eq!(service.deadlines(), report.items);

    let (_, reopened) = boot(&path, SECOND).await;
    assert_eq!(reopened.restore_cached().await, 1);
}
