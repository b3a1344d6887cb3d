//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use holly_ddl::adapters::http::HttpTransport;
use holly_ddl::adapters::persistence::{JsonFileStore, MemoryStore};
use holly_ddl::adapters::ui::tui::TuiInputPort;
use holly_ddl::domain::registry::{self, PROVIDERS};
use holly_ddl::ports::{InputPort, KeyValueStore, ProviderTransport};
use holly_ddl::shared::config::AppConfig;
use holly_ddl::usecases::{CredentialStore, FetchService, ProviderClient, ResultCache};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    holly_ddl::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    registry::validate(PROVIDERS).map_err(|e| anyhow::anyhow!("{}", e))?;

    // --- Key-value store (credentials, form flag, last timeline) ---
    let store: Arc<dyn KeyValueStore> = if cfg.is_ephemeral() {
        info!("ephemeral mode: nothing is written to disk");
        Arc::new(MemoryStore::new())
    } else {
        let data_path = PathBuf::from(cfg.data_dir_or_default());
        let store_path = data_path.join("store.json");
        let json_store = JsonFileStore::new(&store_path);
        json_store
            .load()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        info!(path = %store_path.display(), "store loaded");
        Arc::new(json_store)
    };

    // --- Provider transport ---
    let base_url = cfg.base_url_or_default();
    let transport: Arc<dyn ProviderTransport> = Arc::new(
        HttpTransport::new(
            &base_url,
            Duration::from_secs(cfg.connect_timeout_secs_or_default()),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let provider_timeout = Duration::from_secs(cfg.provider_timeout_secs_or_default());
    info!(
        %base_url,
        provider_timeout_secs = provider_timeout.as_secs(),
        "provider endpoints"
    );

    // --- Services ---
    let credentials = Arc::new(CredentialStore::new(Arc::clone(&store)));
    let fetch_service = Arc::new(FetchService::new(
        PROVIDERS.to_vec(),
        Arc::clone(&credentials),
        ProviderClient::new(transport),
        ResultCache::new(Arc::clone(&store)),
        provider_timeout,
    ));
    fetch_service.restore_cached().await;

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        Arc::clone(&fetch_service),
        Arc::clone(&credentials),
    ));

    // --- Run (menu -> Login & Fetch / credentials / timeline) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
