//! Application configuration. Backend location, storage path, timeouts.

use serde::Deserialize;

/// Development backend of the provider endpoints.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Per-provider deadline for one fetch, in seconds.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Prefix joined to every provider endpoint. Read from HOLLY_DDL_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory holding store.json. Read from HOLLY_DDL_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Deadline for a single provider request, including the response body. Read from HOLLY_DDL_PROVIDER_TIMEOUT_SECS.
    #[serde(default)]
    pub provider_timeout_secs: Option<u64>,

    /// Connect timeout of the HTTP client. Read from HOLLY_DDL_CONNECT_TIMEOUT_SECS.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    /// Keep everything in memory (nothing written to disk). Read from HOLLY_DDL_EPHEMERAL.
    #[serde(default)]
    pub ephemeral: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("HOLLY_DDL").try_parsing(true));
        if let Ok(path) = std::env::var("HOLLY_DDL_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the endpoint base URL. Defaults to the local development backend.
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Returns the data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns the per-provider timeout in seconds. Zero is treated as unset.
    pub fn provider_timeout_secs_or_default(&self) -> u64 {
        self.provider_timeout_secs
            .filter(|&s| s > 0)
            .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS)
    }

    /// Returns the connect timeout in seconds. Defaults to 10.
    pub fn connect_timeout_secs_or_default(&self) -> u64 {
        self.connect_timeout_secs.filter(|&s| s > 0).unwrap_or(10)
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.base_url_or_default(), "http://localhost:5000");
        assert_eq!(cfg.data_dir_or_default(), "./data");
        assert_eq!(cfg.provider_timeout_secs_or_default(), 30);
        assert_eq!(cfg.connect_timeout_secs_or_default(), 10);
        assert!(!cfg.is_ephemeral());
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let cfg = AppConfig {
            provider_timeout_secs: Some(0),
            connect_timeout_secs: Some(3),
            ..Default::default()
        };
        assert_eq!(cfg.provider_timeout_secs_or_default(), 30);
        assert_eq!(cfg.connect_timeout_secs_or_default(), 3);
    }
}
