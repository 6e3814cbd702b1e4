//! Runtime configuration

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.pokemontcg.io/v2";
pub const API_KEY_ENV: &str = "POKEMONTCG_API_KEY";
pub const API_URL_ENV: &str = "POKEMONTCG_API_URL";

/// Settings shared by the catalog client, the simulator and the view
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub api_base_url: String,
    /// Sent as `X-Api-Key` when non-empty
    pub api_key: String,
    /// Result cap for name searches
    pub page_size: usize,
    pub request_timeout: Duration,
    /// Quiet period before a search-box change is applied
    pub debounce: Duration,
    /// Never touch the network; always use simulated catalog data
    pub offline: bool,
    /// Seed for the simulator and price estimator, random when `None`
    pub seed: Option<u64>,
    /// Start with the demonstration entries in the collection
    pub load_demo: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            page_size: 10,
            request_timeout: Duration::from_secs(10),
            debounce: Duration::from_millis(300),
            offline: false,
            seed: None,
            load_demo: true,
        }
    }
}

impl TrackerConfig {
    /// Defaults overridden by `POKEMONTCG_API_KEY` / `POKEMONTCG_API_URL`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            log::debug!("API key length: {}", key.len());
            config.api_key = key;
        }
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        config
    }
}
