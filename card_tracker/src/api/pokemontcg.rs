//! Pokémon TCG API client
//!
//! Uses async reqwest. Any non-2xx status or body that does not parse as
//! `{ "data": [...] }` is reported as an error; callers decide how to degrade.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tcg_common::{CardCatalogEntry, CardSet, CatalogError, CatalogResponse, CatalogResult};

use crate::config::TrackerConfig;

const USER_AGENT: &str = "card_tracker/0.1";

/// Name used for the connectivity probe before each search
const PROBE_NAME: &str = "Pikachu";

pub struct CatalogClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl CatalogClient {
    pub fn new(config: &TrackerConfig) -> CatalogResult<Self> {
        log::info!("Creating catalog client for {}", config.api_base_url);
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client against an arbitrary base URL with default settings
    pub fn with_base_url(base_url: &str, api_key: &str) -> CatalogResult<Self> {
        let config = TrackerConfig {
            api_base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            ..TrackerConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every set the catalog knows about
    pub async fn fetch_sets(&self) -> CatalogResult<Vec<CardSet>> {
        let response: CatalogResponse<CardSet> = self.get_list("sets", &[]).await?;
        log::info!("Loaded {} sets from catalog", response.data.len());
        Ok(response.data)
    }

    /// Search cards by exact name, capped at `page_size` results
    pub async fn search_cards(
        &self,
        name: &str,
        page_size: usize,
    ) -> CatalogResult<Vec<CardCatalogEntry>> {
        let query = name_query(name);
        let page_size = page_size.to_string();
        let params = [("q", query.as_str()), ("pageSize", page_size.as_str())];
        let response: CatalogResponse<CardCatalogEntry> = self.get_list("cards", &params).await?;
        log::debug!(
            "Catalog returned {} card(s) for '{}'",
            response.data.len(),
            name
        );
        Ok(response.data)
    }

    /// Lightweight connectivity check: a one-result search for a known card
    pub async fn probe(&self) -> CatalogResult<()> {
        match self.search_cards(PROBE_NAME, 1).await {
            Ok(_) => Ok(()),
            Err(e) => Err(CatalogError::Unavailable(format!("probe failed: {}", e))),
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> CatalogResult<CatalogResponse<T>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url).query(query);
        if !self.api_key.is_empty() {
            request = request.header("X-Api-Key", &self.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!(
                "Catalog request to {} failed with {}: {}",
                url,
                status,
                body
            );
            return Err(CatalogError::HttpStatus(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// `name:"<name>"` search expression; embedded quotes would end the phrase
fn name_query(name: &str) -> String {
    format!("name:\"{}\"", name.replace('"', ""))
}

#[cfg(test)]
#[path = "pokemontcg_tests.rs"]
mod tests;
