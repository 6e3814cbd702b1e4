//! Card search with graceful degradation to simulated results

use tcg_common::{CardCatalogEntry, CardSet};

use crate::api::CatalogClient;
use crate::config::TrackerConfig;
use crate::error::Result;
use crate::simulator::{fallback_sets, CardSimulator};

/// Search backend seen by the disambiguation flow
#[allow(async_fn_in_trait)]
pub trait CardSearch {
    /// Look up cards by name
    async fn search(&mut self, name: &str) -> Result<Vec<CardCatalogEntry>>;

    /// Fabricate a card for `name` when resolution fails outright
    fn simulate_card(&mut self, name: &str) -> CardCatalogEntry;
}

/// Catalog search that never fails: transport problems fall back to the simulator
pub struct CardSearchService {
    client: Option<CatalogClient>,
    simulator: CardSimulator,
    page_size: usize,
}

impl CardSearchService {
    /// Online service; `config.offline` disables the client entirely
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let client = if config.offline {
            log::info!("Offline mode, catalog lookups will be simulated");
            None
        } else {
            Some(CatalogClient::new(config)?)
        };
        let simulator = match config.seed {
            Some(seed) => CardSimulator::seeded(fallback_sets(), seed),
            None => CardSimulator::new(fallback_sets()),
        };
        Ok(Self {
            client,
            simulator,
            page_size: config.page_size,
        })
    }

    /// Service without a catalog client, always simulating
    pub fn offline(simulator: CardSimulator) -> Self {
        Self {
            client: None,
            simulator,
            page_size: TrackerConfig::default().page_size,
        }
    }

    pub fn with_client(client: CatalogClient, simulator: CardSimulator, page_size: usize) -> Self {
        Self {
            client: Some(client),
            simulator,
            page_size,
        }
    }

    /// Known sets; the fallback list until [`load_sets`](Self::load_sets) succeeds
    pub fn sets(&self) -> &[CardSet] {
        self.simulator.sets()
    }

    /// Load the set list from the catalog, keeping the fallback list on any failure
    pub async fn load_sets(&mut self) -> &[CardSet] {
        let sets = match &self.client {
            Some(client) => match client.fetch_sets().await {
                Ok(sets) if !sets.is_empty() => sets,
                Ok(_) => {
                    log::warn!("Catalog returned no sets, using fallback data");
                    fallback_sets()
                }
                Err(e) => {
                    log::error!(
                        "Failed to load sets from catalog, using fallback data: {}",
                        e
                    );
                    fallback_sets()
                }
            },
            None => fallback_sets(),
        };
        self.simulator.set_sets(sets);
        self.simulator.sets()
    }

    /// Catalog results for `name`, or simulated ones when the catalog is unavailable.
    ///
    /// Empty only when the live catalog legitimately has no match.
    pub async fn search_catalog(&mut self, name: &str) -> Vec<CardCatalogEntry> {
        let Some(client) = &self.client else {
            return self.simulator.simulate_search(name);
        };

        if let Err(e) = client.probe().await {
            log::warn!("{}, simulating results for '{}'", e, name);
            return self.simulator.simulate_search(name);
        }

        match client.search_cards(name, self.page_size).await {
            Ok(cards) => {
                log::info!("Found {} card(s) for '{}'", cards.len(), name);
                cards
            }
            Err(e) => {
                log::error!("Error searching cards for '{}': {}", name, e);
                self.simulator.simulate_search(name)
            }
        }
    }
}

impl CardSearch for CardSearchService {
    async fn search(&mut self, name: &str) -> Result<Vec<CardCatalogEntry>> {
        Ok(self.search_catalog(name).await)
    }

    fn simulate_card(&mut self, name: &str) -> CardCatalogEntry {
        self.simulator.simulate_card(name)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
