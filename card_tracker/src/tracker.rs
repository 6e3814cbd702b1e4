//! The collection tracker: one owner for store, search, pricing and view

use std::path::{Path, PathBuf};

use tcg_common::CardSet;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::collection::CollectionStore;
use crate::config::TrackerConfig;
use crate::debounce::spawn_debouncer;
use crate::disambiguation::SelectionPrompt;
use crate::error::Result;
use crate::export;
use crate::models::{CollectionEntry, Condition};
use crate::pricing::PriceEstimator;
use crate::search::CardSearchService;
use crate::upload::{UploadProgress, UploadQueue, UploadSummary};
use crate::view::{self, CollectionRenderer, CollectionStats, SortField, ViewEngine};

pub struct CardTracker {
    config: TrackerConfig,
    store: CollectionStore,
    search: CardSearchService,
    pricing: PriceEstimator,
    view: ViewEngine,
    queue: UploadQueue,
}

impl CardTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let search = CardSearchService::new(&config)?;
        Ok(Self::with_search(config, search))
    }

    /// Tracker around an already configured search service
    pub fn with_search(config: TrackerConfig, search: CardSearchService) -> Self {
        let pricing = match config.seed {
            Some(seed) => PriceEstimator::seeded(seed.wrapping_add(1)),
            None => PriceEstimator::new(),
        };
        Self {
            config,
            store: CollectionStore::new(),
            search,
            pricing,
            view: ViewEngine::new(),
            queue: UploadQueue::new(),
        }
    }

    /// Load the set list (or fallback) and the demonstration entries
    pub async fn init(&mut self) {
        let count = self.search.load_sets().await.len();
        log::info!("{} sets available for filtering", count);
        if self.config.load_demo {
            self.store.load_demo();
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn sets(&self) -> &[CardSet] {
        self.search.sets()
    }

    /// Queue files and resolve everything queued, one file at a time
    pub async fn upload<I, P, F>(
        &mut self,
        files: I,
        prompt: &mut P,
        on_progress: F,
    ) -> UploadSummary
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
        P: SelectionPrompt,
        F: FnMut(&UploadProgress),
    {
        let queued = self.queue.enqueue(files);
        log::info!("Queued {} file(s)", queued);
        let summary = self
            .queue
            .process(
                &mut self.store,
                &mut self.search,
                prompt,
                &mut self.pricing,
                on_progress,
            )
            .await;
        log::info!(
            "Upload finished: {} added ({} simulated), {} skipped, {} abandoned, {} duplicate(s)",
            summary.added.len(),
            summary.simulated,
            summary.skipped,
            summary.abandoned,
            summary.duplicates
        );
        summary
    }

    pub fn update_condition(&mut self, id: &str, condition: Condition) -> bool {
        self.store.update_condition(id, condition)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.store.remove(id)
    }

    pub fn view(&self) -> &ViewEngine {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewEngine {
        &mut self.view
    }

    pub fn sort_by(&mut self, field: SortField) {
        self.view.sort_by(field);
    }

    /// Debouncer for search-box input using the configured quiet period
    pub fn query_debouncer<F>(&self, apply: F) -> (UnboundedSender<String>, JoinHandle<()>)
    where
        F: FnMut(String) + Send + 'static,
    {
        spawn_debouncer(self.config.debounce, apply)
    }

    /// Rows after the current filter and sort
    pub fn visible(&self) -> Vec<&CollectionEntry> {
        self.view.visible(&self.store)
    }

    /// Stats over the whole collection
    pub fn stats(&self) -> CollectionStats {
        view::stats(self.store.all())
    }

    pub fn refresh<R: CollectionRenderer + ?Sized>(&self, renderer: &mut R) {
        self.view.refresh(&self.store, self.search.sets(), renderer);
    }

    /// CSV of the whole collection in store order
    pub fn export_csv(&self) -> Result<String> {
        export::to_csv_string(self.store.all())
    }

    pub fn export_to(&self, path: &Path) -> Result<usize> {
        export::write_csv(path, self.store.all())
    }
}
