//! Sequential processing of uploaded files
//!
//! Files are resolved one at a time; the next file starts only after the
//! previous one has been fully resolved, including any user interaction.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::collection::CollectionStore;
use crate::disambiguation::{
    display_name, DisambiguationFlow, Resolution, ResolutionKind, SelectionPrompt,
};
use crate::models::EntryDraft;
use crate::pricing::PriceEstimator;
use crate::search::CardSearch;

/// Reported before each file is processed
#[derive(Debug, Clone, PartialEq)]
pub struct UploadProgress {
    /// 1-based position in the batch
    pub index: usize,
    pub total: usize,
    pub file_name: String,
}

impl UploadProgress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.index as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Ids of the entries created, in upload order
    pub added: Vec<String>,
    /// How many of the added entries are simulated fallbacks
    pub simulated: usize,
    pub skipped: usize,
    pub abandoned: usize,
    /// Files dropped because they were already queued
    pub duplicates: usize,
}

/// Pending uploads; a file already waiting is not queued twice
#[derive(Debug, Default)]
pub struct UploadQueue {
    pending: VecDeque<PathBuf>,
    duplicates: usize,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue files, returning how many were new
    pub fn enqueue<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        let mut added = 0;
        for file in files {
            let file = file.into();
            if self.pending.contains(&file) {
                log::info!("{} is already queued, ignoring duplicate", file.display());
                self.duplicates += 1;
                continue;
            }
            self.pending.push_back(file);
            added += 1;
        }
        added
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Resolve every queued file in order and add the results to `store`
    pub async fn process<S, P, F>(
        &mut self,
        store: &mut CollectionStore,
        search: &mut S,
        prompt: &mut P,
        pricing: &mut PriceEstimator,
        mut on_progress: F,
    ) -> UploadSummary
    where
        S: CardSearch,
        P: SelectionPrompt,
        F: FnMut(&UploadProgress),
    {
        let total = self.pending.len();
        let mut summary = UploadSummary {
            duplicates: std::mem::take(&mut self.duplicates),
            ..UploadSummary::default()
        };

        let mut index = 0;
        while let Some(file) = self.pending.pop_front() {
            index += 1;
            let file_name = display_name(&file);
            on_progress(&UploadProgress {
                index,
                total,
                file_name: file_name.clone(),
            });
            log::info!("Processing {} ({}/{})", file_name, index, total);

            let resolution = DisambiguationFlow::new(search, prompt).resolve(&file).await;
            match resolution {
                Resolution::Accepted { card, kind } => {
                    let price = pricing.base_price(&card);
                    let draft = EntryDraft::from_catalog(&card, Some(&file_name), price);
                    summary.added.push(store.add(draft));
                    if kind == ResolutionKind::Simulated {
                        summary.simulated += 1;
                    }
                }
                Resolution::Skipped => {
                    log::info!("Skipped {}", file_name);
                    summary.skipped += 1;
                }
                Resolution::Abandoned => {
                    log::info!("No card chosen for {}", file_name);
                    summary.abandoned += 1;
                }
            }
        }

        summary
    }
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
