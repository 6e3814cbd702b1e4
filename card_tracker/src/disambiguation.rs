//! Resolving an uploaded file to at most one catalog card
//!
//! The number of search results picks the starting state:
//!
//! - none: manual search, the user types queries until something is found,
//!   then picks from the results (or gives up),
//! - exactly one: accepted immediately,
//! - several: the user picks one or skips.
//!
//! Any error along the way ends in a simulated card built from the file
//! name, so an upload is never silently dropped.

use std::path::Path;

use tcg_common::CardCatalogEntry;

use crate::error::{Result, TrackerError};
use crate::name_extractor::extract_card_name;
use crate::search::CardSearch;

/// Answer to a candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Pick(usize),
    /// Also what closing the dialog means
    Skip,
}

/// User interaction needed by the flow, implemented by the front end
pub trait SelectionPrompt {
    /// Pick one of `candidates` found for `query`, or skip
    fn choose(&mut self, query: &str, candidates: &[CardCatalogEntry]) -> Choice;

    /// Ask for a manual search term; `None` abandons the file
    fn manual_query(&mut self, original_name: &str) -> Option<String>;

    /// A manual search found nothing
    fn no_results(&mut self, _query: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Single search result
    Auto,
    /// Picked by the user from several candidates
    Selected,
    /// Fabricated after a processing failure
    Simulated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Accepted {
        card: CardCatalogEntry,
        kind: ResolutionKind,
    },
    /// User skipped the candidates
    Skipped,
    /// User gave up on manual search
    Abandoned,
}

enum FlowState {
    ManualSearch,
    Selecting {
        query: String,
        candidates: Vec<CardCatalogEntry>,
    },
    Done(Resolution),
}

impl FlowState {
    fn from_results(query: &str, mut results: Vec<CardCatalogEntry>) -> Self {
        match results.len() {
            0 => FlowState::ManualSearch,
            1 => FlowState::Done(Resolution::Accepted {
                card: results.remove(0),
                kind: ResolutionKind::Auto,
            }),
            _ => FlowState::Selecting {
                query: query.to_string(),
                candidates: results,
            },
        }
    }
}

pub struct DisambiguationFlow<'a, S, P> {
    search: &'a mut S,
    prompt: &'a mut P,
}

impl<'a, S: CardSearch, P: SelectionPrompt> DisambiguationFlow<'a, S, P> {
    pub fn new(search: &'a mut S, prompt: &'a mut P) -> Self {
        Self { search, prompt }
    }

    /// Resolve one uploaded file; errors become a simulated card
    pub async fn resolve(&mut self, file: &Path) -> Resolution {
        match self.try_resolve(file).await {
            Ok(resolution) => resolution,
            Err(e) => {
                log::error!("Error processing {}: {}", file.display(), e);
                let name = extract_card_name(&display_name(file));
                Resolution::Accepted {
                    card: self.search.simulate_card(&name),
                    kind: ResolutionKind::Simulated,
                }
            }
        }
    }

    async fn try_resolve(&mut self, file: &Path) -> Result<Resolution> {
        let file_name = file_name(file)?;
        let name = extract_card_name(file_name);
        log::info!("Resolving {} as '{}'", file_name, name);

        let results = self.search.search(&name).await?;
        let mut state = FlowState::from_results(&name, results);

        loop {
            state = match state {
                FlowState::Done(resolution) => return Ok(resolution),
                FlowState::Selecting { query, candidates } => {
                    FlowState::Done(self.select(&query, candidates))
                }
                FlowState::ManualSearch => match self.prompt.manual_query(&name) {
                    None => {
                        log::info!("Manual search for '{}' abandoned", name);
                        FlowState::Done(Resolution::Abandoned)
                    }
                    Some(query) if query.trim().is_empty() => FlowState::ManualSearch,
                    Some(query) => {
                        let query = query.trim();
                        let results = self.search.search(query).await?;
                        if results.is_empty() {
                            self.prompt.no_results(query);
                            FlowState::ManualSearch
                        } else {
                            FlowState::Selecting {
                                query: query.to_string(),
                                candidates: results,
                            }
                        }
                    }
                },
            };
        }
    }

    fn select(&mut self, query: &str, mut candidates: Vec<CardCatalogEntry>) -> Resolution {
        match self.prompt.choose(query, &candidates) {
            Choice::Pick(index) if index < candidates.len() => Resolution::Accepted {
                card: candidates.swap_remove(index),
                kind: ResolutionKind::Selected,
            },
            Choice::Pick(index) => {
                log::warn!(
                    "Selection {} out of range for {} candidates, skipping",
                    index,
                    candidates.len()
                );
                Resolution::Skipped
            }
            Choice::Skip => Resolution::Skipped,
        }
    }
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| TrackerError::InvalidFileName(path.display().to_string()))
}

/// Best-effort name for the simulated fallback
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "disambiguation_tests.rs"]
mod tests;
