//! Card Tracker - trading card collection tracking
//!
//! Turns uploaded card image file names into catalog records, prices them
//! by condition, and offers filtered/sorted views and CSV export of the
//! resulting collection.

pub mod api;
pub mod collection;
pub mod config;
pub mod console;
pub mod debounce;
pub mod disambiguation;
pub mod error;
pub mod export;
pub mod models;
pub mod name_extractor;
pub mod pricing;
pub mod search;
pub mod simulator;
pub mod tracker;
pub mod upload;
pub mod view;

// Re-export commonly used items
pub use collection::CollectionStore;
pub use config::TrackerConfig;
pub use disambiguation::{Choice, DisambiguationFlow, Resolution, ResolutionKind, SelectionPrompt};
pub use error::{Result, TrackerError};
pub use models::{CollectionEntry, Condition, EntryDraft};
pub use name_extractor::extract_card_name;
pub use pricing::PriceEstimator;
pub use search::{CardSearch, CardSearchService};
pub use tracker::CardTracker;
pub use upload::{UploadProgress, UploadQueue, UploadSummary};
pub use view::{CollectionRenderer, Filter, SortDirection, SortField, ViewEngine};
