//! Error types for card_tracker

use tcg_common::CatalogError;
use thiserror::Error;

/// Unified error type for card_tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Catalog lookup failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Uploaded path has no usable file name
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
    /// A search backend failed outside its no-throw contract
    #[error("Search failed: {0}")]
    Search(String),
}

/// Result alias for card_tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
