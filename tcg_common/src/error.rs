//! Error types for catalog lookups

use thiserror::Error;

/// Failure talking to the card catalog service
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Connectivity check against the catalog failed
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
