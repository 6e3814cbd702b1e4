//! Shared types for trading card collection tracking
//!
//! Catalog records as delivered by the Pokémon TCG API (or fabricated by the
//! simulator when the API is unreachable), plus the catalog error type.

pub mod catalog;
pub mod error;

pub use catalog::{
    CardCatalogEntry, CardImages, CardSet, CatalogResponse, FinishPrice, TcgPlayer,
    FINISH_PREFERENCE,
};
pub use error::{CatalogError, CatalogResult};
