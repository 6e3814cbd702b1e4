//! API clients for external services (Pokémon TCG catalog)

pub mod pokemontcg;

pub use pokemontcg::CatalogClient;
