//! Base prices for newly resolved cards
//!
//! Market data wins when the catalog has it. Without it a price is drawn
//! from a rarity-keyed range, which is also what the simulator attaches to
//! fabricated cards.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tcg_common::CardCatalogEntry;

/// Price range for cards of the given rarity
pub fn rarity_price_range(rarity: Option<&str>) -> Range<f64> {
    let (low, spread) = match rarity {
        Some("Common") => (0.5, 2.0),
        Some("Uncommon") => (1.0, 3.0),
        Some("Rare") => (3.0, 10.0),
        Some("Rare Holo") => (5.0, 20.0),
        Some("Ultra Rare") => (15.0, 100.0),
        Some("Secret Rare") => (50.0, 200.0),
        Some(_) => (1.0, 5.0),
        None => (1.0, 20.0),
    };
    low..low + spread
}

/// Random price within the rarity range, rounded to cents
pub fn random_price<R: Rng>(rng: &mut R, rarity: Option<&str>) -> f64 {
    round_cents(rng.random_range(rarity_price_range(rarity)))
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Computes base prices for newly resolved cards
pub struct PriceEstimator {
    rng: StdRng,
}

impl PriceEstimator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic estimator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Market price when known, otherwise a rarity-based estimate
    pub fn base_price(&mut self, card: &CardCatalogEntry) -> f64 {
        if let Some(market) = card.market_price() {
            return round_cents(market);
        }
        let price = random_price(&mut self.rng, card.rarity.as_deref());
        log::debug!(
            "No market price for {}, estimated {:.2} from rarity {:?}",
            card.name,
            price,
            card.rarity
        );
        price
    }
}

impl Default for PriceEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
