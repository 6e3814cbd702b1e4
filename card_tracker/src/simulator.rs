//! Local stand-in for the catalog when the API is unreachable
//!
//! Fabricated cards get a random set, rarity, collector number and a
//! rarity-tiered market price. Well-known names also produce a variant from
//! a different set with a different rarity, so the user gets a choice.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tcg_common::{CardCatalogEntry, CardSet, FinishPrice, TcgPlayer};

use crate::models::STANDARD_RARITIES;
use crate::pricing::random_price;

/// Sets used when the live set list cannot be loaded
pub const FALLBACK_SETS: [(&str, &str); 10] = [
    ("swsh1", "Sword & Shield"),
    ("swsh2", "Rebel Clash"),
    ("swsh3", "Darkness Ablaze"),
    ("swsh4", "Vivid Voltage"),
    ("sm1", "Sun & Moon"),
    ("sm2", "Guardians Rising"),
    ("xy1", "XY Base Set"),
    ("xy2", "Flashfire"),
    ("bw1", "Black & White"),
    ("dp1", "Diamond & Pearl"),
];

/// Rarities a fabricated primary result can have
const SIMULATED_RARITIES: [&str; 5] = ["Common", "Uncommon", "Rare", "Rare Holo", "Ultra Rare"];

/// Names popular enough to have been printed in several sets
const WELL_KNOWN_NAMES: [&str; 5] = ["Pikachu", "Charizard", "Blastoise", "Venusaur", "Mewtwo"];

pub fn fallback_sets() -> Vec<CardSet> {
    FALLBACK_SETS
        .iter()
        .map(|(id, name)| CardSet::new(id, name))
        .collect()
}

pub struct CardSimulator {
    sets: Vec<CardSet>,
    rng: StdRng,
}

impl CardSimulator {
    pub fn new(sets: Vec<CardSet>) -> Self {
        Self {
            sets,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic simulator for reproducible runs
    pub fn seeded(sets: Vec<CardSet>, seed: u64) -> Self {
        Self {
            sets,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_sets(&mut self, sets: Vec<CardSet>) {
        self.sets = sets;
    }

    pub fn sets(&self) -> &[CardSet] {
        &self.sets
    }

    /// Fabricate a complete catalog entry for `name`
    pub fn simulate_card(&mut self, name: &str) -> CardCatalogEntry {
        let set = self
            .sets
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| fallback_sets().swap_remove(0));
        let rarity = SIMULATED_RARITIES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("Common");
        let number = format!(
            "{}/{}",
            self.rng.random_range(1..=150),
            self.rng.random_range(100..300)
        );
        let id_bytes: [u8; 16] = self.rng.random();
        let id = uuid::Builder::from_random_bytes(id_bytes).into_uuid();

        let mut card = CardCatalogEntry {
            id: format!("sim-{}", id.simple()),
            name: name.to_string(),
            set: Some(set),
            number: Some(number),
            rarity: Some(rarity.to_string()),
            images: None,
            tcgplayer: None,
        };
        self.reprice(&mut card);

        log::debug!(
            "Simulated card {} ({} / {})",
            card.name,
            card.set_id().unwrap_or_default(),
            rarity
        );
        card
    }

    /// One fabricated result, two for well-known names
    pub fn simulate_search(&mut self, name: &str) -> Vec<CardCatalogEntry> {
        let primary = self.simulate_card(name);
        let mut results = Vec::with_capacity(2);

        if is_well_known(name) {
            let mut variant = self.simulate_card(name);

            let alternative_sets: Vec<&CardSet> = self
                .sets
                .iter()
                .filter(|s| Some(s.id.as_str()) != primary.set_id())
                .collect();
            variant.set = alternative_sets
                .choose(&mut self.rng)
                .map(|s| (*s).clone())
                .or_else(|| {
                    fallback_sets()
                        .into_iter()
                        .find(|s| Some(s.id.as_str()) != primary.set_id())
                });

            let alternative_rarities: Vec<&str> = STANDARD_RARITIES
                .iter()
                .copied()
                .filter(|r| Some(*r) != primary.rarity.as_deref())
                .collect();
            if let Some(rarity) = alternative_rarities.choose(&mut self.rng) {
                variant.rarity = Some(rarity.to_string());
            }
            self.reprice(&mut variant);

            results.push(primary);
            results.push(variant);
        } else {
            results.push(primary);
        }

        log::info!(
            "Simulated {} search result(s) for '{}'",
            results.len(),
            name
        );
        results
    }

    /// Attach a rarity-tiered market price as normal-finish TCGplayer data
    fn reprice(&mut self, card: &mut CardCatalogEntry) {
        let price = random_price(&mut self.rng, card.rarity.as_deref());
        let mut prices = BTreeMap::new();
        prices.insert(
            "normal".to_string(),
            FinishPrice {
                market: Some(price),
                ..FinishPrice::default()
            },
        );
        card.tcgplayer = Some(TcgPlayer {
            url: None,
            updated_at: None,
            prices,
        });
    }
}

fn is_well_known(name: &str) -> bool {
    let lower = name.to_lowercase();
    WELL_KNOWN_NAMES
        .iter()
        .any(|known| lower.contains(&known.to_lowercase()))
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod tests;
