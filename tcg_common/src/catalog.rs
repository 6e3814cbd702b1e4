//! Catalog records in the shape of the Pokémon TCG API v2

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Finish types consulted for a market price, most valuable first
pub const FINISH_PREFERENCE: [&str; 3] = ["holofoil", "reverseHolofoil", "normal"];

/// Response envelope used by every list endpoint: `{ "data": [...] }`
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// A card set (expansion)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CardSet {
    pub id: String,
    pub name: String,
}

impl CardSet {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct CardImages {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Price points for a single finish (normal, holofoil, ...)
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinishPrice {
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub mid: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub market: Option<f64>,
}

/// TCGplayer market data, keyed by finish type
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TcgPlayer {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub prices: BTreeMap<String, FinishPrice>,
}

/// Card record from the external catalog or the local simulator
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CardCatalogEntry {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub set: Option<CardSet>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub images: Option<CardImages>,
    #[serde(default)]
    pub tcgplayer: Option<TcgPlayer>,
}

impl CardCatalogEntry {
    /// Set name; an empty name counts as missing
    pub fn set_name(&self) -> Option<&str> {
        self.set.as_ref().and_then(|s| non_empty(&s.name))
    }

    pub fn set_id(&self) -> Option<&str> {
        self.set.as_ref().and_then(|s| non_empty(&s.id))
    }

    pub fn small_image(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.small.as_deref())
            .and_then(non_empty)
    }

    /// High resolution image, falling back to the small one
    pub fn large_image(&self) -> Option<&str> {
        let images = self.images.as_ref()?;
        images
            .large
            .as_deref()
            .and_then(non_empty)
            .or_else(|| self.small_image())
    }

    /// First positive market price following [`FINISH_PREFERENCE`]
    pub fn market_price(&self) -> Option<f64> {
        let prices = &self.tcgplayer.as_ref()?.prices;
        FINISH_PREFERENCE.iter().find_map(|finish| {
            let market = prices.get(*finish)?.market?;
            if market > 0.0 {
                log::debug!(
                    "Using {} market price {:.2} for {}",
                    finish,
                    market,
                    self.name
                );
                Some(market)
            } else {
                None
            }
        })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_prices(json_prices: serde_json::Value) -> CardCatalogEntry {
        serde_json::from_value(serde_json::json!({
            "id": "swsh4-25",
            "name": "Pikachu",
            "set": { "id": "swsh4", "name": "Vivid Voltage", "series": "Sword & Shield" },
            "number": "25",
            "rarity": "Common",
            "tcgplayer": { "prices": json_prices }
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_minimal_card() {
        let card: CardCatalogEntry = serde_json::from_str(r#"{ "name": "Mew" }"#).unwrap();
        assert_eq!(card.name, "Mew");
        assert!(card.set.is_none());
        assert!(card.market_price().is_none());
        assert_eq!(card.large_image(), None);
    }

    #[test]
    fn market_price_prefers_holofoil() {
        let card = card_with_prices(serde_json::json!({
            "normal": { "market": 0.4 },
            "holofoil": { "market": 3.1 },
            "reverseHolofoil": { "market": 1.2 }
        }));
        assert_eq!(card.market_price(), Some(3.1));
    }

    #[test]
    fn market_price_falls_through_missing_finishes() {
        let card = card_with_prices(serde_json::json!({
            "holofoil": { "low": 2.0, "market": null },
            "normal": { "market": 0.25 }
        }));
        assert_eq!(card.market_price(), Some(0.25));
    }

    #[test]
    fn market_price_ignores_unknown_finishes() {
        let card = card_with_prices(serde_json::json!({
            "1stEditionHolofoil": { "market": 900.0 }
        }));
        assert_eq!(card.market_price(), None);
    }

    #[test]
    fn large_image_falls_back_to_small() {
        let card: CardCatalogEntry = serde_json::from_value(serde_json::json!({
            "name": "Pikachu",
            "images": { "small": "https://images.example/25.png" }
        }))
        .unwrap();
        assert_eq!(card.large_image(), Some("https://images.example/25.png"));
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let card: CardCatalogEntry = serde_json::from_value(serde_json::json!({
            "name": "Pikachu",
            "images": { "small": "s.png", "large": "" },
            "set": { "id": "", "name": "" }
        }))
        .unwrap();
        assert_eq!(card.large_image(), Some("s.png"));
        assert_eq!(card.set_name(), None);
        assert_eq!(card.set_id(), None);
    }

    #[test]
    fn empty_small_image_is_missing_too() {
        let card: CardCatalogEntry = serde_json::from_value(serde_json::json!({
            "name": "Pikachu",
            "images": { "small": "", "large": "" }
        }))
        .unwrap();
        assert_eq!(card.small_image(), None);
        assert_eq!(card.large_image(), None);
    }

    #[test]
    fn catalog_response_envelope() {
        let response: CatalogResponse<CardSet> = serde_json::from_str(
            r#"{ "data": [ { "id": "swsh1", "name": "Sword & Shield" } ], "totalCount": 1 }"#,
        )
        .unwrap();
        assert_eq!(response.data, vec![CardSet::new("swsh1", "Sword & Shield")]);
        assert_eq!(response.total_count, Some(1));
    }
}
