use std::fmt;
use tcg_common::CardCatalogEntry;

/// Rarities offered by the rarity filter when the collection is empty
pub const STANDARD_RARITIES: [&str; 6] = [
    "Common",
    "Uncommon",
    "Rare",
    "Rare Holo",
    "Ultra Rare",
    "Secret Rare",
];

/// Physical condition of an owned card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Condition {
    Mint,
    #[default]
    NearMint,
    Excellent,
    Good,
    Played,
    Damaged,
}

impl Condition {
    /// Returns the display name (e.g., "Near Mint")
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Mint => "Mint",
            Condition::NearMint => "Near Mint",
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::Played => "Played",
            Condition::Damaged => "Damaged",
        }
    }

    /// Share of the base price a card in this condition is worth
    pub fn multiplier(&self) -> f64 {
        match self {
            Condition::Mint => 1.0,
            Condition::NearMint => 0.85,
            Condition::Excellent => 0.7,
            Condition::Good => 0.5,
            Condition::Played => 0.3,
            Condition::Damaged => 0.15,
        }
    }

    /// Parse a display name, case-insensitively ("near mint", "Near Mint")
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Returns all conditions, best first
    pub fn all() -> &'static [Condition] {
        &[
            Condition::Mint,
            Condition::NearMint,
            Condition::Excellent,
            Condition::Good,
            Condition::Played,
            Condition::Damaged,
        ]
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiplier for a condition given by name; unrecognized names count as 1.0
pub fn condition_multiplier(condition: &str) -> f64 {
    Condition::parse(condition)
        .map(|c| c.multiplier())
        .unwrap_or(1.0)
}

/// Badge colors for a rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RarityColor {
    pub background: &'static str,
    pub text: &'static str,
}

impl RarityColor {
    /// `text` as a badge using 24-bit ANSI colors
    pub fn paint(&self, text: &str) -> String {
        match (hex_rgb(self.background), hex_rgb(self.text)) {
            (Some((br, bg, bb)), Some((fr, fg, fb))) => format!(
                "\x1b[48;2;{br};{bg};{bb}m\x1b[38;2;{fr};{fg};{fb}m{text}\x1b[0m"
            ),
            _ => text.to_string(),
        }
    }
}

/// `#rrggbb` to its channels
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

const NEUTRAL_COLOR: RarityColor = RarityColor {
    background: "#e5e7eb",
    text: "#374151",
};

/// Badge colors for a rarity, neutral grey for anything unknown
pub fn rarity_color(rarity: &str) -> RarityColor {
    let (background, text) = match rarity {
        "Common" => ("#e5e7eb", "#374151"),
        "Uncommon" => ("#dcfce7", "#166534"),
        "Rare" => ("#fef3c7", "#92400e"),
        "Rare Holo" => ("#ddd6fe", "#5b21b6"),
        "Ultra Rare" => ("#fce7f3", "#be185d"),
        "Secret Rare" => ("#f3e8ff", "#7c3aed"),
        _ => return NEUTRAL_COLOR,
    };
    RarityColor { background, text }
}

/// An owned card in the collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry {
    pub id: String,
    pub card_id: String,
    pub name: String,
    pub set_name: String,
    pub set_id: String,
    pub number: String,
    pub rarity: String,
    pub condition: Condition,
    pub image: String,
    pub image_hi: String,
    /// Snapshot taken when the card was added, never recomputed
    pub base_price: f64,
    pub origin_file: String,
}

impl CollectionEntry {
    /// Base price scaled by the condition multiplier
    pub fn adjusted_price(&self) -> f64 {
        self.base_price * self.condition.multiplier()
    }
}

/// A collection entry before the store has assigned its id
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub card_id: String,
    pub name: String,
    pub set_name: String,
    pub set_id: String,
    pub number: String,
    pub rarity: String,
    pub condition: Condition,
    pub image: String,
    pub image_hi: String,
    pub base_price: f64,
    pub origin_file: String,
}

impl EntryDraft {
    /// Materialize a catalog record as a Near Mint draft
    pub fn from_catalog(
        card: &CardCatalogEntry,
        origin_file: Option<&str>,
        base_price: f64,
    ) -> Self {
        let card_id = if card.id.is_empty() {
            uuid::Uuid::new_v4().simple().to_string()
        } else {
            card.id.clone()
        };

        Self {
            card_id,
            name: card.name.clone(),
            set_name: card.set_name().unwrap_or("Unknown Set").to_string(),
            set_id: card.set_id().unwrap_or_default().to_string(),
            number: card
                .number
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            rarity: card
                .rarity
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            condition: Condition::NearMint,
            image: card.small_image().unwrap_or_default().to_string(),
            image_hi: card.large_image().unwrap_or_default().to_string(),
            base_price,
            origin_file: origin_file.unwrap_or("unknown.jpg").to_string(),
        }
    }

    pub(crate) fn into_entry(self, id: String) -> CollectionEntry {
        CollectionEntry {
            id,
            card_id: self.card_id,
            name: self.name,
            set_name: self.set_name,
            set_id: self.set_id,
            number: self.number,
            rarity: self.rarity,
            condition: self.condition,
            image: self.image,
            image_hi: self.image_hi,
            base_price: self.base_price,
            origin_file: self.origin_file,
        }
    }
}
