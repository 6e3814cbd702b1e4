//! In-memory collection of owned cards

use crate::models::{CollectionEntry, Condition, EntryDraft, STANDARD_RARITIES};

/// Owned cards in insertion order. Ids are unique within the store.
#[derive(Debug, Default)]
pub struct CollectionStore {
    entries: Vec<CollectionEntry>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card under a fresh id and return that id
    pub fn add(&mut self, draft: EntryDraft) -> String {
        let id = self.fresh_id();
        log::info!("Adding {} ({}) as {}", draft.name, draft.set_name, id);
        self.entries.push(draft.into_entry(id.clone()));
        id
    }

    /// Change the condition of an entry; unknown ids are ignored
    pub fn update_condition(&mut self, id: &str, condition: Condition) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                log::debug!("{}: {} -> {}", id, entry.condition, condition);
                entry.condition = condition;
                true
            }
            None => {
                log::debug!("Ignoring condition update for unknown id {}", id);
                false
            }
        }
    }

    /// Remove an entry; unknown ids leave the store unchanged
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    pub fn all(&self) -> &[CollectionEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CollectionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct rarities in first-seen order, the standard list when empty
    pub fn rarities(&self) -> Vec<String> {
        let mut rarities: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !entry.rarity.is_empty() && !rarities.contains(&entry.rarity) {
                rarities.push(entry.rarity.clone());
            }
        }
        if rarities.is_empty() {
            return STANDARD_RARITIES.iter().map(|r| r.to_string()).collect();
        }
        rarities
    }

    /// Add the two demonstration cards shown on first start
    pub fn load_demo(&mut self) {
        for draft in demo_entries() {
            self.add(draft);
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().simple().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn demo_entries() -> Vec<EntryDraft> {
    vec![
        EntryDraft {
            card_id: "swsh4-25".to_string(),
            name: "Pikachu".to_string(),
            set_name: "Vivid Voltage".to_string(),
            set_id: "swsh4".to_string(),
            number: "25/185".to_string(),
            rarity: "Common".to_string(),
            condition: Condition::NearMint,
            image: "https://images.pokemontcg.io/swsh4/25.png".to_string(),
            image_hi: "https://images.pokemontcg.io/swsh4/25_hires.png".to_string(),
            base_price: 1.25,
            origin_file: "pikachu.jpg".to_string(),
        },
        EntryDraft {
            card_id: "swsh1-20".to_string(),
            name: "Charizard VMAX".to_string(),
            set_name: "Sword & Shield".to_string(),
            set_id: "swsh1".to_string(),
            number: "20/73".to_string(),
            rarity: "Ultra Rare".to_string(),
            condition: Condition::Mint,
            image: "https://images.pokemontcg.io/swsh1/20.png".to_string(),
            image_hi: "https://images.pokemontcg.io/swsh1/20_hires.png".to_string(),
            base_price: 87.50,
            origin_file: "charizard.jpg".to_string(),
        },
    ]
}
