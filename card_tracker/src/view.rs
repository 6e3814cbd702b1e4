//! Filtering, sorting and totals over the collection
//!
//! The renderer itself lives outside this crate; it receives rows through
//! [`CollectionRenderer`] whenever the view is refreshed.

use std::cmp::Ordering;

use tcg_common::CardSet;

use crate::collection::CollectionStore;
use crate::models::CollectionEntry;
use crate::pricing::round_cents;

/// Filter criteria, AND-combined; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Case-insensitive substring of name, set name or rarity
    pub query: String,
    /// Exact set id
    pub set_id: String,
    /// Exact rarity
    pub rarity: String,
}

impl Filter {
    pub fn matches(&self, entry: &CollectionEntry) -> bool {
        let query = self.query.to_lowercase();
        let matches_query = query.is_empty()
            || entry.name.to_lowercase().contains(&query)
            || entry.set_name.to_lowercase().contains(&query)
            || entry.rarity.to_lowercase().contains(&query);
        let matches_set = self.set_id.is_empty() || entry.set_id == self.set_id;
        let matches_rarity = self.rarity.is_empty() || entry.rarity == self.rarity;

        matches_query && matches_set && matches_rarity
    }
}

/// Entries matching `filter`, in store order
pub fn filter<'a>(entries: &'a [CollectionEntry], filter: &Filter) -> Vec<&'a CollectionEntry> {
    entries.iter().filter(|e| filter.matches(e)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Set,
    Number,
    Rarity,
    Condition,
    /// Compares the condition-adjusted price
    Price,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(SortField::Name),
            "set" => Some(SortField::Set),
            "number" => Some(SortField::Number),
            "rarity" => Some(SortField::Rarity),
            "condition" => Some(SortField::Condition),
            "price" => Some(SortField::Price),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort column; repeated requests for the same field flip direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn request(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Stable sort; equal keys keep their relative order in both directions
pub fn sort(entries: &mut [&CollectionEntry], field: SortField, direction: SortDirection) {
    entries.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &CollectionEntry, b: &CollectionEntry, field: SortField) -> Ordering {
    let text = |e: &CollectionEntry| -> String {
        match field {
            SortField::Name => e.name.to_lowercase(),
            SortField::Set => e.set_name.to_lowercase(),
            SortField::Number => e.number.to_lowercase(),
            SortField::Rarity => e.rarity.to_lowercase(),
            SortField::Condition => e.condition.as_str().to_lowercase(),
            SortField::Price => String::new(),
        }
    };

    match field {
        SortField::Price => a
            .adjusted_price()
            .partial_cmp(&b.adjusted_price())
            .unwrap_or(Ordering::Equal),
        _ => text(a).cmp(&text(b)),
    }
}

/// Count and total adjusted value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollectionStats {
    pub count: usize,
    pub total_value: f64,
}

impl CollectionStats {
    /// Total value with two decimals, e.g. `88.56`
    pub fn formatted_total(&self) -> String {
        format!("{:.2}", round_cents(self.total_value))
    }
}

pub fn stats<'a>(entries: impl IntoIterator<Item = &'a CollectionEntry>) -> CollectionStats {
    entries
        .into_iter()
        .fold(CollectionStats::default(), |mut stats, entry| {
            stats.count += 1;
            stats.total_value += entry.adjusted_price();
            stats
        })
}

/// Choices for the set and rarity drop-downs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub sets: Vec<CardSet>,
    pub rarities: Vec<String>,
}

/// Receives the view whenever it changes
pub trait CollectionRenderer {
    fn render(
        &mut self,
        rows: &[&CollectionEntry],
        stats: &CollectionStats,
        options: &FilterOptions,
    );
}

/// Filter and sort state for the collection table
#[derive(Debug, Clone, Default)]
pub struct ViewEngine {
    filter: Filter,
    sort: SortState,
}

impl ViewEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.to_string();
    }

    pub fn set_set_filter(&mut self, set_id: &str) {
        self.filter.set_id = set_id.to_string();
    }

    pub fn set_rarity_filter(&mut self, rarity: &str) {
        self.filter.rarity = rarity.to_string();
    }

    /// Sort by `field`, flipping direction if it is already the sort field
    pub fn sort_by(&mut self, field: SortField) {
        self.sort.request(field);
        log::debug!("Sorting by {:?} {:?}", field, self.sort.direction);
    }

    /// Filtered, then sorted entries of `store`
    pub fn visible<'a>(&self, store: &'a CollectionStore) -> Vec<&'a CollectionEntry> {
        let mut rows = filter(store.all(), &self.filter);
        if let Some(field) = self.sort.field {
            sort(&mut rows, field, self.sort.direction);
        }
        rows
    }

    /// Push the current rows, whole-collection stats and filter options to `renderer`
    pub fn refresh<R: CollectionRenderer + ?Sized>(
        &self,
        store: &CollectionStore,
        sets: &[CardSet],
        renderer: &mut R,
    ) {
        let rows = self.visible(store);
        let stats = stats(store.all());
        let options = FilterOptions {
            sets: sets.to_vec(),
            rarities: store.rarities(),
        };
        renderer.render(&rows, &stats, &options);
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
