//! Line-based terminal front end
//!
//! [`ConsolePrompt`] answers the disambiguation flow from text input and
//! [`TableRenderer`] prints the collection view. Both are generic over their
//! streams so the binary hands them stdin/stdout.

use std::io::{BufRead, Write};

use tcg_common::CardCatalogEntry;

use crate::disambiguation::{Choice, SelectionPrompt};
use crate::export::format_price;
use crate::models::{rarity_color, CollectionEntry};
use crate::view::{CollectionRenderer, CollectionStats, FilterOptions};

/// Width of the rarity column
const RARITY_WIDTH: usize = 12;

/// Numbered candidate prompt; end of input closes the dialog
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    /// A non-interactive prompt skips every choice without reading input
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
        }
    }

    /// Next line without its terminator, `None` at end of input
    fn read_line(&mut self) -> Option<String> {
        write!(self.output, "> ").ok();
        self.output.flush().ok();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> SelectionPrompt for ConsolePrompt<R, W> {
    fn choose(&mut self, query: &str, candidates: &[CardCatalogEntry]) -> Choice {
        if !self.interactive {
            log::info!("Skipping {} candidates for '{}'", candidates.len(), query);
            return Choice::Skip;
        }

        writeln!(
            self.output,
            "Multiple cards found for \"{query}\". Please select the correct one:"
        )
        .ok();
        for (i, card) in candidates.iter().enumerate() {
            writeln!(
                self.output,
                "  {}) {} - {} - {} - Rarity: {}",
                i + 1,
                card.name,
                card.set_name().unwrap_or("Unknown Set"),
                card.number.as_deref().unwrap_or("N/A"),
                card.rarity.as_deref().unwrap_or("Unknown")
            )
            .ok();
        }
        writeln!(self.output, "  0) Skip this card").ok();

        loop {
            let Some(answer) = self.read_line() else {
                return Choice::Skip;
            };
            let answer = answer.trim();
            match answer.parse::<usize>() {
                Ok(0) => return Choice::Skip,
                Ok(n) if n <= candidates.len() => return Choice::Pick(n - 1),
                _ if answer.is_empty() => return Choice::Skip,
                _ => {
                    writeln!(
                        self.output,
                        "Enter a number between 0 and {}",
                        candidates.len()
                    )
                    .ok();
                }
            }
        }
    }

    fn manual_query(&mut self, original_name: &str) -> Option<String> {
        if !self.interactive {
            return None;
        }
        writeln!(
            self.output,
            "No cards found for \"{original_name}\". Enter a search term (end of input to give up):"
        )
        .ok();
        self.read_line()
    }

    fn no_results(&mut self, query: &str) {
        writeln!(
            self.output,
            "No cards found for \"{query}\". Try a different search term."
        )
        .ok();
    }
}

/// Plain text collection table
pub struct TableRenderer<W> {
    output: W,
    color: bool,
}

impl<W: Write> TableRenderer<W> {
    /// `color` paints the rarity column with the rarity badge colors
    pub fn new(output: W, color: bool) -> Self {
        Self { output, color }
    }

    fn rarity_cell(&self, rarity: &str) -> String {
        let width = rarity.chars().count();
        let padding = " ".repeat(RARITY_WIDTH.saturating_sub(width));
        if self.color {
            format!("{}{}", rarity_color(rarity).paint(rarity), padding)
        } else {
            format!("{}{}", rarity, padding)
        }
    }
}

impl<W: Write> CollectionRenderer for TableRenderer<W> {
    fn render(
        &mut self,
        rows: &[&CollectionEntry],
        stats: &CollectionStats,
        options: &FilterOptions,
    ) {
        if rows.is_empty() {
            writeln!(self.output, "No cards match your filters").ok();
        } else {
            writeln!(
                self.output,
                "{:<34} {:<8} {:<24} {:<10} {:<12} {:<10} {:>10}",
                "Id", "Set", "Name", "Number", "Rarity", "Condition", "Price"
            )
            .ok();
            for entry in rows {
                let rarity = self.rarity_cell(&entry.rarity);
                writeln!(
                    self.output,
                    "{:<34} {:<8} {:<24} {:<10} {} {:<10} {:>10}",
                    entry.id,
                    entry.set_id,
                    entry.name,
                    entry.number,
                    rarity,
                    entry.condition.as_str(),
                    format_price(entry.adjusted_price())
                )
                .ok();
            }
        }
        writeln!(self.output).ok();
        writeln!(self.output, "Total cards: {}", stats.count).ok();
        writeln!(self.output, "Total value: ${}", stats.formatted_total()).ok();
        self.output.flush().ok();
        log::debug!(
            "Filter options: {} sets, rarities {:?}",
            options.sets.len(),
            options.rarities
        );
    }
}
