//! CSV export of the collection

use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::Result;
use crate::models::CollectionEntry;
use crate::pricing::round_cents;

pub const DEFAULT_EXPORT_FILE: &str = "pokemon-collection.csv";

pub const EXPORT_HEADERS: [&str; 7] = [
    "Name",
    "Set",
    "Number",
    "Rarity",
    "Condition",
    "Price",
    "Adjusted Price",
];

/// `$X.XX`
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", round_cents(amount))
}

/// One row per entry in the given order, every field double-quoted
pub fn to_csv_string<'a>(entries: impl IntoIterator<Item = &'a CollectionEntry>) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for entry in entries {
        let price = format_price(entry.base_price);
        let adjusted = format_price(entry.adjusted_price());
        writer.write_record([
            entry.name.as_str(),
            entry.set_name.as_str(),
            entry.number.as_str(),
            entry.rarity.as_str(),
            entry.condition.as_str(),
            price.as_str(),
            adjusted.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the export to `path`
pub fn write_csv<'a>(
    path: &Path,
    entries: impl IntoIterator<Item = &'a CollectionEntry>,
) -> Result<usize> {
    let content = to_csv_string(entries)?;
    std::fs::write(path, &content)?;
    let rows = content.lines().count().saturating_sub(1);
    log::info!("Exported {} card(s) to {}", rows, path.display());
    Ok(rows)
}
