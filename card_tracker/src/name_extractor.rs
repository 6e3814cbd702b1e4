//! Candidate card names from uploaded file names
//!
//! `charizard-vmax-20.png` becomes `Charizard Vmax`: the extension goes, the
//! separators become spaces, everything from the first digit on is treated as
//! a card number / edition suffix, and trailing marker words ("card",
//! "pokemon", "tcg") are dropped before title-casing.

/// Marker words cut together with everything after them (ASCII, lowercase)
const MARKERS: [&str; 3] = ["card", "pokemon", "tcg"];

/// Derive a human readable card name from a raw file name.
///
/// Never fails: malformed input yields an empty or partial name.
pub fn extract_card_name(file_name: &str) -> String {
    let stem = strip_extension(file_name);

    let spaced: String = stem
        .chars()
        .map(|c| match c {
            '-' | '_' | '.' => ' ',
            other => other,
        })
        .collect();

    let without_number = match spaced.find(|c: char| c.is_ascii_digit()) {
        Some(idx) => &spaced[..idx],
        None => spaced.as_str(),
    };

    let without_marker = strip_marker(without_number);

    title_case(without_marker).trim().to_string()
}

/// Drop a trailing `.ext`; the extension may not contain `/` or `.`
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() && !name[idx + 1..].contains('/') => &name[..idx],
        _ => name,
    }
}

/// Cut at the earliest marker occurrence, case-insensitively
fn strip_marker(name: &str) -> &str {
    // ASCII lowercasing keeps byte offsets aligned with `name`
    let lower = name.to_ascii_lowercase();
    let cut = MARKERS.iter().filter_map(|m| lower.find(m)).min();
    match cut {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Uppercase every ASCII letter that starts a word
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_word = false;
    for c in name.chars() {
        if !prev_is_word && c.is_ascii_alphabetic() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = c.is_ascii_alphanumeric() || c == '_';
    }
    out
}

#[cfg(test)]
#[path = "name_extractor_tests.rs"]
mod tests;
