//! Indexer - turns one text into a matchable [`IndexEntry`]
//!
//! For every character with dictionary readings the indexer records the full
//! reading list (`full`) and, for texts longer than one character, the first
//! letters of those readings. Both lists are expanded into whole-text strings
//! via cartesian product: full-pronunciation combinations and acronyms.
//!
//! `simple` concatenates the literal text with every expansion, each segment
//! introduced by [`DELIMITER`] and the prefix marker, so a plain substring
//! search over `simple` covers the literal text, full readings and acronyms.
//!
//! Characters without readings contribute nothing and never fail indexing;
//! mixed scripts and punctuation are expected input.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::combine::{diagonals, Combinations};
use crate::dictionary::Lexicon;

/// Separates segments of [`IndexEntry::simple`]
pub const DELIMITER: char = '\u{1}';

/// Prefix marker used when matches must start at the beginning of a field
pub const BEGIN_MARKER: &str = "$";

/// Matchable representation of one indexed text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Literal text plus every expansion, for substring search
    pub simple: String,
    /// Readings per character that had any (not aligned with text positions)
    pub full: Vec<Vec<String>>,
    /// Every whole-text first-letter combination; empty for single-character text
    pub acronyms: Vec<String>,
    /// Record field this entry indexes, `None` for plain string items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
}

impl IndexEntry {
    /// Tag the entry with the record field it was built from
    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = Some(key.into());
        self
    }
}

/// Index `text`, materializing every combination.
pub fn participle<L: Lexicon + ?Sized>(text: &str, lexicon: &L, prefix: &str) -> IndexEntry {
    participle_bounded(text, lexicon, prefix, None)
}

/// Index `text`, materializing at most `max_combinations` strings per
/// expansion when a cap is given.
///
/// A capped expansion starts with [`diagonals`], so every reading of every
/// character still appears in some kept string; the odometer walk fills the
/// rest of the budget.
pub fn participle_bounded<L: Lexicon + ?Sized>(
    text: &str,
    lexicon: &L,
    prefix: &str,
    max_combinations: Option<usize>,
) -> IndexEntry {
    let words: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let multi_char = words.chars().nth(1).is_some();

    let mut full: Vec<Vec<String>> = Vec::new();
    let mut initials: Vec<Vec<String>> = Vec::new();

    for ch in words.chars() {
        let Some(readings) = lexicon.readings(ch).filter(|r| !r.is_empty()) else {
            continue;
        };
        full.push(readings.to_vec());
        if multi_char {
            initials.push(
                readings
                    .iter()
                    .filter_map(|r| r.chars().next())
                    .map(String::from)
                    .collect(),
            );
        }
    }

    let mut simple = format!("{prefix}{words}");

    let readings = expand(&full, max_combinations, &words);
    append_segments(&mut simple, prefix, &readings);

    let acronyms = expand(&initials, max_combinations, &words);
    append_segments(&mut simple, prefix, &acronyms);

    IndexEntry {
        simple,
        full,
        acronyms,
        data_key: None,
    }
}

fn expand(columns: &[Vec<String>], max_combinations: Option<usize>, words: &str) -> Vec<String> {
    let combos = Combinations::new(columns);
    let total = combos.total();
    let cap = match max_combinations {
        Some(cap) if total > cap => cap,
        _ => return combos.collect(),
    };

    warn!(text = words, total, kept = cap, "reading expansion truncated");

    let mut seen: AHashSet<String> = AHashSet::new();
    diagonals(columns)
        .chain(combos)
        .filter(|combo| seen.insert(combo.clone()))
        .take(cap)
        .collect()
}

fn append_segments(simple: &mut String, prefix: &str, segments: &[String]) {
    if segments.is_empty() {
        return;
    }

    let mut tail = String::new();
    for segment in segments {
        tail.push(DELIMITER);
        tail.push_str(prefix);
        tail.push_str(segment);
    }
    simple.push_str(&tail.to_lowercase());
}
