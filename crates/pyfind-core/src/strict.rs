//! Strict match engine - anchored acronym / full-reading matching
//!
//! Per entry, two tests run in order:
//!
//! 1. **Acronym**: the keyword is a substring of one of the entry's acronym
//!    strings. Position is the offset inside that acronym; length is the
//!    keyword length (one keyword letter per character).
//! 2. **Full reading** (keywords longer than one character): acronym letters
//!    equal to the keyword's first letter mark anchor offsets, followed by any
//!    character whose readings start with that letter but which a capped
//!    acronym list no longer shows. From each distinct anchor the keyword is
//!    consumed syllable by syllable against `full`, backtracking across
//!    polyphonic characters. Length is the number of characters consumed.
//!
//! A candidate reading at least as long as the remaining keyword ends the
//! match when it starts with that remainder, so the last syllable may be
//! matched partially: `zho` matches `zhong`.
//!
//! Single-character texts have no acronyms and therefore never match here.

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::history::SearchSpace;
use crate::index::IndexTable;
use crate::item::Item;
use crate::participle::IndexEntry;

/// Which test produced a strict match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    Acronym,
    FullPy,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Acronym => write!(f, "acronym"),
            MatchType::FullPy => write!(f, "fullPy"),
        }
    }
}

/// Match position metadata for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Character offset where the match starts
    pub pos: usize,
    /// Number of indexed characters covered
    pub len: usize,
    pub kind: MatchType,
}

/// A matched item with its annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrictMatch {
    pub item: Item,
    pub match_pos: usize,
    pub match_len: usize,
    pub py_match_type: MatchType,
    pub data_key: Option<String>,
}

impl StrictMatch {
    pub fn new(item: Item, hit: Hit, data_key: Option<String>) -> Self {
        Self {
            item,
            match_pos: hit.pos,
            match_len: hit.len,
            py_match_type: hit.kind,
            data_key,
        }
    }
}

/// Character offset of `keyword` in the first acronym containing it
pub fn acronym_match(acronyms: &[String], keyword: &str) -> Option<usize> {
    acronyms.iter().find_map(|acronym| {
        acronym
            .find(keyword)
            .map(|byte_pos| acronym[..byte_pos].chars().count())
    })
}

/// Number of characters of `full` consumed by `keyword`, 0 when it cannot be
/// consumed.
///
/// Recursion depth is bounded by `full.len()`.
pub fn consume_readings(full: &[Vec<String>], keyword: &str) -> usize {
    let Some((readings, rest)) = full.split_first() else {
        return 0;
    };

    for reading in readings {
        if reading.len() >= keyword.len() {
            if reading.starts_with(keyword) {
                return 1;
            }
        } else if let Some(remainder) = keyword.strip_prefix(reading.as_str()) {
            let len = consume_readings(rest, remainder);
            if len > 0 {
                return len + 1;
            }
        }
    }

    0
}

/// Distinct character offsets where a match starting with `first` may begin,
/// in search order.
///
/// Offsets come from the acronyms first, then from `full` for readings the
/// acronym list does not show. Texts without acronyms have no anchors.
pub fn anchor_positions(acronyms: &[String], full: &[Vec<String>], first: char) -> Vec<usize> {
    if acronyms.is_empty() {
        return Vec::new();
    }

    let mut searched: AHashSet<usize> = AHashSet::new();
    let mut anchors = Vec::new();

    let from_acronyms = acronyms.iter().flat_map(|acronym| {
        acronym
            .chars()
            .enumerate()
            .filter(move |&(_, letter)| letter == first)
            .map(|(pos, _)| pos)
    });
    let from_full = full
        .iter()
        .enumerate()
        .filter(|(_, readings)| readings.iter().any(|r| r.starts_with(first)))
        .map(|(pos, _)| pos);

    // polyphonic characters share anchors across acronyms
    for pos in from_acronyms.chain(from_full) {
        if searched.insert(pos) {
            anchors.push(pos);
        }
    }

    anchors
}

/// Anchor offset and consumed length of the first anchor that fully consumes
/// `keyword`.
pub fn full_match(acronyms: &[String], full: &[Vec<String>], keyword: &str) -> Option<(usize, usize)> {
    let first = keyword.chars().next()?;

    anchor_positions(acronyms, full, first)
        .into_iter()
        .find_map(|pos| {
            let len = consume_readings(full.get(pos..)?, keyword);
            (len > 0).then_some((pos, len))
        })
}

/// Acronym test first, then the full-reading test for keywords longer than one character
pub fn match_entry(entry: &IndexEntry, keyword: &str) -> Option<Hit> {
    if let Some(pos) = acronym_match(&entry.acronyms, keyword) {
        return Some(Hit {
            pos,
            len: keyword.chars().count(),
            kind: MatchType::Acronym,
        });
    }

    if keyword.chars().nth(1).is_none() {
        return None;
    }

    full_match(&entry.acronyms, &entry.full, keyword).map(|(pos, len)| Hit {
        pos,
        len,
        kind: MatchType::FullPy,
    })
}

/// A matched dataset position with the entry that matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHit<'a> {
    pub position: usize,
    pub hit: Hit,
    pub data_key: Option<&'a str>,
}

/// First matching entry of every item in `space`, in search order
pub fn find_matches<'a>(table: &'a IndexTable, space: &SearchSpace, keyword: &str) -> Vec<EntryHit<'a>> {
    space
        .positions()
        .filter_map(|position| {
            table.row(position).iter().find_map(|entry| {
                match_entry(entry, keyword).map(|hit| EntryHit {
                    position,
                    hit,
                    data_key: entry.data_key.as_deref(),
                })
            })
        })
        .collect()
}
