//! Character → romanized reading lookup
//!
//! The engine never builds pronunciation data itself. It consumes anything
//! implementing [`Lexicon`]; [`Dictionary`] is the in-memory implementation
//! used by default.

use std::collections::HashMap;

use ahash::AHashMap;

use crate::error::{DictionaryError, DictionaryResult};

/// Source of romanized readings for single characters.
///
/// Contract:
/// - readings are lowercase ASCII, most preferred first
/// - `None` (or an empty slice) means the character carries no reading
///   (punctuation, Latin letters, digits ...)
/// - the lexicon is fully populated before an engine is built from it
pub trait Lexicon: Send + Sync {
    fn readings(&self, ch: char) -> Option<&[String]>;
}

/// In-memory pronunciation dictionary
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: AHashMap<char, Vec<String>>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    /// Insert (or replace) the readings of `ch`.
    ///
    /// Readings are lowercased and empty ones dropped; a character left with
    /// no readings is removed instead of stored.
    pub fn insert<I, S>(&mut self, ch: char, readings: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let readings: Vec<String> = readings
            .into_iter()
            .map(|r| r.as_ref().trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .collect();

        if readings.is_empty() {
            self.entries.remove(&ch);
        } else {
            self.entries.insert(ch, readings);
        }
    }

    /// Decode a pre-built JSON dictionary: `{"中": ["zhong"], "重": ["zhong", "chong"]}`.
    pub fn from_json(input: &str) -> DictionaryResult<Self> {
        let raw: HashMap<String, Vec<String>> =
            serde_json::from_str(input).map_err(|e| DictionaryError::Malformed(e.to_string()))?;

        let mut dictionary = Self::new();
        for (key, readings) in raw {
            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => return Err(DictionaryError::InvalidKey(key)),
            };

            for reading in &readings {
                if reading.is_empty() || !reading.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(DictionaryError::InvalidReading {
                        ch,
                        reading: reading.clone(),
                    });
                }
            }

            dictionary.insert(ch, readings);
        }

        Ok(dictionary)
    }

    /// Number of characters with at least one reading
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lexicon for Dictionary {
    fn readings(&self, ch: char) -> Option<&[String]> {
        self.entries.get(&ch).map(Vec::as_slice)
    }
}

impl Lexicon for HashMap<char, Vec<String>> {
    fn readings(&self, ch: char) -> Option<&[String]> {
        self.get(&ch).map(Vec::as_slice)
    }
}

impl<S: AsRef<str>> FromIterator<(char, Vec<S>)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (char, Vec<S>)>>(iter: T) -> Self {
        let mut dictionary = Self::new();
        for (ch, readings) in iter {
            dictionary.insert(ch, readings);
        }
        dictionary
    }
}
