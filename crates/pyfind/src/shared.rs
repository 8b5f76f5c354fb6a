//! Lockable engine handle
//!
//! `PinyinEngine` has no internal synchronization: its searches take
//! `&mut self` to update their history caches. `SharedEngine` serializes
//! calls behind one mutex per engine so a single index can serve several
//! threads.

use std::sync::Arc;

use parking_lot::Mutex;
use pyfind_core::{Dictionary, EngineConfig, IndexEntry, Item, Lexicon, PinyinEngine, StrictMatch};
use tracing::debug;

use crate::error::{Error, Result};

/// Cloneable handle to one engine; clones share index and history
pub struct SharedEngine<L = Dictionary> {
    inner: Arc<Mutex<PinyinEngine<L>>>,
}

impl<L> Clone for SharedEngine<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L> std::fmt::Debug for SharedEngine<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEngine").finish_non_exhaustive()
    }
}

impl<L: Lexicon> SharedEngine<L> {
    pub fn new(engine: PinyinEngine<L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn query(&self, keyword: &str) -> Vec<Item> {
        self.inner.lock().query(keyword)
    }

    pub fn strict_match(&self, keyword: &str) -> Vec<StrictMatch> {
        self.inner.lock().strict_match(keyword)
    }

    pub fn participle(&self, text: &str) -> IndexEntry {
        self.inner.lock().participle(text)
    }

    pub fn clear_history(&self) {
        self.inner.lock().clear_history();
    }

    pub fn index_hash(&self) -> String {
        self.inner.lock().index_hash()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl SharedEngine<Dictionary> {
    /// Build from JSON text: a dataset array (strings and/or objects) and a
    /// `{"char": ["reading", ...]}` dictionary.
    pub fn from_json<K>(data: &str, keys: K, dictionary: &str, config: EngineConfig) -> Result<Self>
    where
        K: IntoIterator,
        K::Item: Into<String>,
    {
        if config.max_combinations == Some(0) {
            return Err(Error::Config("max_combinations must be at least 1".to_string()));
        }

        let items: Vec<Item> = serde_json::from_str(data)?;
        let dictionary = Dictionary::from_json(dictionary)?;
        debug!(
            items = items.len(),
            characters = dictionary.len(),
            "building shared engine"
        );

        Ok(Self::new(PinyinEngine::with_config(
            items, keys, dictionary, config,
        )))
    }
}
