//! Index Table - one list of [`IndexEntry`] per dataset item
//!
//! Built once from the dataset and a lexicon, never mutated afterwards.
//! Plain string items get exactly one entry; record items get one entry per
//! requested key whose field holds a non-empty string, in key order.

use std::hash::{Hash, Hasher};

use ahash::AHasher;

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
use rayon::prelude::*;

use crate::dictionary::Lexicon;
use crate::engine::EngineConfig;
use crate::item::Item;
use crate::participle::{participle_bounded, IndexEntry};

/// Index entries aligned 1:1 with the dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexTable {
    rows: Vec<Vec<IndexEntry>>,
}

impl IndexTable {
    /// Index every item of `data`.
    pub fn build<L: Lexicon + ?Sized>(
        data: &[Item],
        keys: &[String],
        lexicon: &L,
        config: &EngineConfig,
    ) -> Self {
        Self {
            rows: index_items(data, keys, lexicon, config),
        }
    }

    /// Entries of the item at `position`; empty when out of range
    pub fn row(&self, position: usize) -> &[IndexEntry] {
        self.rows.get(position).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<IndexEntry>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of entries across all items
    pub fn entry_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Digest of the table contents, for change detection by hosts
    pub fn digest(&self) -> String {
        let mut hasher = AHasher::default();
        for row in &self.rows {
            row.len().hash(&mut hasher);
            for entry in row {
                entry.simple.hash(&mut hasher);
                entry.data_key.hash(&mut hasher);
            }
        }
        format!("{:016x}", hasher.finish())
    }
}

/// Index one item: one entry for a string, one per present key for a record
pub fn index_item<L: Lexicon + ?Sized>(
    item: &Item,
    keys: &[String],
    lexicon: &L,
    config: &EngineConfig,
) -> Vec<IndexEntry> {
    match item {
        Item::Text(text) => vec![participle_bounded(
            text,
            lexicon,
            &config.prefix,
            config.max_combinations,
        )],
        Item::Record(_) => keys
            .iter()
            .filter_map(|key| {
                item.field(key).map(|words| {
                    participle_bounded(words, lexicon, &config.prefix, config.max_combinations)
                        .with_data_key(key.clone())
                })
            })
            .collect(),
    }
}

/// Parallel on native with the `parallel` feature, for large datasets
#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
fn index_items<L: Lexicon + ?Sized>(
    data: &[Item],
    keys: &[String],
    lexicon: &L,
    config: &EngineConfig,
) -> Vec<Vec<IndexEntry>> {
    if data.len() >= config.parallel_threshold {
        data.par_iter()
            .map(|item| index_item(item, keys, lexicon, config))
            .collect()
    } else {
        index_sequential(data, keys, lexicon, config)
    }
}

#[cfg(any(target_arch = "wasm32", not(feature = "parallel")))]
fn index_items<L: Lexicon + ?Sized>(
    data: &[Item],
    keys: &[String],
    lexicon: &L,
    config: &EngineConfig,
) -> Vec<Vec<IndexEntry>> {
    index_sequential(data, keys, lexicon, config)
}

fn index_sequential<L: Lexicon + ?Sized>(
    data: &[Item],
    keys: &[String],
    lexicon: &L,
    config: &EngineConfig,
) -> Vec<Vec<IndexEntry>> {
    data.iter()
        .map(|item| index_item(item, keys, lexicon, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use serde_json::json;

    fn dict() -> Dictionary {
        vec![('北', vec!["bei"]), ('京', vec!["jing"]), ('上', vec!["shang"]), ('海', vec!["hai"])]
            .into_iter()
            .collect()
    }

    fn keys(k: &[&str]) -> Vec<String> {
        k.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_aligned_with_data() {
        let data: Vec<Item> = serde_json::from_value(json!([
            "北京",
            {"name": "上海", "alias": "沪"},
            {"other": "x"},
            {"name": "", "alias": "海"}
        ]))
        .unwrap();

        let table = IndexTable::build(&data, &keys(&["name", "alias"]), &dict(), &EngineConfig::default());

        assert_eq!(table.len(), data.len());
        assert_eq!(table.row(0).len(), 1);
        assert_eq!(table.row(0)[0].data_key, None);
        assert_eq!(table.row(1).len(), 2);
        assert_eq!(table.row(1)[0].data_key.as_deref(), Some("name"));
        assert_eq!(table.row(1)[1].data_key.as_deref(), Some("alias"));
        assert!(table.row(2).is_empty());
        assert_eq!(table.row(3).len(), 1);
        assert_eq!(table.row(3)[0].data_key.as_deref(), Some("alias"));
        assert_eq!(table.entry_count(), 4);
    }

    #[test]
    fn test_key_order_follows_request() {
        let data: Vec<Item> =
            serde_json::from_value(json!([{"name": "上海", "alias": "北京"}])).unwrap();
        let table = IndexTable::build(&data, &keys(&["alias", "name"]), &dict(), &EngineConfig::default());
        assert_eq!(table.row(0)[0].data_key.as_deref(), Some("alias"));
    }

    #[test]
    fn test_prefix_applied() {
        let data = vec![Item::from("北京")];
        let table = IndexTable::build(&data, &[], &dict(), &EngineConfig::default().anchored());
        assert!(table.row(0)[0].simple.starts_with("$北京"));
    }

    #[test]
    fn test_digest_tracks_contents() {
        let config = EngineConfig::default();
        let a = IndexTable::build(&[Item::from("北京")], &[], &dict(), &config);
        let b = IndexTable::build(&[Item::from("北京")], &[], &dict(), &config);
        let c = IndexTable::build(&[Item::from("上海")], &[], &dict(), &config);
        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
    }

    #[test]
    fn test_out_of_range_row_is_empty() {
        let table = IndexTable::default();
        assert!(table.row(7).is_empty());
    }
}
