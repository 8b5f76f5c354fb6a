//! Fuzzy query engine - substring containment over `IndexEntry::simple`
//!
//! An item matches when any of its entries contains `prefix + keyword`.
//! Entries are checked in order and the first hit short-circuits.

use crate::history::SearchSpace;
use crate::index::IndexTable;

/// Keyword normalization shared by both search modes: drop whitespace, lowercase.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Substring needle, SIMD-accelerated via memchr on native
pub struct Needle<'a> {
    #[cfg(all(not(target_arch = "wasm32"), feature = "simd"))]
    finder: memchr::memmem::Finder<'a>,
    #[cfg(any(target_arch = "wasm32", not(feature = "simd")))]
    text: &'a str,
}

impl<'a> Needle<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            #[cfg(all(not(target_arch = "wasm32"), feature = "simd"))]
            finder: memchr::memmem::Finder::new(text.as_bytes()),
            #[cfg(any(target_arch = "wasm32", not(feature = "simd")))]
            text,
        }
    }

    /// Byte offset of the first occurrence in `haystack`
    #[inline]
    pub fn find_in(&self, haystack: &str) -> Option<usize> {
        #[cfg(all(not(target_arch = "wasm32"), feature = "simd"))]
        {
            self.finder.find(haystack.as_bytes())
        }

        #[cfg(any(target_arch = "wasm32", not(feature = "simd")))]
        {
            haystack.find(self.text)
        }
    }

    #[inline]
    pub fn is_in(&self, haystack: &str) -> bool {
        self.find_in(haystack).is_some()
    }
}

/// Positions in `space` whose entries contain `needle`, in search order.
///
/// `needle` is the prefix marker followed by the normalized keyword.
pub fn find_matches(table: &IndexTable, space: &SearchSpace, needle: &str) -> Vec<usize> {
    let needle = Needle::new(needle);
    space
        .positions()
        .filter(|&position| {
            table
                .row(position)
                .iter()
                .any(|entry| needle.is_in(&entry.simple))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::engine::EngineConfig;
    use crate::history::History;
    use crate::item::Item;

    fn table() -> IndexTable {
        let dict: Dictionary = vec![('北', vec!["bei"]), ('京', vec!["jing"]), ('南', vec!["nan"])]
            .into_iter()
            .collect();
        let data = vec![Item::from("北京"), Item::from("南京"), Item::from("Tokyo")];
        IndexTable::build(&data, &[], &dict, &EngineConfig::default())
    }

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword(" Bei Jing\t"), "beijing");
        assert_eq!(normalize_keyword(""), "");
    }

    #[test]
    fn test_needle() {
        let needle = Needle::new("jing");
        assert_eq!(needle.find_in("beijing"), Some(3));
        assert!(!needle.is_in("bei"));
        assert!(Needle::new("").is_in("anything"));
    }

    #[test]
    fn test_find_matches_full_space() {
        let table = table();
        let space = SearchSpace::for_keyword(None, "jing", table.len());
        assert_eq!(find_matches(&table, &space, "jing"), vec![0, 1]);
        assert_eq!(find_matches(&table, &space, "Tok"), vec![2]);
        assert!(find_matches(&table, &space, "zzz").is_empty());
    }

    #[test]
    fn test_find_matches_respects_narrowed_space() {
        let table = table();
        let history = History::new("n", vec![1]);
        let space = SearchSpace::for_keyword(Some(&history), "nj", table.len());
        assert_eq!(find_matches(&table, &space, "nj"), vec![1]);
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        let table = table();
        let space = SearchSpace::for_keyword(None, "", table.len());
        assert_eq!(find_matches(&table, &space, ""), vec![0, 1, 2]);
    }
}
