//! PinyinEngine - dataset, index table and per-mode history caches

use std::time::Instant;

use tracing::debug;

use crate::dictionary::{Dictionary, Lexicon};
use crate::history::{History, SearchSpace};
use crate::index::IndexTable;
use crate::item::Item;
use crate::participle::{participle_bounded, IndexEntry, BEGIN_MARKER};
use crate::query::{self, normalize_keyword};
use crate::strict::{self, StrictMatch};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Marker prepended to every indexed segment and to every keyword.
    /// Non-empty only when matches must start at the beginning of a field.
    pub prefix: String,
    /// Cap on strings materialized per cartesian expansion while indexing;
    /// `None` expands every combination
    pub max_combinations: Option<usize>,
    /// Dataset size from which indexing runs in parallel (`parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            max_combinations: None,
            parallel_threshold: 1000,
        }
    }
}

impl EngineConfig {
    /// Require matches to start at the beginning of each field
    pub fn anchored(mut self) -> Self {
        self.prefix = BEGIN_MARKER.to_string();
        self
    }

    /// Bound the expansion of texts with many polyphonic characters
    pub fn with_max_combinations(mut self, max_combinations: usize) -> Self {
        self.max_combinations = Some(max_combinations);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

/// Romanized-reading search engine over a fixed dataset.
///
/// The index is built once in the constructor; changing the dataset means
/// building a new engine. `query` and `strict_match` take `&mut self` because
/// each updates its history cache: callers sharing an engine across threads
/// must serialize access themselves (for example behind a mutex).
pub struct PinyinEngine<L = Dictionary> {
    data: Vec<Item>,
    keys: Vec<String>,
    lexicon: L,
    index: IndexTable,
    config: EngineConfig,
    query_history: Option<History>,
    strict_history: Option<History>,
}

impl<L: Lexicon> PinyinEngine<L> {
    /// Build an engine with default configuration.
    ///
    /// `keys` names the record fields to index; it is ignored for plain
    /// string items.
    pub fn new<K>(data: Vec<Item>, keys: K, lexicon: L) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self::with_config(data, keys, lexicon, EngineConfig::default())
    }

    /// Build an engine with custom configuration
    pub fn with_config<K>(data: Vec<Item>, keys: K, lexicon: L, config: EngineConfig) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let start = Instant::now();
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let index = IndexTable::build(&data, &keys, &lexicon, &config);

        debug!(
            items = index.len(),
            entries = index.entry_count(),
            build_time_us = start.elapsed().as_micros() as u64,
            "built pinyin index"
        );

        Self {
            data,
            keys,
            lexicon,
            index,
            config,
            query_history: None,
            strict_history: None,
        }
    }

    /// Items whose text, literal or romanized, contains `keyword`.
    ///
    /// The keyword is stripped of whitespace and lowercased. An empty keyword
    /// matches every item in the searched space. Results are owned copies in
    /// dataset order.
    pub fn query(&mut self, keyword: &str) -> Vec<Item> {
        let keyword = normalize_keyword(keyword);
        let space = SearchSpace::for_keyword(self.query_history.as_ref(), &keyword, self.index.len());
        let needle = format!("{}{}", self.config.prefix, keyword);

        let hits = query::find_matches(&self.index, &space, &needle);
        debug!(
            keyword = keyword.as_str(),
            narrowed = space.is_narrowed(),
            searched = space.len(),
            matched = hits.len(),
            "query"
        );

        let results = hits.iter().map(|&i| self.data[i].clone()).collect();
        self.query_history = Some(History::new(keyword, hits));
        results
    }

    /// Items matched by acronym or by full readings, annotated with match
    /// position, length, type and the matched field.
    pub fn strict_match(&mut self, keyword: &str) -> Vec<StrictMatch> {
        let keyword = normalize_keyword(keyword);
        let space = SearchSpace::for_keyword(self.strict_history.as_ref(), &keyword, self.index.len());

        let hits = strict::find_matches(&self.index, &space, &keyword);
        debug!(
            keyword = keyword.as_str(),
            narrowed = space.is_narrowed(),
            searched = space.len(),
            matched = hits.len(),
            "strict match"
        );

        let results: Vec<StrictMatch> = hits
            .iter()
            .map(|h| {
                StrictMatch::new(
                    self.data[h.position].clone(),
                    h.hit,
                    h.data_key.map(str::to_string),
                )
            })
            .collect();
        let positions = hits.iter().map(|h| h.position).collect();

        self.strict_history = Some(History::new(keyword, positions));
        results
    }

    /// Index `text` with this engine's lexicon and no prefix
    pub fn participle(&self, text: &str) -> IndexEntry {
        participle_bounded(text, &self.lexicon, "", self.config.max_combinations)
    }

    /// Forget both history caches; the next searches scan the full table
    pub fn clear_history(&mut self) {
        self.query_history = None;
        self.strict_history = None;
    }

    pub fn data(&self) -> &[Item] {
        &self.data
    }

    pub fn index(&self) -> &IndexTable {
        &self.index
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// History of the last `query` call, if any
    pub fn query_history(&self) -> Option<&History> {
        self.query_history.as_ref()
    }

    /// History of the last `strict_match` call, if any
    pub fn strict_history(&self) -> Option<&History> {
        self.strict_history.as_ref()
    }

    /// Digest of the index table for change detection
    pub fn index_hash(&self) -> String {
        self.index.digest()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strict::MatchType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dict() -> Dictionary {
        vec![
            ('中', vec!["zhong"]),
            ('国', vec!["guo"]),
            ('北', vec!["bei"]),
            ('京', vec!["jing"]),
            ('南', vec!["nan"]),
            ('重', vec!["zhong", "chong"]),
            ('庆', vec!["qing"]),
        ]
        .into_iter()
        .collect()
    }

    fn test_engine() -> PinyinEngine {
        PinyinEngine::new(
            vec!["中国".into(), "北京".into(), "南京".into(), "重庆".into()],
            Vec::<String>::new(),
            dict(),
        )
    }

    #[test]
    fn test_query_full_reading() {
        let mut engine = test_engine();
        let results = engine.query("jing");
        assert_eq!(results, vec![Item::from("北京"), Item::from("南京")]);
    }

    #[test]
    fn test_query_literal_and_acronym() {
        let mut engine = test_engine();
        assert_eq!(engine.query("北"), vec![Item::from("北京")]);
        engine.clear_history();
        assert_eq!(engine.query("zg"), vec![Item::from("中国")]);
    }

    #[test]
    fn test_query_normalizes_keyword() {
        let mut engine = test_engine();
        assert_eq!(engine.query(" Bei JING "), vec![Item::from("北京")]);
    }

    #[test]
    fn test_query_empty_keyword_matches_all() {
        let mut engine = test_engine();
        assert_eq!(engine.query("").len(), 4);
    }

    #[test]
    fn test_query_history() {
        let mut engine = test_engine();
        assert!(engine.query_history().is_none());

        let first = engine.query("n");
        let history = engine.query_history().unwrap();
        assert_eq!(history.keyword(), "n");
        assert_eq!(history.hits().len(), first.len());

        let second = engine.query("nj");
        assert!(second.iter().all(|item| first.contains(item)));
        assert_eq!(engine.query_history().unwrap().hits(), &[2]);

        // not an extension: full table again
        assert_eq!(engine.query("zhong").len(), 2);
    }

    #[test]
    fn test_anchored_query() {
        let mut engine = PinyinEngine::with_config(
            vec!["北京".into(), "南京".into()],
            Vec::<String>::new(),
            dict(),
            EngineConfig::default().anchored(),
        );
        assert_eq!(engine.query("jing"), Vec::<Item>::new());
        assert_eq!(engine.query("nanj"), vec![Item::from("南京")]);
        assert_eq!(engine.query("南"), vec![Item::from("南京")]);
    }

    #[test]
    fn test_strict_match_acronym_and_full() {
        let mut engine = test_engine();

        let acronym = engine.strict_match("zg");
        assert_eq!(acronym.len(), 1);
        assert_eq!(acronym[0].item, Item::from("中国"));
        assert_eq!(acronym[0].py_match_type, MatchType::Acronym);
        assert_eq!((acronym[0].match_pos, acronym[0].match_len), (0, 2));

        engine.clear_history();
        let full = engine.strict_match("zho");
        assert_eq!(full.len(), 2);
        assert!(full.iter().all(|m| m.py_match_type == MatchType::FullPy));
        assert_eq!(full[0].item, Item::from("中国"));
        assert_eq!((full[0].match_pos, full[0].match_len), (0, 1));
        assert_eq!(full[1].item, Item::from("重庆"));
    }

    #[test]
    fn test_strict_history_holds_this_call_only() {
        let mut engine = test_engine();
        engine.strict_match("j");
        assert_eq!(engine.strict_history().unwrap().hits(), &[1, 2]);

        engine.strict_match("bj");
        assert_eq!(engine.strict_history().unwrap().hits(), &[1]);

        engine.strict_match("q");
        assert_eq!(engine.strict_history().unwrap().hits(), &[3]);
    }

    #[test]
    fn test_histories_are_independent() {
        let mut engine = PinyinEngine::with_config(
            vec!["北京".into(), "京北".into()],
            Vec::<String>::new(),
            dict(),
            EngineConfig::default().anchored(),
        );
        // anchored query only sees 北京 ...
        assert_eq!(engine.query("b"), vec![Item::from("北京")]);
        // ... but strict matching is not anchored and must not reuse that result
        let strict = engine.strict_match("be");
        assert_eq!(strict.len(), 2);
        assert_eq!(strict[1].item, Item::from("京北"));
        assert_eq!((strict[1].match_pos, strict[1].match_len), (1, 1));
    }

    #[test]
    fn test_records_report_data_key() {
        let data: Vec<Item> = serde_json::from_value(json!([
            {"name": "北京", "city": "中国"},
            {"name": "x", "city": "南京"}
        ]))
        .unwrap();
        let mut engine = PinyinEngine::new(data, ["name", "city"], dict());

        let matches = engine.strict_match("nj");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].data_key.as_deref(), Some("city"));

        engine.clear_history();
        let matches = engine.strict_match("bj");
        assert_eq!(matches[0].data_key.as_deref(), Some("name"));
    }

    #[test]
    fn test_participle_uses_engine_lexicon() {
        let engine = test_engine();
        let entry = engine.participle("中国");
        assert_eq!(entry.acronyms, vec!["zg"]);
        assert_eq!(entry.simple, "中国\u{1}zhongguo\u{1}zg");
    }

    #[test]
    fn test_results_are_copies() {
        let mut engine = test_engine();
        let mut results = engine.query("bei");
        results[0] = Item::from("changed");
        assert_eq!(engine.data()[1], Item::from("北京"));
    }
}
