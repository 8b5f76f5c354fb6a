//! pyfind Core Engine
//!
//! In-memory romanized-reading (pinyin) search over short text datasets, for
//! search-as-you-type widgets. The index is built once per dataset from a
//! character → reading lexicon and held entirely in memory.
//!
//! # Search modes
//!
//! - [`PinyinEngine::query`] - substring containment over the literal text,
//!   every full-reading combination and every acronym
//! - [`PinyinEngine::strict_match`] - anchored acronym or full-reading match
//!   with backtracking across polyphonic characters, annotated with match
//!   position, length and type
//!
//! Both modes keep a history of their previous keyword so that typing one
//! more letter only rescans the items that already matched.
//!
//! # Features
//!
//! - `native` - Enable all native optimizations (SIMD, parallel)
//! - `simd` - SIMD-accelerated substring search via memchr (default)
//! - `parallel` - Parallel index construction via rayon for large datasets
//!
//! # Example
//!
//! ```rust
//! use pyfind_core::{Dictionary, Item, PinyinEngine};
//!
//! let dict: Dictionary = vec![('北', vec!["bei"]), ('京', vec!["jing"])]
//!     .into_iter()
//!     .collect();
//!
//! let mut engine = PinyinEngine::new(vec![Item::from("北京")], Vec::<String>::new(), dict);
//! assert_eq!(engine.query("beiji").len(), 1);
//! assert_eq!(engine.strict_match("bj")[0].match_len, 2);
//! ```

pub mod combine;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod history;
pub mod index;
pub mod item;
pub mod participle;
pub mod query;
pub mod strict;

// Re-export main types at crate root
pub use combine::Combinations;
pub use dictionary::{Dictionary, Lexicon};
pub use engine::{EngineConfig, PinyinEngine};
pub use error::{DictionaryError, DictionaryResult};
pub use history::{History, SearchSpace};
pub use index::IndexTable;
pub use item::{Item, Record};
pub use participle::{participle, participle_bounded, IndexEntry, BEGIN_MARKER, DELIMITER};
pub use query::normalize_keyword;
pub use strict::{Hit, MatchType, StrictMatch};
