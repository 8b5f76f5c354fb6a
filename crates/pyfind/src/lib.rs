//! # pyfind Shared Rust Library
//!
//! Host-side infrastructure around `pyfind-core`:
//! - **shared**: a cloneable, mutex-guarded engine handle for multi-threaded hosts
//! - **error**: Common error types with context
//! - **tracing**: Logging setup
//!
//! ## Usage
//!
//! ```rust
//! use pyfind::{EngineConfig, SharedEngine};
//!
//! let engine = SharedEngine::from_json(
//!     r#"[{"name": "北京"}, {"name": "上海"}]"#,
//!     ["name"],
//!     r#"{"北": ["bei"], "京": ["jing"], "上": ["shang"], "海": ["hai"]}"#,
//!     EngineConfig::default(),
//! )?;
//!
//! assert_eq!(engine.query("shanghai").len(), 1);
//! # Ok::<(), pyfind::Error>(())
//! ```

pub mod error;
pub mod shared;
pub mod tracing;

// Re-export commonly used items at crate root
pub use error::{Error, Result};
pub use pyfind_core::{
    Dictionary, EngineConfig, IndexEntry, Item, Lexicon, MatchType, PinyinEngine, StrictMatch,
};
pub use shared::SharedEngine;
