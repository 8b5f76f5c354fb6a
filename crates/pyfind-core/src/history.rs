//! History Cache - narrows the search space for prefix-extending keywords
//!
//! Substring containment is monotone under prefix extension: a haystack that
//! contains `ab` also contains `a`. So once `a` has been searched, a later
//! search for any keyword starting with `a` only needs the items `a` matched.
//! The same holds for the anchored matcher, whose acronym and reading tests
//! both consume the keyword left to right.
//!
//! The cache stores positions into the immutable dataset rather than copies;
//! the Index Table and Data never change after construction.

use std::ops::Range;

/// Keyword and matched positions of the most recent search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    keyword: String,
    hits: Vec<usize>,
}

impl History {
    pub fn new(keyword: impl Into<String>, hits: Vec<usize>) -> Self {
        Self {
            keyword: keyword.into(),
            hits,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Dataset positions matched by [`History::keyword`], ascending
    pub fn hits(&self) -> &[usize] {
        &self.hits
    }

    /// Whether a search for `keyword` may be restricted to [`History::hits`].
    ///
    /// An empty previous result never narrows; the next search falls back to
    /// the full table.
    pub fn narrows(&self, keyword: &str) -> bool {
        !self.hits.is_empty() && keyword.starts_with(self.keyword.as_str())
    }
}

/// Positions to search for `keyword`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSpace {
    Full(Range<usize>),
    Narrowed(Vec<usize>),
}

impl SearchSpace {
    /// Pick the cached subset when `history` narrows `keyword`, else the full table.
    pub fn for_keyword(history: Option<&History>, keyword: &str, total: usize) -> Self {
        match history {
            Some(h) if h.narrows(keyword) => SearchSpace::Narrowed(h.hits.clone()),
            _ => SearchSpace::Full(0..total),
        }
    }

    pub fn is_narrowed(&self) -> bool {
        matches!(self, SearchSpace::Narrowed(_))
    }

    pub fn len(&self) -> usize {
        match self {
            SearchSpace::Full(range) => range.len(),
            SearchSpace::Narrowed(hits) => hits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positions(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            SearchSpace::Full(range) => Box::new(range.clone()),
            SearchSpace::Narrowed(hits) => Box::new(hits.iter().copied()),
        }
    }
}
