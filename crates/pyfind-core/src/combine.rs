//! Cartesian expansion of per-character reading lists.
//!
//! A text of N characters whose i-th character has R(i) readings expands into
//! R(0) × R(1) × ... × R(N-1) whole-text strings. The expansion is produced
//! lazily by walking index tuples in odometer order (last column varies
//! fastest), so callers can cap how many strings are materialized.

/// Lazy iterator over every concatenation picking one string per column.
#[derive(Debug, Clone)]
pub struct Combinations<'a, S> {
    columns: &'a [Vec<S>],
    cursor: Vec<usize>,
    exhausted: bool,
}

impl<'a, S: AsRef<str>> Combinations<'a, S> {
    /// An empty column list, or any empty column, yields nothing.
    pub fn new(columns: &'a [Vec<S>]) -> Self {
        let exhausted = columns.is_empty() || columns.iter().any(Vec::is_empty);
        Self {
            columns,
            cursor: vec![0; columns.len()],
            exhausted,
        }
    }

    /// Total number of combinations (saturating).
    pub fn total(&self) -> usize {
        if self.columns.is_empty() {
            return 0;
        }
        self.columns
            .iter()
            .fold(1usize, |acc, column| acc.saturating_mul(column.len()))
    }

    fn advance(&mut self) {
        for (slot, column) in self.cursor.iter_mut().zip(self.columns).rev() {
            *slot += 1;
            if *slot < column.len() {
                return;
            }
            *slot = 0;
        }
        self.exhausted = true;
    }
}

impl<S: AsRef<str>> Iterator for Combinations<'_, S> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }

        let mut out = String::new();
        for (&slot, column) in self.cursor.iter().zip(self.columns) {
            out.push_str(column[slot].as_ref());
        }

        self.advance();
        Some(out)
    }
}

/// Combinations that together use every string of every column.
///
/// The i-th string picks `column[i % column.len()]` from each column, so the
/// first `max(len)` strings cover every reading at least once. Used ahead of
/// the odometer walk when the expansion is capped.
pub fn diagonals<S: AsRef<str>>(columns: &[Vec<S>]) -> impl Iterator<Item = String> + '_ {
    let rounds = if columns.iter().any(Vec::is_empty) {
        0
    } else {
        columns.iter().map(Vec::len).max().unwrap_or(0)
    };

    (0..rounds).map(move |i| {
        columns
            .iter()
            .map(|column| column[i % column.len()].as_ref())
            .collect()
    })
}
