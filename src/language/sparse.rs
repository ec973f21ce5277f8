//! Reassembly of values reported under 1-based ordinals in arbitrary order.
//!
//! Ratings and emotion indices arrive one line at a time, keyed by a song
//! or slot number that need not follow file order. Entries are kept in an
//! append-only log; the dense projection is rebuilt from the whole log on
//! every insertion so it is index-correct at all times, including part way
//! through a file.

use std::num::NonZeroUsize;

/// A value reported for one ordinal.
#[derive(Debug, Clone, PartialEq)]
struct Entry<T> {
    index: NonZeroUsize,
    value: Option<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SparseLog<T> {
    entries: Vec<Entry<T>>,
    dense: Vec<Option<T>>,
}

impl<T> Default for SparseLog<T> {
    fn default() -> Self {
        SparseLog {
            entries: Vec::new(),
            dense: Vec::new(),
        }
    }
}

impl<T: Clone> SparseLog<T> {
    pub fn new() -> SparseLog<T> {
        SparseLog::default()
    }

    /// Record a value for `index` and rebuild the dense projection. When the
    /// same index is reported more than once the latest arrival wins.
    pub fn insert(&mut self, index: NonZeroUsize, value: Option<T>) {
        self.entries
            .push(Entry { index, value });
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let length = self
            .entries
            .iter()
            .map(|entry| entry.index.get())
            .max()
            .unwrap_or(0);

        let mut dense = vec![None; length];
        for entry in &self.entries {
            dense[entry.index.get() - 1] = entry
                .value
                .clone();
        }

        self.dense = dense;
    }

    /// Zero-based view, as long as the largest index seen so far. Slots
    /// never reported are `None`.
    pub fn dense(&self) -> &[Option<T>] {
        &self.dense
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }
}
