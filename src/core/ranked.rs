// File: src/core/ranked.rs
use crate::core::types::{FrequencyEntry, Symbol};
use serde::Serialize;
use std::fmt;

/// Successor symbols for one context, kept sorted from the highest count to
/// the lowest.
///
/// Entries with equal counts keep the order in which they reached that
/// count: a promoted or newly placed entry goes after every entry whose
/// count is greater than or equal to its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedFrequencyList {
    entries: Vec<FrequencyEntry>,
}

impl RankedFrequencyList {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds `delta` to the count of `symbol`, inserting it if absent.
    ///
    /// An existing entry that now outranks its predecessor is relocated.
    /// A new entry is appended at the tail when `delta <= 1` and placed by
    /// rank otherwise.
    /// O(n) in the list length.
    pub fn increment_or_insert(&mut self, symbol: Symbol, delta: u64) {
        match self.position(symbol) {
            Some(pos) => {
                self.entries[pos].count += delta;
                if pos > 0 && self.entries[pos].count > self.entries[pos - 1].count {
                    let entry = self.entries.remove(pos);
                    self.place(entry);
                }
            }
            None => {
                let entry = FrequencyEntry::new(symbol, delta);
                if delta > 1 {
                    self.place(entry);
                } else {
                    self.entries.push(entry);
                }
            }
        }
    }

    /// Inserts `entry` immediately before the first entry with a strictly
    /// smaller count, or at the tail if there is none.
    fn place(&mut self, entry: FrequencyEntry) {
        let at = self
            .entries
            .iter()
            .position(|e| e.count < entry.count)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, entry);
    }

    /// Removes the entry for `symbol`. Does nothing if it is absent.
    pub fn remove(&mut self, symbol: Symbol) {
        if let Some(pos) = self.position(symbol) {
            self.entries.remove(pos);
        }
    }

    pub fn find(&self, symbol: Symbol) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.find(symbol).is_some()
    }

    /// Symbols in rank order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.entries.iter().map(|e| e.symbol)
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    fn position(&self, symbol: Symbol) -> Option<usize> {
        self.entries.iter().position(|e| e.symbol == symbol)
    }
}

impl fmt::Display for RankedFrequencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SFL(")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, ")")
    }
}
