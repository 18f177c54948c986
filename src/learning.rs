// File: src/learning.rs
use crate::core::{ranked::RankedFrequencyList, table::PrefixTable, types::Context};
use crate::error::{Result, ShannonError};
use tracing::{debug, info};

/// Learns context -> successor statistics from a normalized text.
pub struct CorpusIndexer {
    frequency_increment: u64,
}

impl Default for CorpusIndexer {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusIndexer {
    pub fn new() -> Self {
        Self { frequency_increment: 1 }
    }

    /// Builds a table of `distinct_symbols^2` slots and records, for every
    /// window of three symbols, the third one as a successor of the first
    /// two.
    ///
    /// Fails if the table fills up, which only happens when the text holds
    /// more distinct contexts than the sizing allows for.
    pub fn build(&self, text: &str, distinct_symbols: usize) -> Result<PrefixTable> {
        let slots = distinct_symbols.saturating_mul(distinct_symbols);
        let mut table = PrefixTable::new(slots)?;
        let symbols: Vec<char> = text.chars().collect();
        info!(
            symbols = symbols.len(),
            distinct_symbols, slots, "indexing corpus"
        );

        for window in symbols.windows(3) {
            let context = Context::new(window[0], window[1]);
            let successor = window[2];
            if let Some(successors) = table.fetch_mut(&context) {
                successors.increment_or_insert(successor, self.frequency_increment);
                continue;
            }

            let mut successors = RankedFrequencyList::new();
            successors.increment_or_insert(successor, self.frequency_increment);
            if !table.store(context, successors) {
                return Err(ShannonError::CapacityExhausted {
                    context: context.to_string(),
                    slots: table.capacity(),
                });
            }
            debug!(%context, "new context");
        }

        info!(
            contexts = table.len(),
            load_factor = table.load_factor(),
            "corpus indexed"
        );
        Ok(table)
    }
}

/// Indexes `text` with the default indexer.
pub fn index(text: &str, distinct_symbols: usize) -> Result<PrefixTable> {
    CorpusIndexer::new().build(text, distinct_symbols)
}
