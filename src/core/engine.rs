// File: src/core/engine.rs
use crate::core::table::PrefixTable;
use crate::core::types::{Context, Symbol};
use tracing::debug;

/// Candidates tried once the table has nothing more to offer, in order.
pub const FALLBACK_ALPHABET: &[Symbol] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', ' ', ',', '.', '\'', '"', ';', '!', '?',
];

/// Decides whether a guessed symbol is the right one.
pub trait Oracle {
    fn confirm(&mut self, candidate: Symbol) -> bool;

    /// True once the oracle can no longer answer, e.g. its input ended.
    /// The engine stops offering candidates as soon as this turns true.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Verifies guesses against a symbol that is already known.
#[derive(Debug, Clone, Copy)]
pub struct KnownSymbol(pub Symbol);

impl Oracle for KnownSymbol {
    fn confirm(&mut self, candidate: Symbol) -> bool {
        candidate == self.0
    }
}

impl<F: FnMut(Symbol) -> bool> Oracle for F {
    fn confirm(&mut self, candidate: Symbol) -> bool {
        self(candidate)
    }
}

/// Where a guess ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessPhase {
    /// Matched one of the successors ranked for the context.
    Ranked,
    /// Matched a symbol of the fallback alphabet.
    Fallback,
    /// Neither phase produced a match.
    Exhausted,
    /// The oracle closed before confirming anything.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub symbol: Option<Symbol>,
    pub guesses: u64,
    pub phase: GuessPhase,
}

/// Produces guesses for the symbol following a context: first the ranked
/// successors the table holds for it, then the fallback alphabet minus
/// anything already tried.
pub struct GuessEngine<'t> {
    table: &'t PrefixTable,
    fallback: &'t [Symbol],
}

impl<'t> GuessEngine<'t> {
    pub fn new(table: &'t PrefixTable) -> Self {
        Self::with_fallback(table, FALLBACK_ALPHABET)
    }

    pub fn with_fallback(table: &'t PrefixTable, fallback: &'t [Symbol]) -> Self {
        Self { table, fallback }
    }

    /// Ranked candidates for `context`; empty when the context is unseen.
    pub fn ranked_candidates(&self, context: &Context) -> Vec<Symbol> {
        self.table
            .fetch(context)
            .map(|successors| successors.symbols().collect())
            .unwrap_or_default()
    }

    /// Fallback symbols that do not appear in `ranked`.
    pub fn fallback_candidates(&self, ranked: &[Symbol]) -> Vec<Symbol> {
        self.fallback
            .iter()
            .copied()
            .filter(|s| !ranked.contains(s))
            .collect()
    }

    /// Runs both phases against `oracle`. Every candidate answered counts
    /// as one guess whether or not it is confirmed.
    pub fn guess(&self, context: &Context, oracle: &mut dyn Oracle) -> GuessOutcome {
        let ranked = self.ranked_candidates(context);
        let mut guesses = 0;

        if let Some(outcome) = offer(&ranked, GuessPhase::Ranked, oracle, &mut guesses) {
            return outcome;
        }

        debug!(%context, tried = guesses, "ranked candidates exhausted, falling back");
        let fallback = self.fallback_candidates(&ranked);
        if let Some(outcome) = offer(&fallback, GuessPhase::Fallback, oracle, &mut guesses) {
            return outcome;
        }

        GuessOutcome {
            symbol: None,
            guesses,
            phase: GuessPhase::Exhausted,
        }
    }
}

/// Offers `candidates` in order. Returns the outcome on a confirmation or
/// when the oracle closes, `None` when every candidate was rejected.
fn offer(
    candidates: &[Symbol],
    phase: GuessPhase,
    oracle: &mut dyn Oracle,
    guesses: &mut u64,
) -> Option<GuessOutcome> {
    for &candidate in candidates {
        let confirmed = oracle.confirm(candidate);
        if oracle.is_closed() {
            return Some(GuessOutcome {
                symbol: None,
                guesses: *guesses,
                phase: GuessPhase::Aborted,
            });
        }
        *guesses += 1;
        if confirmed {
            return Some(GuessOutcome {
                symbol: Some(candidate),
                guesses: *guesses,
                phase,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::index;

    #[test]
    fn ranked_hit_counts_position() {
        let table = index("through tough thorough thought though", 7).unwrap();
        let engine = GuessEngine::new(&table);
        let th = Context::new('t', 'h');
        assert_eq!(engine.ranked_candidates(&th), vec!['o', 'r']);

        let outcome = engine.guess(&th, &mut KnownSymbol('r'));
        assert_eq!(outcome.symbol, Some('r'));
        assert_eq!(outcome.guesses, 2);
        assert_eq!(outcome.phase, GuessPhase::Ranked);
    }

    #[test]
    fn fallback_skips_ranked_symbols() {
        let table = index("through tough thorough thought though", 7).unwrap();
        let engine = GuessEngine::new(&table);
        let th = Context::new('t', 'h');

        let fallback = engine.fallback_candidates(&['o', 'r']);
        assert_eq!(fallback.len(), FALLBACK_ALPHABET.len() - 2);
        assert!(!fallback.contains(&'o'));

        // 'o', 'r' from the table, then a..d from the fallback alphabet.
        let outcome = engine.guess(&th, &mut KnownSymbol('d'));
        assert_eq!(outcome.symbol, Some('d'));
        assert_eq!(outcome.guesses, 6);
        assert_eq!(outcome.phase, GuessPhase::Fallback);
    }

    #[test]
    fn unseen_context_goes_straight_to_fallback() {
        let table = index("riff raff", 5).unwrap();
        let engine = GuessEngine::new(&table);
        let outcome = engine.guess(&Context::new('z', 'z'), &mut KnownSymbol(' '));
        assert_eq!(outcome.guesses, 27);
        assert_eq!(outcome.phase, GuessPhase::Fallback);
    }

    #[test]
    fn symbol_outside_alphabet_exhausts() {
        let table = index("riff raff", 5).unwrap();
        let engine = GuessEngine::new(&table);
        let outcome = engine.guess(&Context::new('q', 'q'), &mut KnownSymbol('#'));
        assert_eq!(outcome.symbol, None);
        assert_eq!(outcome.phase, GuessPhase::Exhausted);
        assert_eq!(outcome.guesses, FALLBACK_ALPHABET.len() as u64);
    }

    #[test]
    fn closure_oracle_sees_every_candidate() {
        let table = index("riff raff", 5).unwrap();
        let engine = GuessEngine::new(&table);
        let mut asked = Vec::new();
        let mut oracle = |c: Symbol| {
            asked.push(c);
            c == 'b'
        };
        let outcome = engine.guess(&Context::new('f', 'f'), &mut oracle);
        assert_eq!(outcome.guesses, 3);
        assert_eq!(asked, vec![' ', 'a', 'b']);
    }

    struct Answers {
        left: usize,
    }

    impl Oracle for Answers {
        fn confirm(&mut self, _candidate: Symbol) -> bool {
            if self.left == 0 {
                return false;
            }
            self.left -= 1;
            false
        }

        fn is_closed(&self) -> bool {
            self.left == 0
        }
    }

    #[test]
    fn closed_oracle_stops_guessing() {
        let table = index("riff raff", 5).unwrap();
        let engine = GuessEngine::new(&table);
        let mut oracle = Answers { left: 3 };
        let outcome = engine.guess(&Context::new('f', 'f'), &mut oracle);
        assert_eq!(outcome.phase, GuessPhase::Aborted);
        assert_eq!(outcome.symbol, None);
        // Two rejections answered; the third read found the input closed.
        assert_eq!(outcome.guesses, 2);
    }
}
