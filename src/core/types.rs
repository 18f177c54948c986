// src/core/types.rs
use serde::{Serialize, Serializer};
use std::fmt;

/// A single character of normalized text.
pub type Symbol = char;

/// A symbol together with the number of times it has been observed.
/// The repr is of the form `<'c': 2>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub symbol: Symbol,
    pub count: u64,
}

impl FrequencyEntry {
    pub fn new(symbol: Symbol, count: u64) -> Self {
        Self { symbol, count }
    }
}

impl fmt::Display for FrequencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?}: {}>", self.symbol, self.count)
    }
}

/// The two symbols immediately preceding the one being predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context([Symbol; 2]);

impl Context {
    pub fn new(first: Symbol, second: Symbol) -> Self {
        Self([first, second])
    }

    /// Builds a context from the last two symbols of `text`, lower-cased.
    /// Returns `None` when fewer than two symbols are available.
    pub fn trailing(text: &str) -> Option<Self> {
        let mut tail = text.chars().rev().map(lower);
        let second = tail.next()?;
        let first = tail.next()?;
        Some(Self::new(first, second))
    }

    pub fn as_string(&self) -> String {
        self.0.iter().collect()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

/// Lower-cases a single symbol, keeping it unchanged when the lowercase
/// form expands to more than one char.
pub fn lower(symbol: Symbol) -> Symbol {
    let mut lowered = symbol.to_lowercase();
    match (lowered.next(), lowered.next()) {
        (Some(c), None) => c,
        _ => symbol,
    }
}
