// File: src/session.rs
use crate::core::engine::{GuessEngine, GuessOutcome, GuessPhase, KnownSymbol, Oracle};
use crate::core::table::PrefixTable;
use crate::core::types::{lower, Context};
use crate::error::{Result, ShannonError};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Symbols given away at the start of every game.
const SEEDED_SYMBOLS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// The whole phrase is known; guesses are checked against it.
    Automatic,
    /// Only the start of the phrase is known; an oracle confirms guesses
    /// until `length` symbols have been found.
    Interactive { length: usize },
}

impl PlayMode {
    /// A length of zero selects automatic play.
    pub fn from_length(length: usize) -> Self {
        if length == 0 {
            PlayMode::Automatic
        } else {
            PlayMode::Interactive { length }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOutcome {
    pub progress: String,
    pub total_guesses: u64,
    /// Zero for interactive games.
    pub elapsed: Duration,
}

/// Reconstructs one phrase symbol by symbol.
pub struct GameSession<'t> {
    engine: GuessEngine<'t>,
    phrase: Vec<char>,
    mode: PlayMode,
    target_len: usize,
    progress: String,
    total_guesses: u64,
}

impl<'t> GameSession<'t> {
    pub fn new(table: &'t PrefixTable, phrase: &str, mode: PlayMode) -> Result<Self> {
        Self::with_engine(GuessEngine::new(table), phrase, mode)
    }

    pub fn with_engine(engine: GuessEngine<'t>, phrase: &str, mode: PlayMode) -> Result<Self> {
        let phrase: Vec<char> = phrase.chars().collect();
        let target_len = match mode {
            PlayMode::Automatic => phrase.len(),
            PlayMode::Interactive { length } => {
                if phrase.len() < SEEDED_SYMBOLS {
                    return Err(ShannonError::PhraseTooShort { len: phrase.len() });
                }
                if length < SEEDED_SYMBOLS {
                    return Err(ShannonError::InvalidLength {
                        requested: length,
                        known: SEEDED_SYMBOLS,
                    });
                }
                length
            }
        };
        let progress = phrase.iter().take(SEEDED_SYMBOLS).collect();

        Ok(Self {
            engine,
            phrase,
            mode,
            target_len,
            progress,
            total_guesses: 0,
        })
    }

    pub fn progress(&self) -> &str {
        &self.progress
    }

    pub fn total_guesses(&self) -> u64 {
        self.total_guesses
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn is_finished(&self) -> bool {
        self.progress.chars().count() >= self.target_len
    }

    /// Guesses the next symbol. Returns `Ok(None)` once the phrase is
    /// complete.
    ///
    /// In automatic mode `oracle` is ignored and guesses are checked
    /// against the phrase itself.
    pub fn step(&mut self, oracle: &mut dyn Oracle) -> Result<Option<GuessOutcome>> {
        let position = self.progress.chars().count();
        if position >= self.target_len {
            return Ok(None);
        }
        let Some(context) = Context::trailing(&self.progress) else {
            return Ok(None);
        };

        let outcome = match self.mode {
            PlayMode::Automatic => {
                let mut truth = KnownSymbol(lower(self.phrase[position]));
                self.engine.guess(&context, &mut truth)
            }
            PlayMode::Interactive { .. } => self.engine.guess(&context, oracle),
        };
        self.total_guesses += outcome.guesses;

        if outcome.phase == GuessPhase::Aborted {
            info!(progress = %self.progress, "oracle closed, stopping");
            return Err(ShannonError::OracleClosed {
                progress: self.progress.clone(),
                guesses: self.total_guesses,
            });
        }
        let Some(symbol) = outcome.symbol else {
            warn!(%context, progress = %self.progress, "all candidates exhausted");
            return Err(ShannonError::GuessesExhausted {
                progress: self.progress.clone(),
                guesses: self.total_guesses,
            });
        };
        self.progress.push(symbol);
        debug!(%context, %symbol, guesses = outcome.guesses, phase = ?outcome.phase, "symbol guessed");
        Ok(Some(outcome))
    }

    /// Plays until the phrase is complete or no candidate matches.
    pub fn play(&mut self, oracle: &mut dyn Oracle) -> Result<GameOutcome> {
        let start = Instant::now();
        while self.step(oracle)?.is_some() {}

        let elapsed = match self.mode {
            PlayMode::Automatic => start.elapsed(),
            PlayMode::Interactive { .. } => Duration::ZERO,
        };
        info!(
            progress = %self.progress,
            total_guesses = self.total_guesses,
            elapsed_secs = elapsed.as_secs_f64(),
            "phrase solved"
        );
        Ok(GameOutcome {
            progress: self.progress.clone(),
            total_guesses: self.total_guesses,
            elapsed,
        })
    }
}

/// Plays `phrase` automatically against `table`.
pub fn play_auto(table: &PrefixTable, phrase: &str) -> Result<GameOutcome> {
    GameSession::new(table, phrase, PlayMode::Automatic)?.play(&mut KnownSymbol('\0'))
}

/// Plays against `table`, asking `oracle` about each guess unless `length`
/// is zero, in which case the whole phrase is known.
pub fn play(
    table: &PrefixTable,
    phrase: &str,
    length: usize,
    oracle: &mut dyn Oracle,
) -> Result<GameOutcome> {
    GameSession::new(table, phrase, PlayMode::from_length(length))?.play(oracle)
}
