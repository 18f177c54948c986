// File: src/trials.rs
use crate::config::TrialConfig;
use crate::core::table::PrefixTable;
use crate::error::{Result, ShannonError};
use crate::learning::index;
use crate::persistence::{load_corpus, Corpus};
use crate::session::play_auto;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One automatic game played during a trial run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialResult {
    pub corpus: PathBuf,
    /// Number of corpus symbols the table was built from.
    pub corpus_symbols: usize,
    pub phrase: String,
    pub guesses: u64,
    pub elapsed_secs: f64,
    pub solved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrialReport {
    pub phrase_trials: Vec<TrialResult>,
    pub time_trials: Vec<TrialResult>,
}

impl TrialReport {
    pub fn total_guesses(&self) -> u64 {
        self.phrase_trials
            .iter()
            .chain(&self.time_trials)
            .map(|r| r.guesses)
            .sum()
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (title, rows) in [
            ("phrase trials", &self.phrase_trials),
            ("time trials", &self.time_trials),
        ] {
            if rows.is_empty() {
                continue;
            }
            writeln!(f, "{title}")?;
            writeln!(f, "{:>10}\t{:>7}\t{:>12}\tphrase", "size", "guesses", "time")?;
            for row in rows {
                let guesses = if row.solved {
                    row.guesses.to_string()
                } else {
                    format!("{}!", row.guesses)
                };
                writeln!(
                    f,
                    "{:>10}\t{:>7}\t{:>12.8}\t{}",
                    row.corpus_symbols, guesses, row.elapsed_secs, row.phrase
                )?;
            }
        }
        Ok(())
    }
}

/// Runs every configured phrase against every configured corpus, and the
/// time trials over corpus prefixes when slices are configured.
pub struct TrialRunner {
    config: TrialConfig,
}

impl TrialRunner {
    pub fn new(config: TrialConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn run(&self) -> Result<TrialReport> {
        let mut report = TrialReport::default();
        for path in &self.config.corpora {
            let corpus = load_corpus(path)?;
            report.phrase_trials.extend(self.run_phrases(path, &corpus)?);

            if let Some(slices) = self.config.slices {
                for size in slices.sizes().take_while(|&s| s <= corpus.len()) {
                    let slice = corpus.prefix(size);
                    report.time_trials.extend(self.run_phrases(path, &slice)?);
                }
            }
        }
        info!(
            phrase_trials = report.phrase_trials.len(),
            time_trials = report.time_trials.len(),
            total_guesses = report.total_guesses(),
            "trials complete"
        );
        Ok(report)
    }

    /// Indexes `corpus` once and plays every configured phrase against it.
    fn run_phrases(&self, path: &Path, corpus: &Corpus) -> Result<Vec<TrialResult>> {
        let table = index(&corpus.text, corpus.distinct_symbols)?;
        debug!(path = %path.display(), symbols = corpus.len(), entries = table.len(), "corpus indexed");
        self.config
            .phrases
            .iter()
            .map(|phrase| run_one(path, &table, corpus.len(), phrase))
            .collect()
    }
}

/// Plays `phrase` against `table`, built from `corpus_symbols` symbols of
/// the corpus at `path`. An unsolvable phrase is recorded, not raised.
pub fn run_one(
    path: &Path,
    table: &PrefixTable,
    corpus_symbols: usize,
    phrase: &str,
) -> Result<TrialResult> {
    let (guesses, elapsed_secs, solved) = match play_auto(table, phrase) {
        Ok(outcome) => (outcome.total_guesses, outcome.elapsed.as_secs_f64(), true),
        Err(ShannonError::GuessesExhausted { progress, guesses }) => {
            warn!(path = %path.display(), %phrase, %progress, "phrase not solvable");
            (guesses, 0.0, false)
        }
        Err(e) => return Err(e),
    };
    Ok(TrialResult {
        corpus: path.to_path_buf(),
        corpus_symbols,
        phrase: phrase.to_string(),
        guesses,
        elapsed_secs,
        solved,
    })
}
