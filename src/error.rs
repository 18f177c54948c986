// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ShannonError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ShannonError {
    #[error("prefix table needs at least one slot")]
    ZeroCapacity,
    #[error("prefix table is full ({slots} slots); context '{context}' could not be stored")]
    CapacityExhausted { context: String, slots: usize },
    #[error("phrase not solvable with current alphabet: stuck after '{progress}' ({guesses} guesses)")]
    GuessesExhausted { progress: String, guesses: u64 },
    #[error("input closed after '{progress}' ({guesses} guesses)")]
    OracleClosed { progress: String, guesses: u64 },
    #[error("interactive play needs at least two known symbols, got {len}")]
    PhraseTooShort { len: usize },
    #[error("target length {requested} is shorter than the {known} known symbols")]
    InvalidLength { requested: usize, known: usize },
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },
}
