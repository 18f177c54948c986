// File: src/persistence.rs
use crate::core::converter::TextNormalizer;
use crate::error::{Result, ShannonError};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// A normalized training text and the number of distinct symbols in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub text: String,
    pub distinct_symbols: usize,
}

impl Corpus {
    pub fn from_raw(raw: &str) -> Self {
        let normalizer = TextNormalizer::new();
        let text = normalizer.normalize(raw);
        let distinct_symbols = normalizer.distinct_symbols(&text);
        Self { text, distinct_symbols }
    }

    /// The first `len` symbols, with the distinct count recomputed.
    pub fn prefix(&self, len: usize) -> Self {
        let text: String = self.text.chars().take(len).collect();
        let distinct_symbols = TextNormalizer::new().distinct_symbols(&text);
        Self { text, distinct_symbols }
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let mut raw = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut raw))
        .map_err(|source| io_error(path, source))?;

    let corpus = Corpus::from_raw(&raw);
    info!(
        path = %path.display(),
        symbols = corpus.len(),
        distinct_symbols = corpus.distinct_symbols,
        "corpus loaded"
    );
    Ok(corpus)
}

/// Writes `value` as pretty JSON, replacing `path` atomically.
pub fn save_report<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|source| io_error(parent_dir, source))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|source| io_error(parent_dir, source))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(|source| io_error(path, source))?;
    }

    temp_file
        .persist(path)
        .map_err(|e| io_error(path, e.error))?;
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> ShannonError {
    ShannonError::Io {
        path: PathBuf::from(path),
        source,
    }
}
