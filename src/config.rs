// File: src/config.rs
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Corpus prefix lengths to run time trials over.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct SliceRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl SliceRange {
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.start..self.end).step_by(self.step.max(1))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(invalid("slices.step", "step must be greater than zero"));
        }
        if self.start == 0 {
            return Err(invalid("slices.start", "slices must hold at least one symbol"));
        }
        if self.start >= self.end {
            return Err(invalid("slices", "start must be below end"));
        }
        Ok(())
    }
}

/// Trial harness configuration loaded from JSON.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TrialConfig {
    pub corpora: Vec<PathBuf>,
    pub phrases: Vec<String>,
    #[serde(default)]
    pub slices: Option<SliceRange>,
    #[serde(default)]
    pub report: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl TrialConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: TrialConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpora.is_empty() {
            return Err(invalid("corpora", "at least one corpus is required"));
        }
        if self.phrases.is_empty() {
            return Err(invalid("phrases", "at least one phrase is required"));
        }
        if let Some(short) = self.phrases.iter().find(|p| p.chars().count() < 2) {
            return Err(invalid(
                "phrases",
                &format!("phrase '{short}' is shorter than two symbols"),
            ));
        }
        if let Some(slices) = &self.slices {
            slices.validate()?;
        }
        if let Some(level) = &self.log_level {
            parse_level(level)?;
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        self.log_level.as_deref().and_then(|l| parse_level(l).ok())
    }
}

pub fn parse_level(level: &str) -> Result<Level, ConfigError> {
    level
        .parse::<Level>()
        .map_err(|_| invalid("log_level", &format!("unknown level '{level}'")))
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        field: field.to_string(),
        message: message.to_string(),
    }
}
