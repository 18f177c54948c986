// File: src/core/converter.rs
use std::collections::HashSet;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Re-formats raw documents into the alphabet the predictor is trained on.
pub struct TextNormalizer;

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Collapses every whitespace run into a single space, keeps only
    /// upper-case, lower-case and other letters, other punctuation and space
    /// separators, and lower-cases what is kept.
    pub fn normalize(&self, raw: &str) -> String {
        let mut result = String::with_capacity(raw.len());
        let mut in_whitespace = false;

        for c in raw.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    result.push(' ');
                }
                in_whitespace = true;
                continue;
            }
            in_whitespace = false;

            if is_kept(c) {
                result.extend(c.to_lowercase());
            }
        }
        result
    }

    pub fn distinct_symbols(&self, text: &str) -> usize {
        text.chars().collect::<HashSet<_>>().len()
    }
}

fn is_kept(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::OtherPunctuation
            | GeneralCategory::SpaceSeparator
    )
}
