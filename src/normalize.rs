//! Text normalization ahead of intent scoring
//!
//! Lowercases, strips punctuation, tokenizes, then runs each token through a
//! spell-correction table (common typos) and a word-normalization table
//! (plural collapse, synonym collapse). Both tables are fixed at construction
//! and shared read-only, so a `Normalizer` is safe to use across threads.

use ahash::AHashMap;

/// Typo corrections applied per token before word normalization.
const SPELL_CORRECTIONS: &[(&str, &str)] = &[
    ("opn", "open"),
    ("oepn", "open"),
    ("lauch", "launch"),
    ("calcalator", "calculator"),
    ("calulator", "calculator"),
    ("calculater", "calculator"),
    ("caculator", "calculator"),
    ("claculator", "calculator"),
    ("notpad", "notepad"),
    ("notepadd", "notepad"),
    ("setings", "settings"),
    ("seting", "settings"),
    ("chrom", "chrome"),
    ("crome", "chrome"),
    ("baterry", "battery"),
    ("batery", "battery"),
    ("memry", "memory"),
    ("storag", "storage"),
    ("increse", "increase"),
    ("increese", "increase"),
    ("decrese", "decrease"),
    ("decreese", "decrease"),
    ("bluetoth", "bluetooth"),
    ("blutooth", "bluetooth"),
    ("shutdwn", "shutdown"),
    ("shutdwon", "shutdown"),
    ("restat", "restart"),
    ("restrart", "restart"),
    ("comand", "command"),
    ("watsapp", "whatsapp"),
    ("whatsap", "whatsapp"),
];

/// Singular/plural and synonym collapse, applied once per token. The table
/// is closed over its own outputs: no value is also a key.
const WORD_NORMALIZATIONS: &[(&str, &str)] = &[
    // Singular/plural
    ("files", "file"),
    ("folders", "folder"),
    ("directories", "directory"),
    ("settings", "setting"),
    ("processes", "process"),
    ("tasks", "task"),
    ("preferences", "preference"),
    // Synonyms. Every value must be a fixed point of the table, or
    // re-normalizing normalized text would keep rewriting it.
    ("show", "open"),
    ("display", "open"),
    ("view", "open"),
    ("launch", "open"),
    ("start", "open"),
    ("run", "open"),
    ("pc", "computer"),
    ("shutdown", "shutoff"),
    ("poweroff", "shutoff"),
];

/// Tokenizing normalizer with shared correction tables.
pub struct Normalizer {
    corrections: AHashMap<&'static str, &'static str>,
    normalizations: AHashMap<&'static str, &'static str>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            corrections: SPELL_CORRECTIONS.iter().copied().collect(),
            normalizations: WORD_NORMALIZATIONS.iter().copied().collect(),
        }
    }

    /// Normalize raw input into an ordered token sequence.
    ///
    /// Empty or punctuation-only input yields an empty vector, never an
    /// error. Deterministic and idempotent over rejoined output.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let cleaned: String = lowered
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();

        cleaned
            .split_whitespace()
            .map(|token| {
                let corrected = self.corrections.get(token).copied().unwrap_or(token);
                self.normalizations
                    .get(corrected)
                    .copied()
                    .unwrap_or(corrected)
                    .to_string()
            })
            .collect()
    }

    /// Normalize a whole phrase back into a single string. Catalog keywords
    /// and aliases run through this so they share the input vocabulary.
    pub fn normalize_phrase(&self, text: &str) -> String {
        self.normalize(text).join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
