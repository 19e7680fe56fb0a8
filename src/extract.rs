//! Parameter extraction for intents carrying a payload
//!
//! Extraction always runs against the original user text, not the normalized
//! tokens, so payload casing ("MyData") survives. Each intent's ordered
//! patterns are tried first; when none match, one of two fallback heuristics
//! applies. Folder-style intents strip action verbs, object nouns and filler
//! words everywhere and keep the residue as a name. Program-generation
//! requests instead strip only leading trigger words, deliberately keeping
//! the rest of the sentence as a free-form task description.

use crate::catalog::IntentDefinition;
use crate::types::{Parameters, PARAM_LANGUAGE, PARAM_PROGRAM_REQUEST};
use regex::Regex;

/// Leading words dropped from a program-generation request.
const PROGRAM_TRIGGERS: &[&str] = &[
    "write", "create", "generate", "make", "code", "a", "the", "me", "please", "can", "could",
    "you",
];

/// Languages recognized inside a generation request, matched per word so
/// that bare "c" does not fire inside "code".
const LANGUAGES: &[&str] = &["python", "rust", "java", "javascript", "typescript", "c", "c++", "c#"];
const DEFAULT_LANGUAGE: &str = "python";

pub struct ParameterExtractor {
    folder_strip: Regex,
}

impl ParameterExtractor {
    pub fn new() -> Self {
        // Static pattern, compiled once; it should never fail.
        let folder_strip = Regex::new(
            r"(?i)\b(?:can\s+you|could\s+you|create|make|new|delete|remove|open|show|folder|directory|file|called|named|please|a|the)\b",
        )
        .expect("folder strip pattern is valid");
        Self { folder_strip }
    }

    /// Extract the intent's parameter from `raw_text` into `parameters`.
    ///
    /// A failed extraction leaves the key absent; callers treat that as a
    /// missing parameter and ask the user to clarify.
    pub fn extract(&self, raw_text: &str, intent: &IntentDefinition, parameters: &mut Parameters) {
        let Some(key) = intent.parameter_key() else {
            return;
        };

        if key == PARAM_PROGRAM_REQUEST {
            if let Some(request) = extract_program_request(raw_text) {
                parameters.insert(PARAM_LANGUAGE.to_string(), detect_language(&request));
                parameters.insert(key.to_string(), request);
            }
            return;
        }

        if let Some(value) = self.extract_named(raw_text, intent) {
            parameters.insert(key.to_string(), value);
        }
    }

    /// Pattern pass, then the folder-style strip heuristic.
    fn extract_named(&self, raw_text: &str, intent: &IntentDefinition) -> Option<String> {
        for pattern in intent.extraction_patterns() {
            if let Some(captures) = pattern.captures(raw_text) {
                if let Some(group) = captures.get(1) {
                    let value = group.as_str().trim();
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }

        let stripped = self.folder_strip.replace_all(raw_text, " ");
        let residue = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        (!residue.is_empty()).then_some(residue)
    }
}

impl Default for ParameterExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop leading trigger and filler words, keep the rest of the sentence.
fn extract_program_request(raw_text: &str) -> Option<String> {
    let words: Vec<&str> = raw_text.split_whitespace().collect();
    let start = words
        .iter()
        .position(|w| {
            let bare: String = w
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect();
            !PROGRAM_TRIGGERS.contains(&bare.as_str())
        })
        .unwrap_or(words.len());
    let request = words[start..].join(" ");
    (!request.is_empty()).then_some(request)
}

/// First language named in the request; generation defaults to python.
fn detect_language(request: &str) -> String {
    let lowered = request.to_lowercase();
    for word in lowered.split_whitespace() {
        let word = word.trim_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'));
        if LANGUAGES.contains(&word) {
            return word.to_string();
        }
    }
    DEFAULT_LANGUAGE.to_string()
}
