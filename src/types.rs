//! Core result types shared across the engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel intent name reported when no catalog entry clears the threshold.
pub const UNKNOWN_INTENT: &str = "unknown";

/// Parameter key for folder create/delete/open intents.
pub const PARAM_FOLDER_NAME: &str = "folder_name";
/// Parameter key for the free-form code-generation request.
pub const PARAM_PROGRAM_REQUEST: &str = "program_request";
/// Parameter key for the detected programming language of a generation request.
pub const PARAM_LANGUAGE: &str = "language";

/// Extracted parameters, keyed by the intent's parameter key.
pub type Parameters = BTreeMap<String, String>;

/// Outcome of classifying one command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    /// Winning catalog intent name, or [`UNKNOWN_INTENT`].
    pub intent: String,
    /// Clamped to `[0.0, 1.0]`. Advisory only on the unknown path.
    pub confidence: f64,
    /// Extracted payloads; an accepted intent that needs a parameter but
    /// failed extraction simply omits its key here.
    #[serde(default)]
    pub parameters: Parameters,
    /// Per-intent diagnostic scores, populated when requested.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub all_scores: BTreeMap<String, f64>,
}

impl ParseResult {
    /// Result for input nothing matched.
    pub fn unknown(confidence: f64, all_scores: BTreeMap<String, f64>) -> Self {
        Self {
            intent: UNKNOWN_INTENT.to_string(),
            confidence,
            parameters: Parameters::new(),
            all_scores,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == UNKNOWN_INTENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_result_has_no_parameters() {
        let r = ParseResult::unknown(0.0, BTreeMap::new());
        assert!(r.is_unknown());
        assert!(r.parameters.is_empty());
    }

    #[test]
    fn serializes_without_empty_score_map() {
        let r = ParseResult {
            intent: "open_settings".to_string(),
            confidence: 0.92,
            parameters: Parameters::new(),
            all_scores: BTreeMap::new(),
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"intent\":\"open_settings\""));
        assert!(!json.contains("all_scores"));
    }

    #[test]
    fn round_trips_through_json() {
        let mut params = Parameters::new();
        params.insert(PARAM_FOLDER_NAME.to_string(), "MyData".to_string());
        let r = ParseResult {
            intent: "create_folder".to_string(),
            confidence: 1.0,
            parameters: params,
            all_scores: BTreeMap::new(),
        };
        let back: ParseResult = serde_json::from_str(&serde_json::to_string(&r).unwrap()).unwrap();
        assert_eq!(back.intent, r.intent);
        assert_eq!(back.parameters.get(PARAM_FOLDER_NAME).map(String::as_str), Some("MyData"));
    }
}
