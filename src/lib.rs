//! Intent engine - fuzzy intent recognition for desktop command chatbots
//!
//! Maps free-text natural-language commands ("opn setings", "create a folder
//! called MyData") onto a fixed catalog of named intents, with a confidence
//! score and optional extracted parameters. Classification is a pure function
//! of the input text, the immutable catalog and the configured threshold:
//! there is no I/O, no shared mutable state and no OS access anywhere in the
//! crate. Executing the recognized intent is the caller's job, through the
//! [`dispatch::DispatchTable`] seam.

pub mod catalog;
pub mod dispatch;
pub mod extract;
pub mod matcher;
pub mod normalize;
pub mod similarity;
pub mod types;

pub use catalog::{Catalog, CatalogError, IntentDecl, IntentDefinition};
pub use dispatch::{DispatchOutcome, DispatchTable};
pub use matcher::{IntentRecognizer, RecognizerConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use normalize::Normalizer;
pub use types::{
    Parameters, ParseResult, PARAM_FOLDER_NAME, PARAM_LANGUAGE, PARAM_PROGRAM_REQUEST,
    UNKNOWN_INTENT,
};

/// Classify one command against the built-in catalog with default settings.
///
/// Convenience for one-off calls; build an [`IntentRecognizer`] once and
/// reuse it when classifying repeatedly.
pub fn parse_command(text: &str) -> ParseResult {
    IntentRecognizer::with_builtin_catalog().select(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typo_tolerance_on_canonical_phrase() {
        let result = parse_command("open setings");
        assert_eq!(result.intent, "open_settings");
        assert!(result.confidence >= DEFAULT_CONFIDENCE_THRESHOLD);
    }

    #[test]
    fn word_order_invariance() {
        assert_eq!(parse_command("battery check").intent, "battery_status");
        assert_eq!(parse_command("check battery").intent, "battery_status");
    }

    #[test]
    fn parameter_round_trip() {
        let result = parse_command("create folder MyData");
        assert_eq!(result.intent, "create_folder");
        assert_eq!(
            result.parameters.get(PARAM_FOLDER_NAME).map(String::as_str),
            Some("MyData")
        );
    }

    #[test]
    fn unknown_fallback() {
        assert_eq!(parse_command("xyz123abc qqq").intent, UNKNOWN_INTENT);
    }

    #[test]
    fn empty_input_does_not_panic() {
        let result = parse_command("");
        assert_eq!(result.intent, UNKNOWN_INTENT);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn program_description_is_preserved() {
        let result = parse_command("write a python program to sort a list");
        assert_eq!(result.intent, "generate_program");
        let request = result.parameters.get(PARAM_PROGRAM_REQUEST).unwrap();
        assert!(request.contains("sort a list"), "got {request:?}");
        assert_eq!(
            result.parameters.get(PARAM_LANGUAGE).map(String::as_str),
            Some("python")
        );
    }

    #[test]
    fn classification_feeds_dispatch_end_to_end() {
        let mut table = DispatchTable::new();
        table.register_with_parameter("create_folder", PARAM_FOLDER_NAME, |params| {
            format!("Folder '{}' created", params[PARAM_FOLDER_NAME])
        });
        table.register("battery_status", |_| "Battery at 80%".to_string());

        let created = table.dispatch(&parse_command("create a folder called Reports"));
        assert_eq!(
            created,
            DispatchOutcome::Executed("Folder 'Reports' created".to_string())
        );

        let battery = table.dispatch(&parse_command("check battery"));
        assert_eq!(battery, DispatchOutcome::Executed("Battery at 80%".to_string()));

        let nonsense = table.dispatch(&parse_command("flarb glorp wibble"));
        assert!(matches!(nonsense, DispatchOutcome::NeedsClarification(_)));
    }

    #[test]
    fn recognizer_is_shareable_across_threads() {
        let recognizer = std::sync::Arc::new(IntentRecognizer::with_builtin_catalog());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let recognizer = std::sync::Arc::clone(&recognizer);
                std::thread::spawn(move || recognizer.select("open notepad").intent)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "open_notepad");
        }
    }
}
