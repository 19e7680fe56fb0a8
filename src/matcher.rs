//! Fuzzy scoring and intent selection
//!
//! Scoring combines two signals: weighted per-token keyword hits (exact hits
//! outweigh fuzzy ones) and whole-string similarity against each alias
//! phrase. Token scoring handles reordered commands ("battery check" vs
//! "check battery"); alias scoring handles short and long utterances alike.

use crate::catalog::{Catalog, IntentDefinition};
use crate::extract::ParameterExtractor;
use crate::normalize::Normalizer;
use crate::similarity::ratio;
use crate::types::ParseResult;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Weight of a token exactly equal to a keyword.
pub const EXACT_KEYWORD_WEIGHT: f64 = 2.0;
/// Weight of a token similarity-matching a keyword; fuzzy hits count less.
pub const FUZZY_KEYWORD_WEIGHT: f64 = 1.5;
/// Minimum sequence ratio for a token to count as a fuzzy keyword hit.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;
/// Default minimum confidence to accept the arg-max intent.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Tunables kept outside the pure scorer.
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// Winning intents below this clamped confidence report as unknown.
    pub confidence_threshold: f64,
    /// Populate [`ParseResult::all_scores`] for diagnostics.
    pub collect_all_scores: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            collect_all_scores: false,
        }
    }
}

/// Raw (unclamped) intent score for a normalized token sequence.
///
/// The sum of weighted keyword hits is divided by
/// `min(token_count, keyword_count)`, which guards against short inputs
/// inflating against large keyword lists; an alias similarity replaces the
/// token score when it is higher. Raw scores above 1.0 are meaningful for
/// ranking and are clamped only when reported as confidence.
pub fn score_intent(tokens: &[String], intent: &IntentDefinition) -> f64 {
    if tokens.is_empty() || intent.keywords().is_empty() {
        return 0.0;
    }

    let mut weighted = 0.0;
    for token in tokens {
        if intent.has_keyword(token) {
            weighted += EXACT_KEYWORD_WEIGHT;
        } else {
            let best = intent
                .keywords()
                .iter()
                .map(|keyword| ratio(token, keyword))
                .fold(0.0, f64::max);
            if best >= FUZZY_MATCH_THRESHOLD {
                weighted += FUZZY_KEYWORD_WEIGHT;
            }
        }
    }

    let denominator = tokens.len().min(intent.keywords().len()).max(1);
    let mut score = weighted / denominator as f64;

    let joined = tokens.join(" ");
    for alias in intent.aliases() {
        let alias_score = ratio(&joined, alias);
        if alias_score > score {
            score = alias_score;
        }
    }

    score
}

/// The recognition engine: normalizer, catalog and extractor wired together.
///
/// Holds no interior mutability; `&self` methods are safe to call from many
/// threads at once.
pub struct IntentRecognizer {
    catalog: Catalog,
    normalizer: Normalizer,
    extractor: ParameterExtractor,
    config: RecognizerConfig,
}

impl IntentRecognizer {
    pub fn new(catalog: Catalog, config: RecognizerConfig) -> Self {
        Self {
            catalog,
            normalizer: Normalizer::new(),
            extractor: ParameterExtractor::new(),
            config,
        }
    }

    /// Recognizer over the built-in catalog with default thresholds.
    pub fn with_builtin_catalog() -> Self {
        Self::new(Catalog::builtin(), RecognizerConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Classify one command and extract its parameters.
    ///
    /// Never fails for well-formed string input: empty or garbage text
    /// scores low everywhere and resolves to the unknown sentinel.
    pub fn select(&self, text: &str) -> ParseResult {
        let tokens = self.normalizer.normalize(text);

        let mut best: Option<(&IntentDefinition, f64)> = None;
        let mut all_scores = BTreeMap::new();
        for intent in self.catalog.intents() {
            let raw = score_intent(&tokens, intent);
            trace!(intent = intent.name(), raw, "scored intent");
            if self.config.collect_all_scores {
                all_scores.insert(intent.name().to_string(), raw.min(1.0));
            }
            // Strictly-greater keeps the first-registered intent on ties.
            if best.map_or(true, |(_, s)| raw > s) {
                best = Some((intent, raw));
            }
        }

        let Some((winner, raw)) = best else {
            return ParseResult::unknown(0.0, all_scores);
        };

        let confidence = raw.min(1.0);
        if confidence < self.config.confidence_threshold {
            debug!(
                best = winner.name(),
                confidence, "no intent cleared the threshold"
            );
            return ParseResult::unknown(confidence, all_scores);
        }

        let mut parameters = crate::types::Parameters::new();
        if winner.needs_parameter() {
            // Extraction runs against the raw text so payload casing survives.
            self.extractor.extract(text, winner, &mut parameters);
        }

        debug!(intent = winner.name(), confidence, "selected intent");
        ParseResult {
            intent: winner.name().to_string(),
            confidence,
            parameters,
            all_scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IntentDecl;
    use crate::types::UNKNOWN_INTENT;

    fn recognizer() -> IntentRecognizer {
        IntentRecognizer::with_builtin_catalog()
    }

    #[test]
    fn exact_alias_scores_one() {
        let r = recognizer();
        let result = r.select("open settings");
        assert_eq!(result.intent, "open_settings");
        assert!((result.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn typo_in_keyword_still_matches() {
        let result = recognizer().select("open setings");
        assert_eq!(result.intent, "open_settings");
        assert!(result.confidence >= 0.6);
    }

    #[test]
    fn word_order_does_not_matter_for_keywords() {
        let r = recognizer();
        assert_eq!(r.select("battery check").intent, "battery_status");
        assert_eq!(r.select("check battery").intent, "battery_status");
    }

    #[test]
    fn garbage_resolves_to_unknown() {
        let result = recognizer().select("xyz123abc qqq");
        assert_eq!(result.intent, UNKNOWN_INTENT);
    }

    #[test]
    fn empty_input_is_unknown_with_zero_confidence() {
        let result = recognizer().select("");
        assert_eq!(result.intent, UNKNOWN_INTENT);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn punctuation_only_input_is_unknown() {
        let result = recognizer().select("?!... ---");
        assert_eq!(result.intent, UNKNOWN_INTENT);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn specific_intent_beats_generic_on_longer_input() {
        let r = recognizer();
        assert_eq!(r.select("open network settings").intent, "open_network_settings");
        assert_eq!(r.select("open settings").intent, "open_settings");
    }

    #[test]
    fn catalog_order_breaks_exact_ties() {
        // Both intents score identically for "settings"; the earlier entry wins.
        let result = recognizer().select("settings");
        assert_eq!(result.intent, "open_settings");
    }

    #[test]
    fn volume_intents_disambiguate() {
        let r = recognizer();
        assert_eq!(r.select("mute volume").intent, "mute_volume");
        assert_eq!(r.select("increase volume").intent, "increase_volume");
        assert_eq!(r.select("volume down").intent, "decrease_volume");
    }

    #[test]
    fn night_theme_on_off_disambiguate() {
        let r = recognizer();
        assert_eq!(r.select("enable night theme").intent, "enable_night_theme");
        assert_eq!(r.select("disable night theme").intent, "disable_night_theme");
        assert_eq!(r.select("dark mode").intent, "enable_night_theme");
        assert_eq!(r.select("turn off dark mode").intent, "disable_night_theme");
    }

    #[test]
    fn bluetooth_on_off_disambiguate() {
        let r = recognizer();
        assert_eq!(r.select("turn on bluetooth").intent, "turn_on_bluetooth");
        assert_eq!(r.select("turn off bluetooth").intent, "turn_off_bluetooth");
    }

    #[test]
    fn spell_corrected_commands_match() {
        let r = recognizer();
        assert_eq!(r.select("opn calcalator").intent, "open_calculator");
        assert_eq!(r.select("lauch notpad").intent, "open_notepad");
        assert_eq!(r.select("shutdwn the computer").intent, "shutdown_pc");
    }

    #[test]
    fn long_natural_phrasing_matches() {
        let r = recognizer();
        assert_eq!(r.select("go to my settings please").intent, "open_settings");
        assert_eq!(r.select("what time is it").intent, "show_datetime");
        assert_eq!(r.select("how much ram").intent, "memory_usage");
    }

    #[test]
    fn all_scores_collected_only_when_requested() {
        let quiet = recognizer().select("check cpu");
        assert!(quiet.all_scores.is_empty());

        let r = IntentRecognizer::new(
            Catalog::builtin(),
            RecognizerConfig {
                collect_all_scores: true,
                ..RecognizerConfig::default()
            },
        );
        let verbose = r.select("check cpu");
        assert_eq!(verbose.all_scores.len(), r.catalog().len());
        assert!(verbose.all_scores.values().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn raising_threshold_never_changes_the_winner() {
        let input = "open the downloads folder";
        let loose = IntentRecognizer::new(
            Catalog::builtin(),
            RecognizerConfig {
                confidence_threshold: 0.3,
                collect_all_scores: false,
            },
        );
        let strict = IntentRecognizer::new(
            Catalog::builtin(),
            RecognizerConfig {
                confidence_threshold: 0.99,
                collect_all_scores: false,
            },
        );
        let accepted = loose.select(input);
        let gated = strict.select(input);
        assert_eq!(accepted.intent, "open_folder");
        // Stricter gate may only flip accepted intents to unknown.
        assert!(gated.intent == accepted.intent || gated.intent == UNKNOWN_INTENT);
    }

    #[test]
    fn reduced_catalog_works_without_global_state() {
        let decls = [IntentDecl {
            name: "ping",
            keywords: &["ping"],
            action_words: &[],
            aliases: &["ping"],
            extraction_patterns: &[],
            parameter_key: None,
        }];
        let r = IntentRecognizer::new(
            Catalog::from_decls(&decls).unwrap(),
            RecognizerConfig::default(),
        );
        assert_eq!(r.select("ping").intent, "ping");
        assert_eq!(r.select("open settings").intent, UNKNOWN_INTENT);
    }

    #[test]
    fn selection_is_deterministic() {
        let r = recognizer();
        let first = r.select("create folder MyData");
        for _ in 0..10 {
            let again = r.select("create folder MyData");
            assert_eq!(again.intent, first.intent);
            assert_eq!(again.confidence, first.confidence);
            assert_eq!(again.parameters, first.parameters);
        }
    }
}
