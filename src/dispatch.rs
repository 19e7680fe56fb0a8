//! Dispatch seam between classification and OS automation
//!
//! The engine never touches the OS or network itself; it hands a
//! [`ParseResult`] to a table of caller-registered action callables keyed by
//! intent name. Intents that need a payload declare their required parameter
//! key, and dispatch refuses to invoke them with the key absent, producing a
//! clarification prompt instead.

use crate::types::{Parameters, ParseResult};
use ahash::AHashMap;

/// An action callable supplied by the embedding application.
pub type ActionFn = Box<dyn Fn(&Parameters) -> String + Send + Sync>;

struct Handler {
    action: ActionFn,
    required_parameter: Option<&'static str>,
}

/// What dispatching a parse result produced.
#[derive(Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The action ran; carries its user-facing reply.
    Executed(String),
    /// Nothing ran; carries a prompt asking the user to rephrase or supply
    /// the missing detail.
    NeedsClarification(String),
    /// The intent was accepted but no handler is registered for it.
    Unhandled(String),
}

/// Static lookup from intent name to action.
#[derive(Default)]
pub struct DispatchTable {
    handlers: AHashMap<String, Handler>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameterless action for an intent.
    pub fn register<F>(&mut self, intent: &str, action: F)
    where
        F: Fn(&Parameters) -> String + Send + Sync + 'static,
    {
        self.handlers.insert(
            intent.to_string(),
            Handler {
                action: Box::new(action),
                required_parameter: None,
            },
        );
    }

    /// Register an action that must receive `parameter_key`.
    pub fn register_with_parameter<F>(&mut self, intent: &str, parameter_key: &'static str, action: F)
    where
        F: Fn(&Parameters) -> String + Send + Sync + 'static,
    {
        self.handlers.insert(
            intent.to_string(),
            Handler {
                action: Box::new(action),
                required_parameter: Some(parameter_key),
            },
        );
    }

    pub fn is_registered(&self, intent: &str) -> bool {
        self.handlers.contains_key(intent)
    }

    /// Route a parse result to its action, or to a clarification.
    pub fn dispatch(&self, result: &ParseResult) -> DispatchOutcome {
        if result.is_unknown() {
            return DispatchOutcome::NeedsClarification(
                "I didn't understand that command. Try rephrasing it.".to_string(),
            );
        }

        let Some(handler) = self.handlers.get(&result.intent) else {
            return DispatchOutcome::Unhandled(result.intent.clone());
        };

        if let Some(key) = handler.required_parameter {
            if !result.parameters.contains_key(key) {
                return DispatchOutcome::NeedsClarification(format!(
                    "I understood \"{}\" but I'm missing the {}. Please include it.",
                    result.intent.replace('_', " "),
                    key.replace('_', " "),
                ));
            }
        }

        DispatchOutcome::Executed((handler.action)(&result.parameters))
    }
}
