//! Intent catalog - validated, immutable registry of recognizable intents
//!
//! Catalogs are built once from declarations, validated eagerly, and never
//! mutated afterwards, so they can be shared read-only across threads.
//! Keywords, action words and aliases are pre-normalized through the same
//! [`Normalizer`] tables applied to user input, keeping the two vocabularies
//! in agreement.

use crate::normalize::Normalizer;
use crate::types::{PARAM_FOLDER_NAME, PARAM_PROGRAM_REQUEST};
use ahash::AHashSet;
use regex::Regex;
use thiserror::Error;

/// Construction-time catalog failures. These are development-time concerns;
/// a built catalog cannot fail at classification time.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate intent name: {0}")]
    DuplicateIntent(String),
    #[error("intent {0} declares no keywords or action words")]
    NoKeywords(String),
    #[error("intent {intent} has an invalid extraction pattern")]
    InvalidPattern {
        intent: String,
        #[source]
        source: regex::Error,
    },
}

/// Raw intent declaration, before normalization and pattern compilation.
#[derive(Debug, Clone, Copy)]
pub struct IntentDecl {
    pub name: &'static str,
    /// Noun-like tokens matched per input token.
    pub keywords: &'static [&'static str],
    /// Verb-like tokens ("open", "check"); merged into the keyword set by the
    /// unified scorer but declared separately so catalogs read naturally.
    pub action_words: &'static [&'static str],
    /// Canonical phrases compared whole-string against the joined input.
    pub aliases: &'static [&'static str],
    /// Ordered, case-insensitive patterns carving a trailing payload out of
    /// the raw input; the first capturing match wins.
    pub extraction_patterns: &'static [&'static str],
    /// Key the extracted payload is stored under; `Some` marks the intent as
    /// requiring a parameter.
    pub parameter_key: Option<&'static str>,
}

/// A single compiled, normalized catalog entry.
#[derive(Debug)]
pub struct IntentDefinition {
    name: String,
    keywords: Vec<String>,
    keyword_set: AHashSet<String>,
    aliases: Vec<String>,
    extraction_patterns: Vec<Regex>,
    parameter_key: Option<&'static str>,
}

impl IntentDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized, deduplicated keywords (action words merged in).
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn has_keyword(&self, token: &str) -> bool {
        self.keyword_set.contains(token)
    }

    /// Normalized alias phrases.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn extraction_patterns(&self) -> &[Regex] {
        &self.extraction_patterns
    }

    pub fn needs_parameter(&self) -> bool {
        self.parameter_key.is_some()
    }

    pub fn parameter_key(&self) -> Option<&'static str> {
        self.parameter_key
    }
}

/// Immutable intent registry. Registration order is preserved and breaks
/// exact score ties, so more specific intents are declared before generic
/// ones that share keywords.
#[derive(Debug)]
pub struct Catalog {
    intents: Vec<IntentDefinition>,
}

impl Catalog {
    /// Build a catalog from declarations, validating every entry.
    pub fn from_decls(decls: &[IntentDecl]) -> Result<Self, CatalogError> {
        let normalizer = Normalizer::new();
        let mut intents = Vec::with_capacity(decls.len());
        let mut seen: AHashSet<&str> = AHashSet::new();

        for decl in decls {
            if !seen.insert(decl.name) {
                return Err(CatalogError::DuplicateIntent(decl.name.to_string()));
            }
            if decl.keywords.is_empty() && decl.action_words.is_empty() {
                return Err(CatalogError::NoKeywords(decl.name.to_string()));
            }

            let mut keywords = Vec::new();
            let mut keyword_set = AHashSet::new();
            for word in decl.keywords.iter().chain(decl.action_words) {
                for token in normalizer.normalize(word) {
                    if keyword_set.insert(token.clone()) {
                        keywords.push(token);
                    }
                }
            }

            let mut aliases = Vec::new();
            for alias in decl.aliases {
                let normalized = normalizer.normalize_phrase(alias);
                if !normalized.is_empty() && !aliases.contains(&normalized) {
                    aliases.push(normalized);
                }
            }

            let mut extraction_patterns = Vec::with_capacity(decl.extraction_patterns.len());
            for pattern in decl.extraction_patterns {
                let compiled =
                    Regex::new(pattern).map_err(|source| CatalogError::InvalidPattern {
                        intent: decl.name.to_string(),
                        source,
                    })?;
                extraction_patterns.push(compiled);
            }

            intents.push(IntentDefinition {
                name: decl.name.to_string(),
                keywords,
                keyword_set,
                aliases,
                extraction_patterns,
                parameter_key: decl.parameter_key,
            });
        }

        Ok(Self { intents })
    }

    /// The built-in desktop-automation catalog.
    pub fn builtin() -> Self {
        // The built-in table is static and covered by tests; compiling it
        // should never fail.
        Self::from_decls(BUILTIN_INTENTS).expect("built-in catalog is valid")
    }

    pub fn intents(&self) -> &[IntentDefinition] {
        &self.intents
    }

    pub fn get(&self, name: &str) -> Option<&IntentDefinition> {
        self.intents.iter().find(|i| i.name == name)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

const NO_WORDS: &[&str] = &[];
const OPEN_ACTIONS: &[&str] = &["open", "launch", "start", "run"];
const SHOW_ACTIONS: &[&str] = &["show", "check", "display", "what", "get"];

/// Desktop-automation intents, most specific first among overlapping keyword
/// sets (exact ties resolve to the earlier entry).
pub static BUILTIN_INTENTS: &[IntentDecl] = &[
    // Folders and files. open/create/delete precede list_files because they
    // share the folder/directory nouns.
    IntentDecl {
        name: "open_folder",
        keywords: &["folder", "directory", "dir"],
        action_words: &["open", "show", "go", "navigate"],
        aliases: &["open folder", "go to folder"],
        extraction_patterns: &[
            r"(?i)(?:open|go\s+to)\s+(?:the\s+)?(?:folder|directory)\s+(?:called\s+|named\s+)?(.+)",
        ],
        parameter_key: Some(PARAM_FOLDER_NAME),
    },
    IntentDecl {
        name: "create_folder",
        keywords: &["folder", "directory", "dir"],
        action_words: &["create", "make", "new"],
        aliases: &["create folder", "make folder", "new folder"],
        extraction_patterns: &[
            r"(?i)(?:create|make|new)\s+(?:a\s+)?(?:folder|directory)\s+(?:called\s+|named\s+)?(.+)",
        ],
        parameter_key: Some(PARAM_FOLDER_NAME),
    },
    IntentDecl {
        name: "delete_folder",
        keywords: &["folder", "directory", "dir"],
        action_words: &["delete", "remove", "erase"],
        aliases: &["delete folder", "remove folder"],
        extraction_patterns: &[
            r"(?i)(?:delete|remove|erase)\s+(?:the\s+)?(?:folder|directory)\s+(?:called\s+|named\s+)?(.+)",
        ],
        parameter_key: Some(PARAM_FOLDER_NAME),
    },
    IntentDecl {
        name: "list_files",
        keywords: &["file", "directory", "folder"],
        action_words: &["list", "show", "display", "view", "what", "see"],
        aliases: &[
            "show files",
            "list files",
            "display files",
            "what files are here",
            "view files",
        ],
        extraction_patterns: &[],
        parameter_key: None,
    },
    // System information.
    IntentDecl {
        name: "cpu_usage",
        keywords: &["cpu", "processor", "usage", "load"],
        action_words: &["show", "check", "display", "what", "how", "much", "get"],
        aliases: &["cpu usage", "check cpu", "processor usage", "cpu load", "how much cpu"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "memory_usage",
        keywords: &["memory", "ram", "usage"],
        action_words: &["show", "check", "display", "what", "how", "much", "get"],
        aliases: &["memory usage", "ram usage", "check memory", "how much ram"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "system_info",
        keywords: &["system", "info", "information", "computer", "details"],
        action_words: &["show", "display", "get", "what"],
        aliases: &["system info", "system information", "pc info", "computer info"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "system_summary",
        keywords: &["system", "summary", "overview"],
        action_words: &["show", "display", "get"],
        aliases: &["system summary", "system overview"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "show_ip",
        keywords: &["ip", "address", "network"],
        action_words: SHOW_ACTIONS,
        aliases: &["show ip", "ip address", "my ip"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "battery_status",
        keywords: &["battery", "power", "status", "level", "charge"],
        action_words: SHOW_ACTIONS,
        aliases: &["battery status", "check battery", "power status"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "check_storage",
        keywords: &["storage", "disk", "space", "drive"],
        action_words: SHOW_ACTIONS,
        aliases: &["check storage", "disk space", "storage info"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "show_datetime",
        keywords: &["time", "date", "datetime", "clock"],
        action_words: &["show", "display", "what", "tell", "get"],
        aliases: &["show time", "what time", "current time", "date time"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "show_running_processes",
        keywords: &["process", "running", "task"],
        action_words: &["show", "display", "list", "get"],
        aliases: &["show processes", "running processes", "show tasks"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    // Applications.
    IntentDecl {
        name: "open_notepad",
        keywords: &["notepad", "text", "editor"],
        action_words: OPEN_ACTIONS,
        aliases: &["open notepad", "launch notepad", "start notepad"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "open_calculator",
        keywords: &["calculator", "calc"],
        action_words: OPEN_ACTIONS,
        aliases: &["open calculator", "launch calc", "start calculator"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "open_chrome",
        keywords: &["chrome", "browser"],
        action_words: OPEN_ACTIONS,
        aliases: &["open chrome", "launch chrome", "start browser"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "open_cmd",
        keywords: &["cmd", "command", "prompt", "terminal"],
        action_words: OPEN_ACTIONS,
        aliases: &["open cmd", "launch command prompt", "open terminal"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "open_whatsapp",
        keywords: &["whatsapp", "chat"],
        action_words: OPEN_ACTIONS,
        aliases: &["open whatsapp", "launch whatsapp"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "open_task_manager",
        keywords: &["task", "manager", "process"],
        action_words: &["open", "launch", "show"],
        aliases: &["open task manager", "launch task manager"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    // Settings. open_settings precedes open_network_settings so that bare
    // "settings" commands resolve to the general intent on ties.
    IntentDecl {
        name: "open_settings",
        keywords: &["settings", "preferences", "config"],
        action_words: &["open", "launch", "go"],
        aliases: &["open settings", "go to settings", "settings"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "open_network_settings",
        keywords: &["network", "wifi", "internet", "settings"],
        action_words: &["open", "launch", "show"],
        aliases: &["open network settings", "network settings"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "enable_night_theme",
        keywords: &["night", "dark", "theme", "mode"],
        action_words: &["enable", "turn", "on", "make"],
        aliases: &["enable night theme", "dark mode", "night theme", "make my screen dark"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "disable_night_theme",
        keywords: &["light", "day", "night", "dark", "theme", "mode"],
        action_words: &["disable", "turn", "off"],
        aliases: &[
            "disable night theme",
            "turn off dark mode",
            "light mode",
            "day mode",
            "light theme",
        ],
        extraction_patterns: &[],
        parameter_key: None,
    },
    // Volume.
    IntentDecl {
        name: "mute_volume",
        keywords: &["volume", "sound", "silent"],
        action_words: &["mute", "silence"],
        aliases: &["mute volume", "mute sound"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "increase_volume",
        keywords: &["volume", "up", "louder"],
        action_words: &["increase", "raise", "turn"],
        aliases: &["increase volume", "volume up", "louder", "make it louder"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "decrease_volume",
        keywords: &["volume", "down", "quieter", "lower"],
        action_words: &["decrease", "reduce"],
        aliases: &["decrease volume", "volume down", "quieter", "make it quieter"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    // Bluetooth.
    IntentDecl {
        name: "turn_on_bluetooth",
        keywords: &["bluetooth", "bt"],
        action_words: &["turn", "on", "enable", "activate"],
        aliases: &["turn on bluetooth", "enable bluetooth"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "turn_off_bluetooth",
        keywords: &["bluetooth", "bt"],
        action_words: &["turn", "off", "disable", "deactivate"],
        aliases: &["turn off bluetooth", "disable bluetooth"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    // Power. shutdown_pc and restart_pc precede cancel_shutdown, which
    // carries their trigger words as context keywords.
    IntentDecl {
        name: "shutdown_pc",
        keywords: &["shutdown", "power", "off", "pc", "computer"],
        action_words: &["turn"],
        aliases: &["shutdown", "shutdown pc", "turn off pc"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "restart_pc",
        keywords: &["restart", "reboot", "reset"],
        action_words: &["computer"],
        aliases: &["restart", "restart pc", "reboot"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "lock_pc",
        keywords: &["lock", "screen"],
        action_words: &["computer"],
        aliases: &["lock", "lock pc", "lock screen"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    IntentDecl {
        name: "cancel_shutdown",
        keywords: &["cancel", "stop", "abort"],
        action_words: &["shutdown", "restart"],
        aliases: &["cancel shutdown", "stop shutdown"],
        extraction_patterns: &[],
        parameter_key: None,
    },
    // Code generation.
    IntentDecl {
        name: "generate_program",
        keywords: &[
            "program",
            "script",
            "code",
            "function",
            "application",
            "python",
            "java",
            "javascript",
            "rust",
        ],
        action_words: &["write", "create", "generate", "make"],
        aliases: &["write a program", "generate code", "write a python program"],
        extraction_patterns: &[],
        parameter_key: Some(PARAM_PROGRAM_REQUEST),
    },
    // Conversational.
    IntentDecl {
        name: "greeting",
        keywords: &["hello", "hi", "hey", "greetings"],
        action_words: NO_WORDS,
        aliases: &["hello", "hi there", "hey"],
        extraction_patterns: &[],
        parameter_key: None,
    },
];
