use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::parse_var;

fn default_enabled() -> bool {
    true
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "es".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

/// Defaults for a translation binding created by the app
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BindingConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl BindingConfig {
    pub(crate) fn from_vars(var: &impl Fn(&str) -> Option<String>) -> Self {
        let enabled = parse_var(var, "TRANSLATION_ENABLED").unwrap_or_else(default_enabled);
        let source_lang = var("TRANSLATION_SOURCE_LANG").unwrap_or_else(default_source_lang);
        let target_lang = var("TRANSLATION_TARGET_LANG").unwrap_or_else(default_target_lang);
        let debounce_ms =
            parse_var(var, "TRANSLATION_DEBOUNCE_MS").unwrap_or_else(default_debounce_ms);

        Self {
            enabled,
            source_lang,
            target_lang,
            debounce_ms,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
