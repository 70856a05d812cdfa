use std::time::Duration;

use glossa_config::binding::BindingConfig;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOptions {
    pub enabled: bool,
    pub source_language: String,
    pub target_language: String,
    pub debounce: Duration,
}

impl TranslationOptions {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            enabled: true,
            source_language: source_language.into(),
            target_language: target_language.into(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// English to Spanish
    pub fn spanish(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::new("en", "es")
        }
    }

    /// Spanish to English
    pub fn english(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::new("es", "en")
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl From<&BindingConfig> for TranslationOptions {
    fn from(config: &BindingConfig) -> Self {
        Self {
            enabled: config.enabled,
            source_language: config.source_lang.clone(),
            target_language: config.target_lang.clone(),
            debounce: config.debounce(),
        }
    }
}

/// What a binding publishes to its observers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated_text: String,
    pub is_translating: bool,
    pub error: Option<String>,
}

impl TranslationResult {
    pub(crate) fn settled(translated_text: String) -> Self {
        Self {
            translated_text,
            is_translating: false,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_options_fix_direction() {
        let spanish = TranslationOptions::spanish(false);
        assert_eq!(
            (spanish.source_language.as_str(), spanish.target_language.as_str()),
            ("en", "es")
        );
        assert!(!spanish.enabled);
        assert_eq!(spanish.debounce, DEFAULT_DEBOUNCE);

        let english = TranslationOptions::english(true);
        assert_eq!(
            (english.source_language.as_str(), english.target_language.as_str()),
            ("es", "en")
        );
        assert!(english.enabled);
    }

    #[test]
    fn options_from_config() {
        let config = BindingConfig {
            enabled: false,
            source_lang: "fr".to_string(),
            target_lang: "de".to_string(),
            debounce_ms: 120,
        };
        let options = TranslationOptions::from(&config);

        assert_eq!(
            options,
            TranslationOptions::new("fr", "de")
                .with_enabled(false)
                .with_debounce(Duration::from_millis(120))
        );
    }

    #[test]
    fn default_result_is_idle() {
        let result = TranslationResult::default();
        assert_eq!(result.translated_text, "");
        assert!(!result.is_translating);
        assert_eq!(result.error, None);
    }
}
