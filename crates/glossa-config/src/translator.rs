use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::parse_var;

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    5 * 60
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// LibreTranslate base URL, `/translate` is appended
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Forwarded as `api_key` in every request body
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl TranslatorConfig {
    pub(crate) fn from_vars(var: &impl Fn(&str) -> Option<String>) -> Self {
        let api_url = var("LIBRETRANSLATE_URL").unwrap_or_else(default_api_url);
        let api_key = var("LIBRETRANSLATE_API_KEY").unwrap_or_default();

        let cache_ttl_secs =
            parse_var(var, "TRANSLATION_CACHE_TTL_SECS").unwrap_or_else(default_cache_ttl_secs);

        let request_timeout_ms =
            parse_var(var, "TRANSLATION_TIMEOUT_MS").unwrap_or_else(default_request_timeout_ms);

        Self {
            api_url,
            api_key,
            cache_ttl_secs,
            request_timeout_ms,
        }
    }

    pub fn translate_url(&self) -> String {
        format!("{}/translate", self.api_url.trim_end_matches('/'))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
