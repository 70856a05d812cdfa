use std::time::Duration;

use glossa_config::translator::TranslatorConfig;

use crate::cache::{CacheKey, CacheStats, TranslationCache};
use crate::{LibreTranslator, TranslateError, Translator};

/// Cached translation client shared by every binding in the process.
///
/// `translate` never fails: any provider error is logged and the input is
/// returned untouched. `try_translate` exposes the same lookup with errors.
pub struct TranslationService<T = LibreTranslator> {
    translator: T,
    cache: TranslationCache,
}

impl TranslationService<LibreTranslator> {
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let service = Self::new(LibreTranslator::new(config)?, config.cache_ttl());
        tracing::info!(
            "Translation service using {} (cache ttl {:?})",
            service.translator.translate_url(),
            service.cache.ttl()
        );
        Ok(service)
    }
}

impl<T: Translator> TranslationService<T> {
    pub fn new(translator: T, ttl: Duration) -> Self {
        Self {
            translator,
            cache: TranslationCache::new(ttl),
        }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Translate `text`, degrading to the original text on any failure.
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        match self.try_translate(text, source, target).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::error!(status = ?e.status(), "Translation failed: {}", e);
                text.to_string()
            }
        }
    }

    pub async fn try_translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        if source == target {
            return Ok(text.to_string());
        }

        let key = CacheKey::new(text, source, target);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Translation cache hit: {}", key.short());
            return Ok(cached);
        }

        let translation = self
            .translator
            .translate(text, source.to_string(), target.to_string())
            .await?;

        tracing::debug!(
            "Translated {} chars {} -> {} via {}",
            text.len(),
            translation.from,
            translation.to,
            translation.provider
        );

        self.cache.insert(key, translation.text.clone());
        Ok(translation.text)
    }

    pub async fn translate_to_spanish(&self, text: &str) -> String {
        self.translate(text, "en", "es").await
    }

    pub async fn translate_to_english(&self, text: &str) -> String {
        self.translate(text, "es", "en").await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
