//! In-memory translation cache with lazy expiry.
//! Key: (source language, target language, source text). Default TTL: 5 minutes.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Diagnostic keys are cut to this many characters
const STATS_KEY_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source: String,
    pub target: String,
    pub text: String,
}

impl CacheKey {
    pub fn new(text: &str, source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            text: text.to_string(),
        }
    }

    /// Display form truncated for logs and stats
    pub fn short(&self) -> String {
        self.to_string().chars().take(STATS_KEY_CHARS).collect()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.source, self.target, self.text)
    }
}

struct CacheEntry {
    translated_text: String,
    created_at: Instant,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

pub struct TranslationCache {
    inner: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl TranslationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a cached translation. Expired entries read as absent but stay
    /// stored until overwritten or cleared.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let cache = self.inner.lock();
        cache
            .get(key)
            .filter(|entry| entry.created_at.elapsed() < self.ttl)
            .map(|entry| entry.translated_text.clone())
    }

    /// Store a translation, replacing any previous entry for the key.
    pub fn insert(&self, key: CacheKey, translated_text: String) {
        let mut cache = self.inner.lock();
        cache.insert(
            key,
            CacheEntry {
                translated_text,
                created_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let cache = self.inner.lock();
        CacheStats {
            size: cache.len(),
            keys: cache.keys().map(CacheKey::short).collect(),
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
