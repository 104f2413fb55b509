use std::collections::HashMap;

use log::debug;
use sha2::{Digest, Sha256};

use crate::xliff::TranslationStrategy;

// @module: Per-session translation cache

/// Cache counters surfaced in the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// In-memory cache keyed by (strategy, target language, source text).
///
/// Identical source strings reaching the service through different units
/// (e.g. across files in a batch) are translated once per session.
pub struct SessionCache {
    enabled: bool,
    entries: HashMap<String, String>,
    hits: usize,
    misses: usize,
}

impl SessionCache {
    pub fn new(enabled: bool) -> Self {
        SessionCache {
            enabled,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a cached translation, counting the hit or miss.
    pub fn get(
        &mut self,
        strategy: TranslationStrategy,
        target_language: &str,
        text: &str,
    ) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = Self::key(strategy, target_language, text);
        match self.entries.get(&key) {
            Some(translation) => {
                self.hits += 1;
                debug!("Cache hit for {} ({})", strategy, target_language);
                Some(translation.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a translation for the rest of the session.
    pub fn put(
        &mut self,
        strategy: TranslationStrategy,
        target_language: &str,
        text: &str,
        translation: String,
    ) {
        if !self.enabled {
            return;
        }
        let key = Self::key(strategy, target_language, text);
        self.entries.insert(key, translation);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    fn key(strategy: TranslationStrategy, target_language: &str, text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(strategy.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(target_language.as_bytes());
        hasher.update(b"|");
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
