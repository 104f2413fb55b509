use std::collections::HashMap;
use std::time::Duration;

use log::{info, warn};
use tokio::time::{sleep, Instant};

use crate::errors::ProviderError;
use crate::glossary::TermProtector;
use crate::providers::Provider;
use crate::translation::cache::{CacheStats, SessionCache};
use crate::translation::prompts::PromptLibrary;
use crate::xliff::{TranslationStrategy, TranslationUnit};

// @module: Translation service with rate limiting and fallback

/// Counters accumulated across a service's lifetime
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslationStats {
    /// Units translated by the provider
    pub translated: usize,
    /// Units that kept their original text after a provider failure
    pub fallbacks: usize,
    /// Glossary corrections applied to provider output
    pub glossary_corrections: usize,
    /// Session cache counters
    pub cache: CacheStats,
}

/// Drives provider calls for a set of translation units.
///
/// Requests are strictly sequential: one in-flight request, with a pause
/// between calls derived from the configured requests-per-minute budget.
/// A provider failure never aborts the file; the affected unit falls back to
/// its original text and processing continues.
pub struct TranslationService {
    provider: Box<dyn Provider>,
    prompts: PromptLibrary,
    protector: TermProtector,
    cache: SessionCache,
    request_interval: Duration,
    last_request: Option<Instant>,
    translated: usize,
    fallbacks: usize,
    glossary_corrections: usize,
}

impl TranslationService {
    pub fn new(
        provider: Box<dyn Provider>,
        prompts: PromptLibrary,
        protector: TermProtector,
        rate_limit_rpm: u32,
        cache_enabled: bool,
    ) -> Self {
        let rpm = rate_limit_rpm.max(1);
        TranslationService {
            provider,
            prompts,
            protector,
            cache: SessionCache::new(cache_enabled),
            request_interval: Duration::from_millis(60_000 / u64::from(rpm)),
            last_request: None,
            translated: 0,
            fallbacks: 0,
            glossary_corrections: 0,
        }
    }

    /// Provider name for logs and the run summary
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Verify the provider is reachable and credentialed. Called once before
    /// any file is touched; a failure here is fatal for the run.
    pub async fn check_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Translate a set of units into the target language.
    ///
    /// Returns a map from unit id to final text: the provider's output after
    /// glossary protection, or the original source when the call failed.
    pub async fn translate_units(
        &mut self,
        units: &[&TranslationUnit],
        target_language: &str,
    ) -> HashMap<String, String> {
        let mut translations = HashMap::new();
        let total = units.len();

        for (index, unit) in units.iter().enumerate() {
            let strategy = unit.strategy_or_default();
            info!(
                "Translating {} ({}) ({}/{}): {}",
                strategy,
                self.provider.name(),
                index + 1,
                total,
                unit.content_type.as_deref().unwrap_or("General")
            );

            let text = self.translate_unit(unit, strategy, target_language).await;
            translations.insert(unit.id.clone(), text);
        }

        translations
    }

    async fn translate_unit(
        &mut self,
        unit: &TranslationUnit,
        strategy: TranslationStrategy,
        target_language: &str,
    ) -> String {
        if let Some(cached) = self.cache.get(strategy, target_language, &unit.source) {
            return cached;
        }

        let user_prompt = match strategy {
            TranslationStrategy::Metadata => self.prompts.metadata_prompt(
                target_language,
                &unit.source,
                unit.content_type.as_deref().unwrap_or("General"),
            ),
            _ => self.prompts.brand_voice_prompt(target_language, &unit.source, &unit.purpose),
        };

        self.pause_for_rate_limit().await;

        match self.provider.complete(self.prompts.system(), &user_prompt).await {
            Ok(candidate) => {
                let (protected, corrections) = self.protector.protect(&unit.source, &candidate);
                self.glossary_corrections += corrections;
                self.translated += 1;
                self.cache
                    .put(strategy, target_language, &unit.source, protected.clone());
                protected
            }
            Err(e) => {
                warn!(
                    "Unit {}: provider call failed ({}), keeping original text",
                    unit.id, e
                );
                self.fallbacks += 1;
                unit.source.clone()
            }
        }
    }

    /// Sleep long enough to honor the requests-per-minute budget.
    async fn pause_for_rate_limit(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.request_interval {
                sleep(self.request_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }

    pub fn stats(&self) -> TranslationStats {
        TranslationStats {
            translated: self.translated,
            fallbacks: self.fallbacks,
            glossary_corrections: self.glossary_corrections,
            cache: self.cache.stats(),
        }
    }
}
