use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::app_config::{Config, TranslationProvider};
use crate::classification::{ContentClassifier, NonTranslatableRuleEngine};
use crate::duplicates::DuplicateDetector;
use crate::file_utils::FileManager;
use crate::glossary::TermProtector;
use crate::providers::{Anthropic, OpenAI, Provider};
use crate::translation::{PromptLibrary, TranslationService};
use crate::xliff::{TranslationStrategy, XliffDocument};

// @module: Application controller for the XLIFF translation pipeline

/// Main application controller driving the per-file pipeline:
/// parse, detect duplicates, classify, apply non-translatable rules,
/// translate representatives, insert translations, save.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation service, shared across files so the cache carries
    service: TranslationService,
}

impl Controller {
    // @method: Create a controller with the given configuration
    // Resolves the provider API key up front; a missing key is fatal here,
    // before any file is touched.
    pub fn with_config(config: Config, provider: Option<TranslationProvider>) -> Result<Self> {
        let provider_kind = provider.unwrap_or(config.default_provider);
        let api_key = config.resolve_api_key(provider_kind)?;

        let client: Box<dyn Provider> = match provider_kind {
            TranslationProvider::OpenAI => Box::new(OpenAI::new(
                api_key,
                config.openai.endpoint.clone(),
                config.openai.model.clone(),
                config.openai.max_tokens,
                config.openai.temperature,
                config.timeout_seconds,
            )),
            TranslationProvider::Claude => Box::new(Anthropic::new(
                api_key,
                config.claude.endpoint.clone(),
                config.claude.model.clone(),
                config.claude.max_tokens,
                config.timeout_seconds,
            )),
        };

        Self::with_service_and_config(config, client)
    }

    /// Create a controller around an arbitrary provider. Used by tests to
    /// inject a mock provider.
    pub fn with_service_and_config(config: Config, provider: Box<dyn Provider>) -> Result<Self> {
        let protector = TermProtector::new(&config.glossary)
            .context("Failed to compile glossary term matchers")?;
        let service = TranslationService::new(
            provider,
            PromptLibrary::new(),
            protector,
            config.rate_limit_rpm,
            config.cache_enabled,
        );

        Ok(Controller { config, service })
    }

    /// Verify the provider is reachable before processing starts
    pub async fn check_provider(&self) -> Result<()> {
        self.service
            .check_connection()
            .await
            .context("Provider connection check failed")?;
        info!("Provider '{}' is reachable", self.service.provider_name());
        Ok(())
    }

    /// Translation service counters accumulated so far
    pub fn translation_stats(&self) -> crate::translation::TranslationStats {
        self.service.stats()
    }

    /// Run the pipeline for a single file.
    ///
    /// Returns the output path, or `None` when the output already exists and
    /// `force_overwrite` is not set.
    pub async fn translate_file(
        &mut self,
        input_file: &Path,
        output_dir: &Path,
        target_language: Option<&str>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let mut document = XliffDocument::parse(input_file)
            .with_context(|| format!("Failed to parse XLIFF file: {:?}", input_file))?
            .with_insertion_config(
                &self.config.pipeline.target_state,
                self.config.pipeline.remove_state_qualifier,
            );

        let target_language = target_language
            .map(str::to_string)
            .unwrap_or_else(|| document.target_language.clone());

        let output_path =
            FileManager::generate_output_path(input_file, output_dir, &target_language);
        if FileManager::file_exists(&output_path) && !force_overwrite {
            info!("Translation already exists at {:?}, skipping", output_path);
            return Ok(None);
        }

        info!(
            "Processing {:?} ({} -> {})",
            input_file, document.source_language, target_language
        );

        // Duplicate detection before classification so representatives are
        // fixed in document order
        let duplicate_map = DuplicateDetector::detect(document.units_mut());
        document.set_duplicate_groups(duplicate_map);

        let classifier = ContentClassifier::new(self.config.content_types.clone());
        classifier.classify(document.units_mut());

        let rule_engine = NonTranslatableRuleEngine::compile(&self.config.non_translatable)
            .context("Failed to compile non-translatable rules")?;
        rule_engine.apply(document.units_mut());

        let stats = document.stats_by_strategy();
        info!("Classified {} units: {}", stats.total(), stats);

        let translations = self.build_translations(&document, &target_language).await;

        let report = document.insert_translations(&translations);
        info!(
            "Inserted {} translations ({} propagated to duplicates)",
            report.applied + report.propagated,
            report.propagated
        );

        document
            .save(&output_path)
            .with_context(|| format!("Failed to save translated file: {:?}", output_path))?;

        let t_stats = self.service.stats();
        info!(
            "Done: {} translated, {} fallbacks, {} glossary corrections, cache {}+{}",
            t_stats.translated,
            t_stats.fallbacks,
            t_stats.glossary_corrections,
            t_stats.cache.hits,
            t_stats.cache.misses
        );

        Ok(Some(output_path))
    }

    /// Build the id -> text map handed to the document.
    ///
    /// Brand-voice and metadata representatives go through the provider.
    /// Non-translatable representatives keep their source text so their
    /// target slots still get populated with the terminal state. Duplicates
    /// are filled by group propagation inside the document.
    async fn build_translations(
        &mut self,
        document: &XliffDocument,
        target_language: &str,
    ) -> HashMap<String, String> {
        let representatives: Vec<_> = document
            .units()
            .iter()
            .filter(|u| !u.is_duplicate)
            .filter(|u| {
                matches!(
                    u.strategy_or_default(),
                    TranslationStrategy::BrandVoice | TranslationStrategy::Metadata
                )
            })
            .collect();

        debug!(
            "{} representative units go to the provider",
            representatives.len()
        );

        let mut translations = self
            .service
            .translate_units(&representatives, target_language)
            .await;

        for unit in document.units() {
            if unit.is_duplicate {
                continue;
            }
            if unit.strategy_or_default() == TranslationStrategy::NonTranslatable {
                translations.insert(unit.id.clone(), unit.source.clone());
            }
        }

        translations
    }
}
