/*!
 * Batch processing.
 *
 * Runs the translation pipeline over every XLIFF file in a folder, for one or
 * more target languages. Progress is checkpointed to a JSON ledger after each
 * job so an interrupted batch can resume without repeating completed work.
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::app_controller::Controller;
use crate::file_utils::FileManager;

/// One ledger entry per finished job
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JobRecord {
    status: String,
    timestamp: String,
}

/// Resume ledger persisted between batch runs
#[derive(Debug, Default, Serialize, Deserialize)]
struct BatchLedger {
    #[serde(default)]
    completed: BTreeMap<String, JobRecord>,
}

impl BatchLedger {
    fn load(path: &Path, resume: bool) -> Self {
        if resume && path.exists() {
            match FileManager::read_to_string(path)
                .and_then(|c| serde_json::from_str(&c).map_err(Into::into))
            {
                Ok(ledger) => return ledger,
                Err(e) => warn!("Could not read batch ledger {:?}: {}", path, e),
            }
        }
        BatchLedger::default()
    }

    fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        FileManager::write_to_file(path, &content)
    }

    fn is_completed(&self, job_key: &str) -> bool {
        self.completed.contains_key(job_key)
    }

    fn mark(&mut self, job_key: &str, status: &str) {
        self.completed.insert(
            job_key.to_string(),
            JobRecord {
                status: status.to_string(),
                timestamp: Utc::now().to_rfc3339(),
            },
        );
    }
}

/// End-of-batch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.success + self.failed + self.skipped
    }
}

/// Batch runner: files x languages jobs driven through one controller
pub struct BatchProcessor {
    controller: Controller,
    ledger_path: PathBuf,
    resume: bool,
}

impl BatchProcessor {
    pub fn new(controller: Controller, ledger_path: PathBuf, resume: bool) -> Self {
        BatchProcessor {
            controller,
            ledger_path,
            resume,
        }
    }

    /// Process every XLIFF file in `input_dir` for each target language.
    ///
    /// One failed job never stops the batch: the failure is recorded in the
    /// ledger and processing moves on to the next job.
    pub async fn run(
        &mut self,
        input_dir: &Path,
        output_dir: &Path,
        languages: &[String],
        force_overwrite: bool,
    ) -> Result<BatchOutcome> {
        let files = FileManager::find_xliff_files(input_dir)
            .with_context(|| format!("Failed to discover XLIFF files in {:?}", input_dir))?;
        if files.is_empty() {
            warn!("No XLIFF files found in {:?}", input_dir);
            return Ok(BatchOutcome::default());
        }

        let mut ledger = BatchLedger::load(&self.ledger_path, self.resume);
        let total_jobs = files.len() * languages.len();
        info!(
            "Batch: {} files x {} languages = {} jobs",
            files.len(),
            languages.len(),
            total_jobs
        );

        let progress = ProgressBar::new(total_jobs as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut outcome = BatchOutcome::default();

        for file in &files {
            let filename = file
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();

            for language in languages {
                let job_key = format!("{filename}_{language}");
                progress.set_message(job_key.clone());

                if ledger.is_completed(&job_key) {
                    info!("Job {} already completed, skipping", job_key);
                    outcome.skipped += 1;
                    progress.inc(1);
                    continue;
                }

                match self
                    .controller
                    .translate_file(file, output_dir, Some(language), force_overwrite)
                    .await
                {
                    Ok(Some(output)) => {
                        info!("Job {} finished: {:?}", job_key, output);
                        ledger.mark(&job_key, "success");
                        outcome.success += 1;
                    }
                    Ok(None) => {
                        ledger.mark(&job_key, "skipped");
                        outcome.skipped += 1;
                    }
                    Err(e) => {
                        error!("Job {} failed: {:#}", job_key, e);
                        ledger.mark(&job_key, "failed");
                        outcome.failed += 1;
                    }
                }

                // Checkpoint after every job so interrupts lose nothing
                if let Err(e) = ledger.save(&self.ledger_path) {
                    warn!("Could not save batch ledger: {}", e);
                }
                progress.inc(1);
            }
        }

        progress.finish_and_clear();

        let stats = self.controller.translation_stats();
        info!(
            "Batch complete: {} success | {} failed | {} skipped ({} jobs)",
            outcome.success,
            outcome.failed,
            outcome.skipped,
            outcome.total()
        );
        info!(
            "Provider totals: {} translated, {} fallbacks, {} glossary corrections, cache {}+{}",
            stats.translated,
            stats.fallbacks,
            stats.glossary_corrections,
            stats.cache.hits,
            stats.cache.misses
        );

        Ok(outcome)
    }
}
