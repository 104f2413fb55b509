// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::{Config, TranslationProvider};
use app_controller::Controller;
use batch::BatchProcessor;

mod app_config;
mod app_controller;
mod batch;
mod classification;
mod duplicates;
mod errors;
mod file_utils;
mod glossary;
mod providers;
mod translation;
mod xliff;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Claude,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Claude => TranslationProvider::Claude,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a single XLIFF file (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Translate every XLIFF file in a folder, with resume support
    Batch(BatchArgs),

    /// Generate shell completions for xliffwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input XLIFF file to process
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output directory for translated files
    #[arg(short, long, default_value = "translated")]
    output_dir: PathBuf,

    /// Target language code (e.g., 'en', 'de', 'fr'); defaults to the
    /// target-language attribute of the XLIFF file
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input directory containing XLIFF files
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Output directory for translated files
    #[arg(short, long, default_value = "translated")]
    output_dir: PathBuf,

    /// Target language codes
    #[arg(short, long, default_values_t = vec!["en".to_string()])]
    target_languages: Vec<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Progress ledger path used for resuming interrupted batches
    #[arg(long, default_value = "logs/batch-progress.json")]
    ledger: PathBuf,

    /// Start from scratch, ignoring a previous progress ledger
    #[arg(long)]
    no_resume: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// xliffwai - XLIFF Brand-Voice Translator
///
/// Translates WPML XLIFF exports using AI providers while preserving document
/// structure, duplicate consistency and glossary terms.
#[derive(Parser, Debug)]
#[command(name = "xliffwai")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered XLIFF translation tool")]
#[command(long_about = "xliffwai translates WPML XLIFF 1.2 exports with AI providers.

EXAMPLES:
    xliffwai page-export.xliff                    # Translate using default config
    xliffwai -t de page-export.xliff              # Translate to German
    xliffwai -p openai -m gpt-4o page.xliff       # Use specific provider and model
    xliffwai batch input/ -t en -t de             # Translate a folder to two languages
    xliffwai batch input/ --no-resume             # Ignore a previous progress ledger
    xliffwai completions bash > xliffwai.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    openai - OpenAI API (requires OPENAI_API_KEY)
    claude - Anthropic Claude API (requires CLAUDE_API_KEY)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input XLIFF file to process
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Output directory for translated files
    #[arg(short, long, default_value = "translated")]
    output_dir: PathBuf,

    /// Target language code
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "xliffwai", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        Some(Commands::Batch(args)) => run_batch(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_file = cli
                .input_file
                .ok_or_else(|| anyhow!("INPUT_FILE is required when no subcommand is specified"))?;

            run_translate(TranslateArgs {
                input_file,
                output_dir: cli.output_dir,
                target_language: cli.target_language,
                provider: cli.provider,
                model: cli.model,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
            .await
        }
    }
}

/// Load configuration and apply CLI overrides
fn load_config(
    config_path: &str,
    provider: Option<&CliTranslationProvider>,
    model: Option<&str>,
    log_level: Option<&CliLogLevel>,
) -> Result<Config> {
    let mut config =
        Config::from_file(config_path).context("Failed to load or create configuration")?;

    if let Some(provider) = provider {
        config.default_provider = provider.clone().into();
    }
    if let Some(model) = model {
        match config.default_provider {
            TranslationProvider::OpenAI => config.openai.model = model.to_string(),
            TranslationProvider::Claude => config.claude.model = model.to_string(),
        }
    }
    if let Some(log_level) = log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let config = load_config(
        &options.config_path,
        options.provider.as_ref(),
        options.model.as_deref(),
        options.log_level.as_ref(),
    )?;

    let mut controller = Controller::with_config(config, None)?;
    controller.check_provider().await?;

    controller
        .translate_file(
            &options.input_file,
            &options.output_dir,
            options.target_language.as_deref(),
            options.force_overwrite,
        )
        .await?;

    Ok(())
}

async fn run_batch(options: BatchArgs) -> Result<()> {
    let config = load_config(
        &options.config_path,
        options.provider.as_ref(),
        None,
        options.log_level.as_ref(),
    )?;

    let controller = Controller::with_config(config, None)?;
    controller.check_provider().await?;

    let mut processor = BatchProcessor::new(controller, options.ledger, !options.no_resume);
    let outcome = processor
        .run(
            &options.input_dir,
            &options.output_dir,
            &options.target_languages,
            options.force_overwrite,
        )
        .await?;

    if outcome.failed > 0 {
        return Err(anyhow!("{} batch jobs failed", outcome.failed));
    }

    Ok(())
}
