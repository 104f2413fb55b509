use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::classification::{ContentTypeRules, NonTranslatableRuleSet};
use crate::errors::ProviderError;
use crate::glossary::Glossary;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation provider to use by default
    #[serde(default)]
    pub default_provider: TranslationProvider,

    /// OpenAI provider settings
    #[serde(default)]
    pub openai: OpenAIConfig,

    /// Anthropic provider settings
    #[serde(default)]
    pub claude: AnthropicConfig,

    /// Requests per minute across all providers
    #[serde(default = "default_rate_limit_rpm")]
    pub rate_limit_rpm: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// XLIFF rewrite settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Whether the per-session translation cache is enabled
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Content-type tag sets for the classifier
    #[serde(default)]
    pub content_types: ContentTypeRules,

    /// Non-translatable rule tables
    #[serde(default)]
    pub non_translatable: NonTranslatableRuleSet,

    /// Glossary categories for term protection
    #[serde(default)]
    pub glossary: Glossary,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI
    OpenAI,
    // @provider: Anthropic
    #[default]
    Claude,
}

impl TranslationProvider {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Claude => "claude".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "claude" | "anthropic" => Ok(Self::Claude),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// OpenAI service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIConfig {
    /// Model name (e.g., "gpt-4o-mini")
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_openai_key_env")]
    pub key_env: String,

    /// Service endpoint URL (optional, for Azure OpenAI or self-hosted)
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,

    /// Maximum tokens to generate per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            key_env: default_openai_key_env(),
            endpoint: default_openai_endpoint(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Anthropic service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnthropicConfig {
    /// Model name (e.g., "claude-3-5-sonnet-20241022")
    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_anthropic_key_env")]
    pub key_env: String,

    /// Service endpoint URL (optional, for self-hosted)
    #[serde(default = "default_anthropic_endpoint")]
    pub endpoint: String,

    /// Maximum tokens to generate per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: default_anthropic_model(),
            key_env: default_anthropic_key_env(),
            endpoint: default_anthropic_endpoint(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// XLIFF rewrite settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineConfig {
    /// State attribute written on every populated target
    #[serde(default = "default_target_state")]
    pub target_state: String,

    /// Drop the state-qualifier attribute from rewritten targets
    #[serde(default = "default_true")]
    pub remove_state_qualifier: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_state: default_target_state(),
            remove_state_qualifier: default_true(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log-crate filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_rate_limit_rpm() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_anthropic_key_env() -> String {
    "CLAUDE_API_KEY".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_target_state() -> String {
    "translated".to_string()
}

impl Config {
    /// Load configuration from a JSON file. When the file is missing a
    /// default configuration is written there first, so a fresh install
    /// produces an editable template.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_rpm == 0 {
            return Err(anyhow!("rate_limit_rpm must be at least 1"));
        }
        if self.pipeline.target_state.trim().is_empty() {
            return Err(anyhow!("pipeline.target_state must not be empty"));
        }
        Url::parse(&self.openai.endpoint)
            .with_context(|| format!("Invalid OpenAI endpoint: {}", self.openai.endpoint))?;
        Url::parse(&self.claude.endpoint)
            .with_context(|| format!("Invalid Claude endpoint: {}", self.claude.endpoint))?;
        match self.default_provider {
            TranslationProvider::OpenAI if self.openai.model.is_empty() => {
                Err(anyhow!("A model is required for the OpenAI provider"))
            }
            TranslationProvider::Claude if self.claude.model.is_empty() => {
                Err(anyhow!("A model is required for the Claude provider"))
            }
            _ => Ok(()),
        }
    }

    /// Resolve the API key for a provider from its configured environment
    /// variable. Checked once at startup, before any file is touched.
    pub fn resolve_api_key(&self, provider: TranslationProvider) -> Result<String, ProviderError> {
        let key_env = match provider {
            TranslationProvider::OpenAI => &self.openai.key_env,
            TranslationProvider::Claude => &self.claude.key_env,
        };
        std::env::var(key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::MissingApiKey(key_env.clone()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_provider: TranslationProvider::default(),
            openai: OpenAIConfig::default(),
            claude: AnthropicConfig::default(),
            rate_limit_rpm: default_rate_limit_rpm(),
            timeout_seconds: default_timeout_secs(),
            pipeline: PipelineConfig::default(),
            cache_enabled: true,
            content_types: ContentTypeRules::default(),
            non_translatable: NonTranslatableRuleSet::default(),
            glossary: Glossary::default(),
            log_level: LogLevel::default(),
        }
    }
}
