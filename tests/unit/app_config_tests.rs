/*!
 * Tests for configuration loading, defaults and validation.
 */

use xliffwai::app_config::{Config, TranslationProvider};
use xliffwai::errors::ProviderError;

use crate::common::create_temp_dir;

#[test]
fn test_config_default_shouldMatchShippedSettings() {
    let config = Config::default();

    assert_eq!(config.default_provider, TranslationProvider::Claude);
    assert_eq!(config.claude.model, "claude-3-5-sonnet-20241022");
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.rate_limit_rpm, 3);
    assert_eq!(config.pipeline.target_state, "translated");
    assert!(config.pipeline.remove_state_qualifier);
    assert!(config.cache_enabled);
}

#[test]
fn test_config_jsonRoundTrip_shouldPreserveSettings() {
    let config = Config::default();

    let json = serde_json::to_string(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.default_provider, config.default_provider);
    assert_eq!(parsed.claude.model, config.claude.model);
    assert_eq!(parsed.content_types.brand_voice, config.content_types.brand_voice);
}

#[test]
fn test_config_fromFile_withMissingFile_shouldCreateDefaultTemplate() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::from_file(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.rate_limit_rpm, 3);
}

#[test]
fn test_config_fromFile_withPartialJson_shouldFillDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, r#"{"rate_limit_rpm": 10}"#).unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.rate_limit_rpm, 10);
    assert_eq!(config.claude.model, "claude-3-5-sonnet-20241022");
}

#[test]
fn test_config_validate_withZeroRateLimit_shouldFail() {
    let mut config = Config::default();
    config.rate_limit_rpm = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_withEmptyTargetState_shouldFail() {
    let mut config = Config::default();
    config.pipeline.target_state = "  ".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_config_resolveApiKey_withMissingEnv_shouldReportVariableName() {
    let mut config = Config::default();
    config.claude.key_env = "XLIFFWAI_TEST_MISSING_KEY".to_string();

    let result = config.resolve_api_key(TranslationProvider::Claude);

    match result {
        Err(ProviderError::MissingApiKey(var)) => assert_eq!(var, "XLIFFWAI_TEST_MISSING_KEY"),
        other => panic!("expected MissingApiKey, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_config_resolveApiKey_withEnvSet_shouldReturnKey() {
    let mut config = Config::default();
    config.openai.key_env = "XLIFFWAI_TEST_PRESENT_KEY".to_string();
    unsafe { std::env::set_var("XLIFFWAI_TEST_PRESENT_KEY", "sk-test") };

    let key = config.resolve_api_key(TranslationProvider::OpenAI).unwrap();

    assert_eq!(key, "sk-test");
}
