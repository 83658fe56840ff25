/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use locale_sync::app_config::{Config, LogLevel, ProviderConfig};
use std::path::PathBuf;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_locale, "en_US");
    assert_eq!(config.target_locales.len(), 13);
    assert!(config.target_locales.contains(&"in_HI".to_string()));
    assert_eq!(config.dictionary_dir, PathBuf::from("."));
    assert!(!config.clear_retranslate_markers);
    assert_eq!(config.log_level, LogLevel::Info);

    assert_eq!(config.provider.endpoint, "https://translate.google.com");
    assert_eq!(config.provider.timeout_secs, 30);
    assert_eq!(config.provider.token_ttl_secs, 3600);
    assert_eq!(config.provider.locale_overrides.get("in_HI").map(String::as_str), Some("hi"));
}

/// Test that the default configuration is valid
#[test]
fn test_default_config_shouldValidate() {
    assert!(Config::default().validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // Source listed as target
    config.target_locales.push("en_US".to_string());
    assert!(config.validate().is_err());
    config.target_locales.pop();

    // Duplicate target
    config.target_locales.push("fr_FR".to_string());
    assert!(config.validate().is_err());
    config.target_locales.pop();

    // No targets
    let saved = std::mem::take(&mut config.target_locales);
    assert!(config.validate().is_err());
    config.target_locales = saved;

    // Bad endpoint
    config.provider.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.provider.endpoint = "https://translate.google.com".to_string();

    // Zero timeout
    config.provider.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.provider.timeout_secs = 30;

    // Unknown language without override
    config.target_locales.push("xx_YY".to_string());
    assert!(config.validate().is_err());
    config.provider.locale_overrides.insert("xx_YY".to_string(), "de".to_string());
    assert!(config.validate().is_ok());
}

/// Test that a partial file is filled with defaults
#[test]
fn test_loadOrDefault_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "locale-sync.json",
        r#"{ "target_locales": ["fr_FR"], "provider": { "request_delay_ms": 0 }, "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.source_locale, "en_US");
    assert_eq!(config.target_locales, vec!["fr_FR".to_string()]);
    assert_eq!(config.provider.request_delay_ms, 0);
    assert_eq!(config.provider.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that a missing file yields the defaults
#[test]
fn test_loadOrDefault_withMissingFile_shouldReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("absent.json"))?;
    assert_eq!(config, Config::default());
    Ok(())
}

/// Test that an unreadable file is reported
#[test]
fn test_loadOrDefault_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "locale-sync.json", "{ nope")?;
    assert!(Config::load_or_default(&path).is_err());
    Ok(())
}

/// Test provider code mapping through the config
#[test]
fn test_providerConfig_providerCode_shouldApplyOverridesOnly() {
    let provider = ProviderConfig::default();
    assert_eq!(provider.provider_code("in_HI"), "hi");
    assert_eq!(provider.provider_code("pt_BR"), "pt");
    assert_eq!(provider.provider_code("en_US"), "en");
}

/// Test log level conversion
#[test]
fn test_logLevel_intoLevelFilter_shouldMapEachLevel() {
    assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}
