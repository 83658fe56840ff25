use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::default::Default;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::locale;

/// Application configuration module
/// This module handles loading, defaulting and validating the settings of
/// a sync run. Every field has a serde default, so a partial file works.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Locale of the source-of-truth dictionary
    #[serde(default = "default_source_locale")]
    pub source_locale: String,

    /// Locales kept in sync with the source
    #[serde(default = "default_target_locales")]
    pub target_locales: Vec<String>,

    /// Directory holding the `<locale>.json` files
    #[serde(default = "default_dictionary_dir")]
    pub dictionary_dir: PathBuf,

    /// Strip `(UTO)` from the source once every target has consumed it
    #[serde(default)]
    pub clear_retranslate_markers: bool,

    /// Translation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    // @field: Provider base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Per-request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Session token lifetime seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    // @field: Pause between consecutive provider requests
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    // @field: Interface language sent as `hl`
    #[serde(default = "default_ui_language")]
    pub ui_language: String,

    // @field: Locale code -> provider code exceptions
    #[serde(default = "default_locale_overrides")]
    pub locale_overrides: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Provider code for a locale, applying the override table
    pub fn provider_code(&self, locale: &str) -> String {
        locale::provider_code(locale, &self.locale_overrides)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            token_ttl_secs: default_token_ttl_secs(),
            request_delay_ms: default_request_delay_ms(),
            ui_language: default_ui_language(),
            locale_overrides: default_locale_overrides(),
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

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_locale() -> String {
    "en_US".to_string()
}

fn default_target_locales() -> Vec<String> {
    [
        "id_ID", "zh_CN", "es_ES", "fr_FR", "ja_JP", "ko_KR", "ru_RU", "th_TH", "vi_VN", "in_HI",
        "pl_PL", "nl_NL", "pt_BR",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_dictionary_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_endpoint() -> String {
    "https://translate.google.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_token_ttl_secs() -> u64 {
    3600 // Session markers are good for about an hour
}

fn default_request_delay_ms() -> u64 {
    250
}

fn default_ui_language() -> String {
    "en-US".to_string()
}

fn default_locale_overrides() -> HashMap<String, String> {
    HashMap::from([("in_HI".to_string(), "hi".to_string())])
}

impl Config {
    /// Load a configuration file, falling back to defaults when it is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        locale::validate_locale_code(&self.source_locale)?;

        if self.target_locales.is_empty() {
            return Err(anyhow!("At least one target locale is required"));
        }

        let mut seen = HashSet::new();
        for target in &self.target_locales {
            locale::validate_locale_code(target)?;
            if target == &self.source_locale {
                return Err(anyhow!("Target locale '{}' is the source locale", target));
            }
            if !seen.insert(target.as_str()) {
                return Err(anyhow!("Target locale '{}' is listed twice", target));
            }
            let code = self.provider.provider_code(target);
            locale::validate_provider_code(&code)
                .with_context(|| format!("Locale '{}' maps to an unknown language; add a locale override", target))?;
        }
        locale::validate_provider_code(&self.provider.provider_code(&self.source_locale))?;

        Url::parse(&self.provider.endpoint)
            .context(format!("Invalid provider endpoint: {}", self.provider.endpoint))?;

        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("Provider timeout must be greater than zero"));
        }
        if self.provider.token_ttl_secs == 0 {
            return Err(anyhow!("Token lifetime must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_locale: default_source_locale(),
            target_locales: default_target_locales(),
            dictionary_dir: default_dictionary_dir(),
            clear_retranslate_markers: false,
            provider: ProviderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
