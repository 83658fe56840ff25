use anyhow::{Result, anyhow};
use isolang::Language;
use std::collections::HashMap;

/// Locale utilities
///
/// Dictionary files are named by `language_REGION` locale codes (`fr_FR`),
/// while the provider expects ISO 639-1 language codes (`fr`). The mapping
/// happens only when a request is built; file names and dictionary content
/// always use the locale code.

/// Language subtag of a locale code, lowercased (`pt_BR` -> `pt`)
pub fn language_subtag(locale: &str) -> String {
    locale
        .trim()
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Code sent to the provider for a locale.
///
/// An explicit override wins; otherwise the language subtag is used.
/// `in_HI` needs an override because `in` is the withdrawn code for
/// Indonesian, not Hindi.
pub fn provider_code(locale: &str, overrides: &HashMap<String, String>) -> String {
    match overrides.get(locale) {
        Some(code) => code.clone(),
        None => language_subtag(locale),
    }
}

/// Check that a provider code names a known ISO 639-1 language
pub fn validate_provider_code(code: &str) -> Result<()> {
    let language = language_subtag(code);
    if language.len() == 2 && Language::from_639_1(&language).is_some() {
        return Ok(());
    }
    Err(anyhow!("Invalid provider language code: {}", code))
}

/// Check that a locale looks like `ll` or `ll_RR`
pub fn validate_locale_code(locale: &str) -> Result<()> {
    let valid = !locale.is_empty()
        && locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(anyhow!("Invalid locale code: '{}'", locale))
    }
}

/// English name of the language a provider code refers to
pub fn get_language_name(code: &str) -> Result<String> {
    let language = language_subtag(code);
    let lang = Language::from_639_1(&language)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}
