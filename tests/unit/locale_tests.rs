/*!
 * Tests for locale utility functions
 */

use std::collections::HashMap;
use locale_sync::locale::{get_language_name, language_subtag, provider_code, validate_locale_code, validate_provider_code};

/// Every default target maps to a known language once overrides apply
#[test]
fn test_providerCode_forDefaultTargets_shouldBeValidLanguages() {
    let overrides = HashMap::from([("in_HI".to_string(), "hi".to_string())]);
    let targets = [
        "id_ID", "zh_CN", "es_ES", "fr_FR", "ja_JP", "ko_KR", "ru_RU", "th_TH", "vi_VN", "in_HI",
        "pl_PL", "nl_NL", "pt_BR",
    ];
    for target in targets {
        let code = provider_code(target, &overrides);
        assert!(validate_provider_code(&code).is_ok(), "{} -> {}", target, code);
    }
}

#[test]
fn test_providerCode_withoutOverride_shouldUseLanguageSubtag() {
    let overrides = HashMap::new();
    assert_eq!(provider_code("ja_JP", &overrides), "ja");
    assert_eq!(provider_code("in_HI", &overrides), "in");
}

#[test]
fn test_languageSubtag_withBareLanguage_shouldReturnIt() {
    assert_eq!(language_subtag("de"), "de");
    assert_eq!(language_subtag(" KO_kr "), "ko");
}

#[test]
fn test_validateProviderCode_withInvalidCodes_shouldFail() {
    assert!(validate_provider_code("xx").is_err());
    assert!(validate_provider_code("").is_err());
    assert!(validate_provider_code("english").is_err());
}

#[test]
fn test_validateLocaleCode_shouldRejectPathCharacters() {
    assert!(validate_locale_code("fr_FR").is_ok());
    assert!(validate_locale_code("zh-CN").is_ok());
    assert!(validate_locale_code("../etc").is_err());
    assert!(validate_locale_code("").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fr_FR").unwrap(), "French");
    assert_eq!(get_language_name("hi").unwrap(), "Hindi");
    assert!(get_language_name("xx").is_err());
}
