/*!
 * Google web client tests against the in-process fake endpoint
 */

use std::time::Duration;

use locale_sync::app_config::ProviderConfig;
use locale_sync::errors::ProviderError;
use locale_sync::providers::{GoogleWebTranslator, TokenManager, Translator};
use crate::common::fake_provider::{FakeProvider, PostReply};

fn config_for(fake: &FakeProvider) -> ProviderConfig {
    ProviderConfig {
        endpoint: fake.endpoint.clone(),
        timeout_secs: 5,
        request_delay_ms: 0,
        ..Default::default()
    }
}

/// Test a successful translation end to end
#[tokio::test]
async fn test_translate_withWorkingEndpoint_shouldDecodeTranslation() {
    let fake = FakeProvider::start().await;
    let translator = GoogleWebTranslator::new(config_for(&fake)).unwrap();

    let result = translator.translate("Hello", "en_US", "fr_FR").await;

    assert!(!result.degraded);
    assert_eq!(result.target_text, "fr:Hello");
    assert_eq!(result.transliteration, "translit-Hello");
    assert_eq!(result.detected_language, "en");
}

/// Test that the session markers travel with the request
#[tokio::test]
async fn test_translate_shouldSendSessionMarkers() {
    let fake = FakeProvider::start().await;
    let translator = GoogleWebTranslator::new(config_for(&fake)).unwrap();

    translator.translate("Hello", "en_US", "de_DE").await;

    let post = fake
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .expect("a translate request");
    assert!(post.target.starts_with("/_/TranslateWebserverUi/data/batchexecute?"));
    assert_eq!(post.query_param("rpcids").as_deref(), Some("MkEWBc"));
    assert_eq!(post.query_param("rt").as_deref(), Some("c"));
    assert_eq!(post.query_param("f.sid").as_deref(), Some("-777"));
    assert_eq!(post.query_param("bl").as_deref(), Some("boq_translate-webserver_test"));
    assert_eq!(post.form_field("at").as_deref(), Some("AFtoken:1"));
    assert_eq!(
        post.translate_arguments(),
        Some(("Hello".to_string(), "en".to_string(), "de".to_string()))
    );
}

/// Test that the token is fetched once and reused within its lifetime
#[tokio::test]
async fn test_translate_multipleCalls_shouldFetchTokenOnce() {
    let fake = FakeProvider::start().await;
    let translator = GoogleWebTranslator::new(config_for(&fake)).unwrap();

    for text in ["one", "two", "three"] {
        let result = translator.translate(text, "en_US", "es_ES").await;
        assert_eq!(result.target_text, format!("es:{}", text));
    }

    assert_eq!(fake.count("GET"), 1);
    assert_eq!(fake.count("POST"), 3);
    assert_eq!(translator.tokens().fetch_count(), 1);
}

/// Test that callers racing for a token trigger a single landing page fetch
#[tokio::test]
async fn test_getToken_concurrentCallers_shouldFetchOnce() {
    let fake = FakeProvider::start().await;
    let tokens = TokenManager::new(
        reqwest::Client::new(),
        format!("{}/", fake.endpoint),
        Duration::from_secs(60),
    );

    let (first, second, third) = tokio::join!(tokens.get_token(), tokens.get_token(), tokens.get_token());

    let first = first.unwrap();
    assert_eq!(first.session_id, "-777");
    assert_eq!(second.unwrap().anti_forgery, first.anti_forgery);
    assert_eq!(third.unwrap().build_label, first.build_label);
    assert_eq!(fake.count("GET"), 1);
    assert_eq!(tokens.fetch_count(), 1);
}

/// Test that an expired token is fetched again
#[tokio::test]
async fn test_translate_afterTokenExpiry_shouldRefetchToken() {
    let fake = FakeProvider::start().await;
    let config = ProviderConfig {
        token_ttl_secs: 1,
        ..config_for(&fake)
    };
    let translator = GoogleWebTranslator::new(config).unwrap();

    translator.translate("one", "en_US", "fr_FR").await;
    translator.translate("two", "en_US", "fr_FR").await;
    assert_eq!(fake.count("GET"), 1);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    let result = translator.translate("three", "en_US", "fr_FR").await;

    assert_eq!(result.target_text, "fr:three");
    assert_eq!(fake.count("GET"), 2);
    assert_eq!(translator.tokens().fetch_count(), 2);
}

/// Test the locale override: `in_HI` is sent as `hi`
#[tokio::test]
async fn test_translate_withOverriddenLocale_shouldSendOverrideCode() {
    let fake = FakeProvider::start().await;
    let translator = GoogleWebTranslator::new(config_for(&fake)).unwrap();

    let result = translator.translate("Hello", "en_US", "in_HI").await;

    assert_eq!(result.target_text, "hi:Hello");
    let post = fake.requests().into_iter().find(|r| r.method == "POST").unwrap();
    assert_eq!(post.translate_arguments().map(|(_, _, target)| target).as_deref(), Some("hi"));
}

/// Test graceful degradation on a server error
#[tokio::test]
async fn test_translate_withServerError_shouldReturnInputText() {
    let fake = FakeProvider::start_with(
        Some(crate::common::fake_provider::LANDING_PAGE.to_string()),
        PostReply::Raw {
            status: 500,
            body: "internal error".to_string(),
        },
    )
    .await;
    let translator = GoogleWebTranslator::new(config_for(&fake)).unwrap();

    let result = translator.translate("Hello", "en_US", "fr_FR").await;

    assert!(result.degraded);
    assert_eq!(result.target_text, "Hello");
    assert_eq!(result.detected_language, "en_US");
    assert!(result.transliteration.is_empty());
}

/// Test graceful degradation on an undecodable body
#[tokio::test]
async fn test_translate_withGarbageBody_shouldReturnInputText() {
    let fake = FakeProvider::start_with(
        Some(crate::common::fake_provider::LANDING_PAGE.to_string()),
        PostReply::Raw {
            status: 200,
            body: ")]}'\n\nnot an envelope".to_string(),
        },
    )
    .await;
    let translator = GoogleWebTranslator::new(config_for(&fake)).unwrap();

    let result = translator.translate("Hello", "en_US", "fr_FR").await;
    assert!(result.degraded);
    assert_eq!(result.target_text, "Hello");

    let error = translator.try_translate("Hello", "en_US", "fr_FR").await.unwrap_err();
    assert!(matches!(error, ProviderError::ParseError(_)));
}

/// Test that a landing page without markers fails token acquisition
#[tokio::test]
async fn test_translate_withoutLandingMarkers_shouldDegradeAndNotCache() {
    let fake = FakeProvider::start_with(None, PostReply::Translate).await;
    let translator = GoogleWebTranslator::new(config_for(&fake)).unwrap();

    let error = translator.try_translate("Hello", "en_US", "fr_FR").await.unwrap_err();
    assert!(matches!(error, ProviderError::TokenAcquisition(_)));

    let result = translator.translate("Hello", "en_US", "fr_FR").await;
    assert!(result.degraded);
    assert_eq!(result.target_text, "Hello");

    // Nothing was cached, so each call fetched again; no translate call was made
    assert_eq!(fake.count("GET"), 2);
    assert_eq!(fake.count("POST"), 0);
}

/// Test that a rejected session is refetched on the next call
#[tokio::test]
async fn test_translate_afterForbidden_shouldRefetchToken() {
    let fake = FakeProvider::start_with(
        Some(crate::common::fake_provider::LANDING_PAGE.to_string()),
        PostReply::Raw {
            status: 403,
            body: "forbidden".to_string(),
        },
    )
    .await;
    let translator = GoogleWebTranslator::new(config_for(&fake)).unwrap();

    let first = translator.translate("Hello", "en_US", "fr_FR").await;
    assert!(first.degraded);

    fake.set_post_reply(PostReply::Translate);
    let second = translator.translate("Hello", "en_US", "fr_FR").await;

    assert!(!second.degraded);
    assert_eq!(second.target_text, "fr:Hello");
    assert_eq!(fake.count("GET"), 2);
}

/// Test that an unreachable endpoint degrades instead of failing
#[tokio::test]
async fn test_translate_withUnreachableEndpoint_shouldReturnInputText() {
    let config = ProviderConfig {
        endpoint: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let translator = GoogleWebTranslator::new(config).unwrap();

    let result = translator.translate("Hello", "en_US", "fr_FR").await;

    assert!(result.degraded);
    assert_eq!(result.target_text, "Hello");
}
