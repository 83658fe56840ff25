/*!
 * Google Translate web client.
 *
 * Talks to the private batch-execute endpoint used by the translate.google.com
 * front end. The protocol is undocumented: a session token scraped from the
 * landing page must accompany every call, the request is a JSON envelope
 * nested inside a form field, and the response is a guarded, nested array
 * structure (see `decode`).
 */

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::providers::decode::decode_response;
use crate::providers::session::{SessionToken, TokenManager};
use crate::providers::{TranslationResult, Translator};

/// Remote procedure id of the translate call
pub const TRANSLATE_RPC_ID: &str = "MkEWBc";

const BATCH_EXECUTE_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

/// Client for the Google Translate web endpoint
#[derive(Debug)]
pub struct GoogleWebTranslator {
    /// HTTP client shared with the token manager
    client: Client,
    /// Provider settings (endpoint, locale overrides, interface language)
    config: ProviderConfig,
    /// Owner of the cached session token
    tokens: TokenManager,
    /// `_reqid` sequence
    request_id: AtomicU64,
}

impl GoogleWebTranslator {
    /// Create a new client from provider settings
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;

        let base = config.endpoint.trim_end_matches('/');
        let tokens = TokenManager::new(client.clone(), format!("{}/", base), config.token_ttl());

        Ok(Self {
            client,
            config,
            tokens,
            request_id: AtomicU64::new(1_000),
        })
    }

    /// Token manager owned by this client
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Translate, surfacing every failure
    pub async fn try_translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> Result<TranslationResult, ProviderError> {
        let token = self.tokens.get_token().await?;
        let source_code = self.config.provider_code(source_locale);
        let target_code = self.config.provider_code(target_locale);
        debug!("Translating {} chars {} -> {}", text.len(), source_code, target_code);

        let body = self.send(&token, text, &source_code, &target_code).await?;
        Ok(decode_response(&body, TRANSLATE_RPC_ID, source_locale)?)
    }

    async fn send(
        &self,
        token: &SessionToken,
        text: &str,
        source_code: &str,
        target_code: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}{}", self.config.endpoint.trim_end_matches('/'), BATCH_EXECUTE_PATH);
        let request_id = self.request_id.fetch_add(100_000, Ordering::Relaxed).to_string();
        let payload = build_request_payload(text, source_code, target_code);

        let response = self
            .client
            .post(&url)
            .query(&[
                ("rpcids", TRANSLATE_RPC_ID),
                ("source-path", "/"),
                ("f.sid", token.session_id.as_str()),
                ("bl", token.build_label.as_str()),
                ("hl", self.config.ui_language.as_str()),
                ("soc-app", "1"),
                ("soc-platform", "1"),
                ("soc-device", "1"),
                ("_reqid", request_id.as_str()),
                ("rt", "c"),
            ])
            .form(&[("f.req", payload.as_str()), ("at", token.anti_forgery.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                // A rejected session needs fresh markers
                self.tokens.invalidate().await;
            }
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        Ok(response.text().await?)
    }
}

/// `f.req` form value for one translate call
pub fn build_request_payload(text: &str, source_code: &str, target_code: &str) -> String {
    let arguments = json!([[text, source_code, target_code, true], [null]]).to_string();
    json!([[[TRANSLATE_RPC_ID, arguments, null, "generic"]]]).to_string()
}

#[async_trait]
impl Translator for GoogleWebTranslator {
    async fn translate(&self, text: &str, source_locale: &str, target_locale: &str) -> TranslationResult {
        match self.try_translate(text, source_locale, target_locale).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Translation to {} failed, keeping source text: {}", target_locale, e);
                TranslationResult::untranslated(text, source_locale)
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Google Translate (web)"
    }
}
