/*!
 * Translation provider clients.
 *
 * - `session`: session token acquisition and caching
 * - `decode`: defensive decoding of the provider's nested response payload
 * - `google`: client for the Google Translate web front end's batch-execute endpoint
 * - `mock`: scripted translator for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

pub mod decode;
pub mod google;
pub mod mock;
pub mod session;

pub use self::google::GoogleWebTranslator;
pub use self::mock::{MockBehavior, MockTranslator};
pub use self::session::{SessionToken, TokenManager};

/// Outcome of one translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Translated text, or the input text when the call degraded
    pub target_text: String,
    /// Source language reported by the provider
    pub detected_language: String,
    /// Romanized form of the translation, empty when not provided
    pub transliteration: String,
    /// Set when the provider call failed and the input was passed through
    pub degraded: bool,
}

impl TranslationResult {
    /// Pass-through result used when the provider cannot be reached or understood
    pub fn untranslated(text: &str, source_locale: &str) -> Self {
        Self {
            target_text: text.to_string(),
            detected_language: source_locale.to_string(),
            transliteration: String::new(),
            degraded: true,
        }
    }
}

/// Common trait for translation clients
///
/// `translate` never fails: a client that cannot produce a translation
/// returns `TranslationResult::untranslated` so that one bad response never
/// aborts a batch.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` between two locale codes (`en_US`, `fr_FR`)
    async fn translate(&self, text: &str, source_locale: &str, target_locale: &str) -> TranslationResult;

    /// Name used in log lines
    fn provider_name(&self) -> &str;
}
