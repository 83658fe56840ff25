/*!
 * Mock translator for testing.
 *
 * Simulates the provider without any network access:
 * - `MockTranslator::working()` - Always succeeds with a marked translation
 * - `MockTranslator::failing()` - Always degrades to the input text
 * - `MockTranslator::intermittent(n)` - Degrades on every n-th request
 *
 * Every call is recorded so tests can assert on what was sent.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::providers::{TranslationResult, Translator};

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// The text to translate
    pub text: String,
    /// Source locale
    pub source_locale: String,
    /// Target locale
    pub target_locale: String,
}

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Returns `<target>:<text>`
    Working,
    /// Degrades every n-th request (1-based), works otherwise
    Intermittent { fail_every: usize },
    /// Always degrades
    Failing,
}

/// Mock translator; clones share the call log
#[derive(Debug, Clone)]
pub struct MockTranslator {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock translator
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock translator whose every call degrades
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock translator
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Text the working mode produces for an input
    pub fn expected_translation(text: &str, target_locale: &str) -> String {
        format!("{}:{}", target_locale, text)
    }

    /// Number of translate calls so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the recorded calls
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, source_locale: &str, target_locale: &str) -> TranslationResult {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                text: text.to_string(),
                source_locale: source_locale.to_string(),
                target_locale: target_locale.to_string(),
            });
        }

        let fails = match self.behavior {
            MockBehavior::Working => false,
            MockBehavior::Failing => true,
            MockBehavior::Intermittent { fail_every } => fail_every > 0 && count % fail_every == 0,
        };

        if fails {
            return TranslationResult::untranslated(text, source_locale);
        }

        TranslationResult {
            target_text: Self::expected_translation(text, target_locale),
            detected_language: source_locale.to_string(),
            transliteration: String::new(),
            degraded: false,
        }
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
