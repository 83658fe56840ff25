/*!
 * Session tokens for the translation endpoint.
 *
 * The batch-execute endpoint only accepts requests carrying three markers
 * that the landing page embeds in its bootstrap script: the session id
 * (`FdrFJe`), the build label (`cfb2h`) and the anti-forgery token
 * (`SNlM0e`). They are fetched lazily and reused until the TTL runs out.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::errors::ProviderError;

static SESSION_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""FdrFJe":"([^"]*)""#).unwrap());
static BUILD_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""cfb2h":"([^"]*)""#).unwrap());
static ANTI_FORGERY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""SNlM0e":"([^"]*)""#).unwrap());

/// Credential bundle scraped from the landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// `f.sid` query parameter
    pub session_id: String,
    /// `bl` query parameter
    pub build_label: String,
    /// `at` body parameter
    pub anti_forgery: String,
    /// When the markers were fetched
    pub acquired_at: Instant,
}

impl SessionToken {
    /// Extract the three markers from landing page HTML
    pub fn from_landing_page(html: &str, acquired_at: Instant) -> Result<Self, ProviderError> {
        Ok(Self {
            session_id: capture(&SESSION_ID_RE, html, "FdrFJe")?,
            build_label: capture(&BUILD_LABEL_RE, html, "cfb2h")?,
            anti_forgery: capture(&ANTI_FORGERY_RE, html, "SNlM0e")?,
            acquired_at,
        })
    }

    /// Whether the token can still be used at `now`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.acquired_at) < ttl
    }
}

fn capture(re: &Regex, html: &str, marker: &str) -> Result<String, ProviderError> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ProviderError::TokenAcquisition(format!("landing page has no '{}' marker", marker)))
}

/// Owns the cached token and refreshes it when stale.
///
/// The staleness check and the fetch run under one async lock, so
/// concurrent callers trigger at most one fetch.
#[derive(Debug)]
pub struct TokenManager {
    client: Client,
    landing_url: String,
    ttl: Duration,
    cached: Mutex<Option<SessionToken>>,
    fetch_count: AtomicUsize,
}

impl TokenManager {
    pub fn new(client: Client, landing_url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            client,
            landing_url: landing_url.into(),
            ttl,
            cached: Mutex::new(None),
            fetch_count: AtomicUsize::new(0),
        }
    }

    /// Current token, fetching a new one when there is none or it expired
    pub async fn get_token(&self) -> Result<SessionToken, ProviderError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Instant::now(), self.ttl) {
                return Ok(token.clone());
            }
            debug!("Session token expired, refreshing");
        }

        let token = self.fetch().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next call fetches a new one
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    /// Number of landing page fetches performed so far
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::Relaxed)
    }

    async fn fetch(&self) -> Result<SessionToken, ProviderError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        debug!("Fetching session markers from {}", self.landing_url);

        let response = self.client.get(&self.landing_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: "landing page request rejected".to_string(),
            });
        }

        let html = response.text().await?;
        let token = SessionToken::from_landing_page(&html, Instant::now())?;
        info!("Acquired translation session");
        Ok(token)
    }
}
