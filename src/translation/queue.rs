/*!
 * Single-worker translation queue.
 *
 * All provider calls of a run go through one queue drained by one worker,
 * so at most one request is ever in flight. An optional minimum gap is
 * kept between consecutive requests, across locales as well as within one.
 */

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::providers::{TranslationResult, Translator};

/// One entry waiting for the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    /// Dictionary key the result belongs to
    pub key: String,
    /// Tag-stripped text
    pub text: String,
    pub source_locale: String,
    pub target_locale: String,
}

/// A job and its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJob {
    pub key: String,
    pub result: TranslationResult,
}

/// FIFO of translation jobs with request pacing
#[derive(Debug)]
pub struct TranslationQueue {
    jobs: VecDeque<TranslationJob>,
    min_gap: Duration,
    last_request: Option<Instant>,
}

impl TranslationQueue {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            jobs: VecDeque::new(),
            min_gap,
            last_request: None,
        }
    }

    pub fn push(&mut self, job: TranslationJob) {
        self.jobs.push_back(job);
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Run every queued job in order, one at a time
    pub async fn drain<T>(&mut self, translator: &T) -> Vec<CompletedJob>
    where
        T: Translator + ?Sized,
    {
        let total = self.jobs.len();
        let mut completed = Vec::with_capacity(total);

        while let Some(job) = self.jobs.pop_front() {
            self.pace().await;
            debug!(
                "[{}/{}] {} '{}'",
                completed.len() + 1,
                total,
                job.target_locale,
                job.key
            );

            let result = translator
                .translate(&job.text, &job.source_locale, &job.target_locale)
                .await;
            self.last_request = Some(Instant::now());

            if result.degraded {
                warn!("Kept source text for '{}' in {}", job.key, job.target_locale);
            }
            completed.push(CompletedJob { key: job.key, result });
        }

        completed
    }

    async fn pace(&self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_gap {
                tokio::time::sleep(self.min_gap - elapsed).await;
            }
        }
    }
}
