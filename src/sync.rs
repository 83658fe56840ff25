/*!
 * Synchronization of target dictionaries with the source dictionary.
 *
 * Each target locale moves through `Loaded -> Reconciled -> Translating ->
 * Persisted`. Locales are processed one after another and every provider
 * call goes through the same single-worker queue.
 */

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};

use crate::app_config::Config;
use crate::dictionary::{Dictionary, Entry, Provenance};
use crate::errors::{AppError, StoreError, SyncError};
use crate::providers::{GoogleWebTranslator, Translator};
use crate::reconcile::reconcile;
use crate::store::{DictionaryStore, JsonFileStore};
use crate::translation::{TranslationJob, TranslationQueue};

/// Stage of one target locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleStage {
    Loaded,
    Reconciled,
    Translating,
    Persisted,
}

impl fmt::Display for LocaleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loaded => "loaded",
            Self::Reconciled => "reconciled",
            Self::Translating => "translating",
            Self::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// Settings of a sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub source_locale: String,
    pub target_locales: Vec<String>,
    /// Strip `(UTO)` from the source after all targets consumed it
    pub clear_retranslate_markers: bool,
    /// Minimum gap between provider requests
    pub request_gap: Duration,
}

impl From<&Config> for SyncOptions {
    fn from(config: &Config) -> Self {
        Self {
            source_locale: config.source_locale.clone(),
            target_locales: config.target_locales.clone(),
            clear_retranslate_markers: config.clear_retranslate_markers,
            request_gap: config.provider.request_delay(),
        }
    }
}

/// What happened to one target locale
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleReport {
    pub locale: String,
    /// No dictionary existed before this run
    pub created: bool,
    /// The existing file could not be parsed and was started over
    pub recovered_from_corruption: bool,
    pub pruned: usize,
    pub inserted: usize,
    pub retranslated: usize,
    /// Entries sent to the provider
    pub translated: usize,
    /// Entries whose provider call degraded to the source text
    pub fallbacks: usize,
}

/// Result of a full run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncSummary {
    pub locales: Vec<LocaleReport>,
    /// `(UTO)` markers removed from the source
    pub cleared_markers: usize,
}

impl SyncSummary {
    pub fn total_translated(&self) -> usize {
        self.locales.iter().map(|r| r.translated).sum()
    }

    pub fn total_fallbacks(&self) -> usize {
        self.locales.iter().map(|r| r.fallbacks).sum()
    }
}

/// Drives reconciliation, translation and persistence for all targets
#[derive(Debug)]
pub struct SyncOrchestrator<S, T> {
    store: S,
    translator: T,
    options: SyncOptions,
    queue: TranslationQueue,
}

impl<S, T> SyncOrchestrator<S, T>
where
    S: DictionaryStore,
    T: Translator,
{
    pub fn new(store: S, translator: T, options: SyncOptions) -> Self {
        let queue = TranslationQueue::new(options.request_gap);
        Self {
            store,
            translator,
            options,
            queue,
        }
    }

    /// Synchronize every target locale, then re-save the source sorted.
    ///
    /// Fails only when the source dictionary is missing or unreadable, or
    /// when a dictionary cannot be written.
    pub async fn run(&mut self) -> Result<SyncSummary, SyncError> {
        let source_locale = self.options.source_locale.clone();
        let mut source = match self.store.load_existing(&source_locale) {
            Ok(Some(dictionary)) => dictionary,
            Ok(None) => return Err(SyncError::SourceMissing(format!("{}.json", source_locale))),
            Err(e) => return Err(SyncError::SourceCorrupt(e)),
        };
        info!(
            "Loaded {} keys from {}.json using {}",
            source.len(),
            source_locale,
            self.translator.provider_name()
        );

        let mut summary = SyncSummary::default();
        for locale in self.options.target_locales.clone() {
            let report = self.sync_locale(&source, &locale).await?;
            summary.locales.push(report);
        }

        if self.options.clear_retranslate_markers {
            summary.cleared_markers = source.clear_retranslate_markers();
            if summary.cleared_markers > 0 {
                info!("Cleared {} re-translation markers from {}.json", summary.cleared_markers, source_locale);
            }
        }
        self.store.save(&source_locale, &source)?;

        info!("Translation update complete.");
        Ok(summary)
    }

    /// Bring one target locale in line with the source
    pub async fn sync_locale(&mut self, source: &Dictionary, locale: &str) -> Result<LocaleReport, SyncError> {
        let mut report = LocaleReport {
            locale: locale.to_string(),
            ..Default::default()
        };

        let existing = match self.store.load_existing(locale) {
            Ok(existing) => existing,
            Err(e @ StoreError::Corrupt { .. }) => {
                warn!("{}; starting {} from an empty dictionary", e, locale);
                report.recovered_from_corruption = true;
                Some(Dictionary::new())
            }
            Err(e) => return Err(e.into()),
        };
        report.created = existing.is_none();
        let target = existing.unwrap_or_default();
        self.enter(locale, LocaleStage::Loaded);

        let reconciliation = reconcile(source, &target);
        let mut dictionary = reconciliation.dictionary;
        report.pruned = reconciliation.report.pruned;
        report.inserted = reconciliation.report.inserted;
        report.retranslated = reconciliation.report.retranslate;
        self.enter(locale, LocaleStage::Reconciled);

        for pending in dictionary.pending_translations() {
            self.queue.push(TranslationJob {
                key: pending.key,
                text: pending.text,
                source_locale: self.options.source_locale.clone(),
                target_locale: locale.to_string(),
            });
        }
        self.enter(locale, LocaleStage::Translating);

        for job in self.queue.drain(&self.translator).await {
            report.translated += 1;
            if job.result.degraded {
                report.fallbacks += 1;
            }
            dictionary.insert(job.key, Entry::new(job.result.target_text, Provenance::MachineTranslated));
        }

        self.store.save(locale, &dictionary)?;
        self.enter(locale, LocaleStage::Persisted);

        let verb = if report.created { "Created" } else { "Updated" };
        info!(
            "{} {}.json ({} translated, {} kept as source text, {} removed)",
            verb, locale, report.translated, report.fallbacks, report.pruned
        );
        Ok(report)
    }

    fn enter(&self, locale: &str, stage: LocaleStage) {
        debug!("{}: {}", locale, stage);
    }
}

/// Run one full synchronization pass as described by `config`
pub async fn run(config: &Config) -> Result<SyncSummary, AppError> {
    config.validate().map_err(|e| AppError::Config(format!("{:#}", e)))?;

    let store = JsonFileStore::new(&config.dictionary_dir);
    let translator = GoogleWebTranslator::new(config.provider.clone())?;
    let mut orchestrator = SyncOrchestrator::new(store, translator, SyncOptions::from(config));

    Ok(orchestrator.run().await?)
}
