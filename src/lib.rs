/*!
 * # locale-sync
 *
 * Keeps per-locale string dictionaries consistent with one source-of-truth
 * dictionary and fills missing or stale translations through a machine
 * translation provider.
 *
 * ## Features
 *
 * - Prunes keys the source no longer has, inserts the ones it gained
 * - Tracks the provenance of every value: confirmed, copied from the
 *   source `(EN)`, flagged for re-translation `(UTO)`, machine-translated `(EAN)`
 * - Translates pending entries one request at a time, with a session token
 *   cached for its lifetime
 * - Never loses content: a failed translation keeps the source text
 * - Sorted, pretty-printed JSON output that diffs cleanly
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `dictionary`: Dictionary model and provenance tags
 * - `reconcile`: Pure source/target reconciliation
 * - `store`: JSON dictionary persistence
 * - `providers`: Translation clients:
 *   - `providers::session`: Session token manager
 *   - `providers::decode`: Response payload decoder
 *   - `providers::google`: Google Translate web client
 *   - `providers::mock`: Scripted translator
 * - `translation`: Single-worker request queue
 * - `sync`: Per-locale orchestration
 * - `locale`: Locale and provider language codes
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod dictionary;
pub mod errors;
pub mod file_utils;
pub mod locale;
pub mod providers;
pub mod reconcile;
pub mod store;
pub mod sync;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use dictionary::{Dictionary, Entry, Provenance};
pub use errors::{AppError, DecodeError, ProviderError, StoreError, SyncError};
pub use providers::{GoogleWebTranslator, TranslationResult, Translator};
pub use reconcile::{reconcile, Reconciliation};
pub use store::{DictionaryStore, JsonFileStore};
pub use sync::{SyncOrchestrator, SyncSummary};
