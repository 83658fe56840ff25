/*!
 * Error types for the locale-sync application.
 *
 * This module contains custom error types for the different layers of the
 * sync engine, using the thiserror crate for ergonomic error definitions.
 * Only `SyncError` ever aborts a run; provider and decode errors are
 * absorbed by the translator's fallback.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to the translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(#[from] DecodeError),

    /// Error returned by the endpoint itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Body excerpt returned by the endpoint
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The landing page did not carry the session markers
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised while walking the provider's nested response payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The body did not contain a `wrb.fr` envelope for the expected call
    #[error("no response envelope for rpc '{0}'")]
    MissingEnvelope(String),

    /// The envelope payload was not valid JSON
    #[error("invalid JSON in {context}: {message}")]
    InvalidJson {
        /// Which part of the body was being parsed
        context: &'static str,
        /// Parser message
        message: String,
    },

    /// A nesting level was absent or had the wrong type
    #[error("missing field at {0}")]
    MissingField(String),

    /// Extraction succeeded but produced no text
    #[error("response contained an empty translation")]
    EmptyTranslation,
}

/// Errors from the dictionary store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a flat object of strings
    #[error("{path:?} is not a valid dictionary: {message}")]
    Corrupt {
        /// File being parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

/// Errors that abort a synchronization run
#[derive(Error, Debug)]
pub enum SyncError {
    /// The source dictionary file does not exist
    #[error("Source dictionary '{0}' not found")]
    SourceMissing(String),

    /// The source dictionary could not be parsed
    #[error("Source dictionary is unreadable: {0}")]
    SourceCorrupt(#[source] StoreError),

    /// Persisting a dictionary failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from synchronization
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
