/*!
 * Dictionary persistence.
 *
 * One JSON object per locale, named `<locale>.json`, UTF-8, pretty-printed
 * with two-space indentation and keys in ascending order. Provenance tags
 * are written as value suffixes.
 */

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::debug;

use crate::dictionary::Dictionary;
use crate::errors::StoreError;
use crate::file_utils::FileManager;

/// Loads and saves locale dictionaries
pub trait DictionaryStore {
    /// Load a dictionary, `None` when nothing is persisted for the locale
    fn load_existing(&self, locale: &str) -> Result<Option<Dictionary>, StoreError>;

    /// Persist a dictionary in key order
    fn save(&self, locale: &str, dictionary: &Dictionary) -> Result<(), StoreError>;

    /// Load a dictionary; absence is an empty dictionary, not an error
    fn load(&self, locale: &str) -> Result<Dictionary, StoreError> {
        Ok(self.load_existing(locale)?.unwrap_or_default())
    }
}

/// File-backed store rooted at one directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing a locale
    pub fn path_for(&self, locale: &str) -> PathBuf {
        FileManager::dictionary_path(&self.dir, locale)
    }
}

impl DictionaryStore for JsonFileStore {
    fn load_existing(&self, locale: &str) -> Result<Option<Dictionary>, StoreError> {
        let path = self.path_for(locale);
        let content = FileManager::read_optional(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        let Some(content) = content else {
            debug!("No dictionary at {:?}", path);
            return Ok(None);
        };

        let dictionary = parse_dictionary(&content).map_err(|message| StoreError::Corrupt {
            path: path.clone(),
            message,
        })?;
        debug!("Loaded {} entries from {:?}", dictionary.len(), path);
        Ok(Some(dictionary))
    }

    fn save(&self, locale: &str, dictionary: &Dictionary) -> Result<(), StoreError> {
        let path = self.path_for(locale);
        let content = serialize_dictionary(dictionary);
        FileManager::write_atomically(&path, &content)
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;
        debug!("Saved {} entries to {:?}", dictionary.len(), path);
        Ok(())
    }
}

/// Parse a flat JSON object of strings; invalid UTF-8 is a parse error
pub fn parse_dictionary(content: impl AsRef<[u8]>) -> Result<Dictionary, String> {
    let raw: BTreeMap<String, String> =
        serde_json::from_slice(content.as_ref()).map_err(|e| e.to_string())?;
    Ok(Dictionary::from_raw(raw))
}

/// Pretty-printed JSON, keys ascending
pub fn serialize_dictionary(dictionary: &Dictionary) -> String {
    // A BTreeMap of strings cannot fail to serialize
    serde_json::to_string_pretty(&dictionary.to_raw()).unwrap_or_else(|_| "{}".to_string())
}
