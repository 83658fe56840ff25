/*!
 * Per-locale string dictionaries.
 *
 * - `tag`: provenance tags and their suffix encoding
 *
 * A `Dictionary` is backed by a `BTreeMap`, so iteration and serialization
 * are always in ascending key order.
 */

use std::collections::BTreeMap;
use std::collections::btree_map;

pub mod tag;

pub use self::tag::{Entry, Provenance};

/// Key to entry mapping for one locale
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dictionary {
    entries: BTreeMap<String, Entry>,
}

/// An entry waiting for the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTranslation {
    /// Dictionary key
    pub key: String,
    /// Tag-stripped text to send
    pub text: String,
    /// Why the entry is pending
    pub provenance: Provenance,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted `key -> raw value` pairs, decoding tags
    pub fn from_raw<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| (key.into(), Entry::decode(value.as_ref())))
            .collect()
    }

    /// Persisted `key -> raw value` pairs, in key order
    pub fn to_raw(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.encode()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) -> Option<Entry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Entry> {
        self.entries.iter()
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries the sync pass must translate, in key order
    pub fn pending_translations(&self) -> Vec<PendingTranslation> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.provenance.needs_translation())
            .map(|(key, entry)| PendingTranslation {
                key: key.clone(),
                text: entry.text.clone(),
                provenance: entry.provenance,
            })
            .collect()
    }

    /// Replace every `Retranslate` tag with `Confirmed`, returning how many changed
    pub fn clear_retranslate_markers(&mut self) -> usize {
        let mut cleared = 0;
        for entry in self.entries.values_mut() {
            if entry.provenance == Provenance::Retranslate {
                entry.provenance = Provenance::Confirmed;
                cleared += 1;
            }
        }
        cleared
    }
}

impl FromIterator<(String, Entry)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (String, Entry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a String, &'a Entry);
    type IntoIter = btree_map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
