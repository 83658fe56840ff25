/*!
 * Provenance tags.
 *
 * A dictionary value records where it came from. In memory this is the
 * `Provenance` enum carried next to the text; on disk it is a literal
 * suffix of the string value (`Hello(EN)`), which is what older tooling
 * reads and writes.
 */

use std::fmt;

/// Translation status of a dictionary value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provenance {
    /// Human-confirmed translation, no suffix
    #[default]
    Confirmed,
    /// Copied from the source and not yet translated, `(EN)`
    Untranslated,
    /// Source entry flagged for re-translation in every locale, `(UTO)`
    Retranslate,
    /// Provisional machine translation, `(EAN)`
    MachineTranslated,
}

impl Provenance {
    /// Tagged variants, in the order suffixes are tried when decoding
    const TAGGED: [Provenance; 3] = [
        Provenance::Untranslated,
        Provenance::Retranslate,
        Provenance::MachineTranslated,
    ];

    /// Literal suffix used in persisted values
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Confirmed => "",
            Self::Untranslated => "(EN)",
            Self::Retranslate => "(UTO)",
            Self::MachineTranslated => "(EAN)",
        }
    }

    /// Whether the sync pass must send this entry to the provider
    pub fn needs_translation(self) -> bool {
        matches!(self, Self::Untranslated | Self::Retranslate)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Confirmed => "confirmed",
            Self::Untranslated => "untranslated",
            Self::Retranslate => "retranslate",
            Self::MachineTranslated => "machine-translated",
        };
        f.write_str(name)
    }
}

/// A dictionary value split into its clean text and provenance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// Text with any tag removed
    pub text: String,
    /// Where the text came from
    pub provenance: Provenance,
}

impl Entry {
    pub fn new(text: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            text: text.into(),
            provenance,
        }
    }

    /// Untagged, human-confirmed value
    pub fn confirmed(text: impl Into<String>) -> Self {
        Self::new(text, Provenance::Confirmed)
    }

    /// Split a persisted value into text and tag.
    ///
    /// Only one suffix is stripped; `A(EN)(EAN)` decodes to text `A(EN)`
    /// with `MachineTranslated`.
    pub fn decode(raw: &str) -> Self {
        for provenance in Provenance::TAGGED {
            if let Some(text) = raw.strip_suffix(provenance.suffix()) {
                return Self::new(text, provenance);
            }
        }
        Self::confirmed(raw)
    }

    /// Persisted form: text followed by the tag suffix
    pub fn encode(&self) -> String {
        let mut raw = String::with_capacity(self.text.len() + 5);
        raw.push_str(&self.text);
        raw.push_str(self.provenance.suffix());
        raw
    }
}

impl From<&str> for Entry {
    fn from(raw: &str) -> Self {
        Self::decode(raw)
    }
}
