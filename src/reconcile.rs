/*!
 * Source/target reconciliation.
 *
 * Aligns a target dictionary's key set with the source dictionary and
 * marks the entries that need the provider. Pure: no I/O, no failure mode.
 */

use crate::dictionary::{Dictionary, Entry, Provenance};

/// Counts describing what reconciliation changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    /// Target keys dropped because the source no longer has them
    pub pruned: usize,
    /// Source keys added to the target as untranslated copies
    pub inserted: usize,
    /// Existing target entries re-marked because the source flagged them
    pub retranslate: usize,
    /// Existing target entries kept as they were
    pub kept: usize,
}

/// Result of reconciling one target against the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub dictionary: Dictionary,
    pub report: ReconcileReport,
}

/// Reconcile `target` against `source`.
///
/// - target keys absent from the source are dropped
/// - shared keys keep the target entry, unless the source entry is tagged
///   `Retranslate`, in which case the source text replaces it, still tagged
///   `Retranslate`
/// - source keys absent from the target are inserted as `Untranslated`
///   copies of the source text
pub fn reconcile(source: &Dictionary, target: &Dictionary) -> Reconciliation {
    let mut report = ReconcileReport {
        pruned: target.keys().filter(|key| !source.contains_key(key)).count(),
        ..Default::default()
    };

    let dictionary = source
        .iter()
        .map(|(key, source_entry)| {
            let entry = match target.get(key) {
                Some(_) if source_entry.provenance == Provenance::Retranslate => {
                    report.retranslate += 1;
                    Entry::new(source_entry.text.clone(), Provenance::Retranslate)
                }
                Some(existing) => {
                    report.kept += 1;
                    existing.clone()
                }
                None => {
                    report.inserted += 1;
                    Entry::new(source_entry.text.clone(), Provenance::Untranslated)
                }
            };
            (key.clone(), entry)
        })
        .collect();

    Reconciliation { dictionary, report }
}
