//
// audit.rs
// dicom-anonymizer
//
// Run-scoped audit table mapping each original subject key to the pseudonym it received.
//
// Thales Matheus Mendonça Santos - November 2025

use std::collections::BTreeMap;

/// Grows monotonically during a run; ordered by subject key so reports are stable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuditTable {
    entries: BTreeMap<String, String>,
}

impl AuditTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins; the pseudonym for a key is deterministic so this never changes a value.
    pub fn record(&mut self, subject_key: &str, pseudonym: &str) {
        self.entries
            .insert(subject_key.to_string(), pseudonym.to_string());
    }

    pub fn get(&self, subject_key: &str) -> Option<&str> {
        self.entries.get(subject_key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
