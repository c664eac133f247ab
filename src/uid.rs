//
// uid.rs
// dicom-anonymizer
//
// Generates fresh DICOM UIDs and keeps the run-scoped original -> replacement table for study and series UIDs.
//
// Thales Matheus Mendonça Santos - November 2025

use std::collections::HashMap;
use std::fmt;

use tracing::debug;
use uuid::Uuid;

/// UUID-derived root from PS3.5 B.2.
const UUID_ROOT: &str = "2.25";

/// New UID of the form `2.25.<decimal UUID>`, unrelated to any input.
pub fn generate_uid() -> String {
    format!("{}.{}", UUID_ROOT, Uuid::new_v4().as_u128())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UidKind {
    Study,
    Series,
}

impl fmt::Display for UidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UidKind::Study => f.write_str("study"),
            UidKind::Series => f.write_str("series"),
        }
    }
}

/// One replacement UID per distinct (kind, original) pair for the lifetime of a run.
#[derive(Debug, Default)]
pub struct UidRegistry {
    entries: HashMap<(UidKind, String), String>,
}

impl UidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, kind: UidKind, original: &str) -> &str {
        self.entries
            .entry((kind, original.to_string()))
            .or_insert_with(|| {
                let fresh = generate_uid();
                debug!("Novo {} UID registrado: {} -> {}", kind, original, fresh);
                fresh
            })
    }

    #[cfg(test)]
    pub fn get(&self, kind: UidKind, original: &str) -> Option<&str> {
        self.entries
            .get(&(kind, original.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_uids_are_valid_and_unique() {
        let uids: HashSet<String> = (0..1000).map(|_| generate_uid()).collect();
        assert_eq!(uids.len(), 1000);
        for uid in &uids {
            assert!(uid.starts_with("2.25."));
            assert!(uid.len() <= 64);
            assert!(uid.chars().all(|c| c.is_ascii_digit() || c == '.'));
        }
    }

    #[test]
    fn same_pair_resolves_to_same_uid() {
        let mut registry = UidRegistry::new();
        let first = registry.resolve(UidKind::Study, "1.2.3").to_string();
        registry.resolve(UidKind::Study, "9.9.9");
        let again = registry.resolve(UidKind::Study, "1.2.3").to_string();
        assert_eq!(first, again);
        assert_ne!(first, "1.2.3");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn kind_is_part_of_the_key() {
        let mut registry = UidRegistry::new();
        let study = registry.resolve(UidKind::Study, "1.2.3").to_string();
        let series = registry.resolve(UidKind::Series, "1.2.3").to_string();
        assert_ne!(study, series);
        assert_eq!(registry.get(UidKind::Series, "1.2.3"), Some(series.as_str()));
    }

    #[test]
    fn lookups_do_not_insert() {
        let registry = UidRegistry::new();
        assert!(registry.get(UidKind::Study, "1.2.3").is_none());
        assert!(registry.is_empty());
    }
}
