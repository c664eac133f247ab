//
// pseudonym.rs
// dicom-anonymizer
//
// Derives repeatable subject pseudonyms from an original identifier and a run-wide salt.
//
// Thales Matheus Mendonça Santos - November 2025

use sha2::{Digest, Sha256};

pub const DEFAULT_SALT: &str = "anon";
pub const UNKNOWN_SUBJECT: &str = "unknown";
const PREFIX: &str = "anon_";
const DIGEST_CHARS: usize = 12;

/// Same (source, salt) always gives the same pseudonym; a missing source is treated as `"unknown"`.
pub fn pseudonym(source: Option<&str>, salt: &str) -> String {
    let source = source.unwrap_or(UNKNOWN_SUBJECT);
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}{}", PREFIX, &digest[..DIGEST_CHARS])
}
