//
// models.rs
// dicom-anonymizer
//
// Serializable row types for the CSV reports produced at the end of a run.
//
// Thales Matheus Mendonça Santos - November 2025

use serde::Serialize;

/// One line of the audit mapping: original subject key and the pseudonym it received.
#[derive(Debug, Clone, Serialize)]
pub struct MappingRow<'a> {
    #[serde(rename = "original_id_or_name")]
    pub original: &'a str,
    pub pseudonym: &'a str,
}

/// One line of the error report.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRow {
    #[serde(rename = "error file paths")]
    pub entry: String,
}
