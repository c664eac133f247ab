//
// report.rs
// dicom-anonymizer
//
// Persists the audit mapping and the error list as CSV files.
//
// Thales Matheus Mendonça Santos - November 2025

use std::path::Path;

use anyhow::{Context, Result};

use crate::audit::AuditTable;
use crate::error::ErrorEntry;
use crate::models::{ErrorRow, MappingRow};

pub const MAPPING_FILE: &str = "mapping.csv";
pub const ERRORS_FILE: &str = "errors.csv";

/// Two columns, `original_id_or_name,pseudonym`, one row per subject.
pub fn write_mapping(path: &Path, audit: &AuditTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create mapping file {}", path.display()))?;
    if audit.is_empty() {
        // serde-driven headers only appear with the first row.
        writer.write_record(["original_id_or_name", "pseudonym"])?;
    }
    for (original, pseudonym) in audit.iter() {
        writer.serialize(MappingRow {
            original,
            pseudonym,
        })?;
    }
    writer.flush().context("Failed to flush mapping file")?;
    Ok(())
}

/// Single column, `error file paths`.
pub fn write_errors(path: &Path, errors: &[ErrorEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create error report {}", path.display()))?;
    if errors.is_empty() {
        writer.write_record(["error file paths"])?;
    }
    for entry in errors {
        writer.serialize(ErrorRow {
            entry: entry.report_line(),
        })?;
    }
    writer.flush().context("Failed to flush error report")?;
    Ok(())
}
