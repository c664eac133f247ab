//
// error.rs
// dicom-anonymizer
//
// Typed failures for the per-file pipeline and for individual attribute rewrites.
//
// Thales Matheus Mendonça Santos - November 2025

use std::path::PathBuf;

use thiserror::Error;

use crate::fields::Field;

/// Reasons a single input file ends up in the error report.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("not a DICOM file (missing DICM signature)")]
    NotDicom,

    #[error("invalid DICOM file: {0}")]
    Malformed(#[source] dicom::object::ReadError),

    #[error("failed to create output directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: dicom::object::WriteError,
    },
}

/// A rewrite of one attribute that could not be applied.
///
/// These never abort a record; the attribute keeps its previous value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} is not writable: {reason}")]
    NotWritable { field: Field, reason: String },
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::NotWritable { field, .. } => *field,
        }
    }
}

/// One line of the batch error report.
#[derive(Debug)]
pub enum ErrorEntry {
    /// An input file, identified by its path relative to the input root.
    File { path: PathBuf, error: FileError },
    /// The audit mapping could not be written.
    MappingReport { reason: String },
}

impl ErrorEntry {
    /// Text written to the single-column error report.
    pub fn report_line(&self) -> String {
        match self {
            ErrorEntry::File { path, .. } => path.display().to_string(),
            ErrorEntry::MappingReport { reason } => format!("mapfile:{}", reason),
        }
    }
}
