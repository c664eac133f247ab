//
// lib.rs
// dicom-anonymizer
//
// Exposes the crate's modules and re-exports the CLI entry point for both binary and library consumers.
//
// Thales Matheus Mendonça Santos - November 2025

// Public surface of the library: one module per pipeline stage plus the shared I/O helpers.
pub mod anonymize;
pub mod audit;
pub mod batch;
pub mod cli;
pub mod container;
pub mod dicom_access;
pub mod error;
pub mod fields;
pub mod models;
pub mod pseudonym;
pub mod report;
pub mod uid;
pub mod walk;

pub use cli::{run as run_cli, Cli, Commands};
