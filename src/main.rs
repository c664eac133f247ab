//
// main.rs
// dicom-anonymizer
//
// Entry point: sets up logging and hands off to the CLI layer, which decides the exit status.
//
// Thales Matheus Mendonça Santos - November 2025

use std::process::ExitCode;

use dicom_anonymizer::cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    // RUST_LOG overrides the default `info` level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    cli::run()
}
