//
// cli.rs
// dicom-anonymizer
//
// Defines the CLI surface with Clap, wires the batch run to the filesystem and reports, and maps the
// outcome to a process exit status.
//
// Thales Matheus Mendonça Santos - November 2025

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use crate::batch::{BatchOptions, BatchOutcome, BatchProcessor};
use crate::error::ErrorEntry;
use crate::pseudonym::{pseudonym, DEFAULT_SALT};
use crate::{report, walk};

#[derive(Parser)]
#[command(name = "dicom-anonymizer")]
#[command(about = "Batch anonymization of DICOM files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Anonymize every file of a folder into an output folder
    Anonymize(AnonymizeArgs),
    /// Print the pseudonym a subject key would receive
    Pseudonym {
        id: String,
        #[arg(long, env = "DICOM_ANON_SALT", default_value = DEFAULT_SALT)]
        salt: String,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct AnonymizeArgs {
    /// Input folder (containing DICOM files)
    #[arg(short, long)]
    pub input: PathBuf,
    /// Output folder for the anonymized copies and reports
    #[arg(short, long)]
    pub output: PathBuf,
    /// Also write the original -> pseudonym mapping (default name: mapping.csv, relative to the output folder)
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = report::MAPPING_FILE
    )]
    pub map_file: Option<PathBuf>,
    /// Recurse into subfolders
    #[arg(short, long)]
    pub recursive: bool,
    /// Salt used for pseudonym generation
    #[arg(long, env = "DICOM_ANON_SALT", default_value = DEFAULT_SALT)]
    pub salt: String,
}

impl AnonymizeArgs {
    fn mapping_path(&self) -> Option<PathBuf> {
        self.map_file.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                self.output.join(p)
            }
        })
    }
}

pub fn run() -> anyhow::Result<ExitCode> {
    // Parse the raw CLI arguments once and dispatch to a subcommand handler.
    let cli = Cli::parse();

    match cli.command {
        Commands::Anonymize(args) => {
            let outcome = anonymize_folder(&args)?;
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Pseudonym { id, salt } => {
            println!("{}", pseudonym(Some(&id), &salt));
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Full run: walk, anonymize, write reports. Per-file problems end up in the
/// returned outcome; only setup problems (bad input folder, output not creatable) are errors.
pub fn anonymize_folder(args: &AnonymizeArgs) -> anyhow::Result<BatchOutcome> {
    if !args.input.is_dir() {
        bail!("Input folder not found: {}", args.input.display());
    }
    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output folder {}", args.output.display()))?;

    info!("Starting anonymization process...");
    let files = walk::collect_files(&args.input, args.recursive);
    info!("Encontrados {} arquivos.", files.len());

    let processor = BatchProcessor::new(BatchOptions {
        input_root: args.input.clone(),
        output_root: args.output.clone(),
        salt: args.salt.clone(),
    });
    let mut outcome = processor.run(&files, |percent| println!("Process: {}%", percent));
    info!("Done. Anonymized files written to {}", args.output.display());
    if outcome.field_failures > 0 {
        warn!(
            "{} attributes could not be rewritten and kept their original value",
            outcome.field_failures
        );
    }

    if let Some(map_path) = args.mapping_path() {
        match report::write_mapping(&map_path, &outcome.audit) {
            Ok(()) => info!("Mapping written to {}", map_path.display()),
            Err(e) => {
                error!("failed to write mapping file: {:#}", e);
                outcome.errors.push(ErrorEntry::MappingReport {
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    if !outcome.errors.is_empty() {
        write_error_report(&args.output, &outcome.errors);
    }

    Ok(outcome)
}

fn write_error_report(output: &Path, errors: &[ErrorEntry]) {
    let path = output.join(report::ERRORS_FILE);
    match report::write_errors(&path, errors) {
        Ok(()) => error!(
            "{} files failed during processing, see {} for details.",
            errors.len(),
            path.display()
        ),
        Err(e) => error!(
            "{} files failed during processing and the error report could not be written: {:#}",
            errors.len(),
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn map_file_flag_defaults_and_resolution() {
        let cli = Cli::try_parse_from(["dicom-anonymizer", "anonymize", "-i", "in", "-o", "out", "-m"])
            .expect("parse");
        let Commands::Anonymize(args) = cli.command else {
            panic!("expected anonymize");
        };
        assert_eq!(args.salt, "anon");
        assert_eq!(
            args.mapping_path(),
            Some(PathBuf::from("out").join("mapping.csv"))
        );

        let cli = Cli::try_parse_from([
            "dicom-anonymizer",
            "anonymize",
            "-i",
            "in",
            "-o",
            "out",
            "--salt",
            "s3cret",
        ])
        .expect("parse");
        let Commands::Anonymize(args) = cli.command else {
            panic!("expected anonymize");
        };
        assert_eq!(args.mapping_path(), None);
        assert_eq!(args.salt, "s3cret");
    }

    #[test]
    fn missing_input_folder_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = AnonymizeArgs {
            input: dir.path().join("absent"),
            output: dir.path().join("out"),
            map_file: None,
            recursive: false,
            salt: "anon".to_string(),
        };
        assert!(anonymize_folder(&args).is_err());
    }
}
