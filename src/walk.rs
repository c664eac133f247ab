//
// walk.rs
// dicom-anonymizer
//
// Collects the candidate files of an input directory in a stable order.
//
// Thales Matheus Mendonça Santos - November 2025

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Every regular file under `dir` (symlinks followed), sorted by name within each directory.
/// Without `recursive`, only the top level is listed. Unreadable entries are logged and skipped.
pub fn collect_files(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Entrada ignorada durante a varredura: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}
