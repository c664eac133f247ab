//
// batch.rs
// dicom-anonymizer
//
// Runs the anonymizer over an ordered list of files, threading the UID registry and audit table through
// every file and collecting per-file failures instead of stopping.
//
// Thales Matheus Mendonça Santos - November 2025

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::anonymize::{anonymize_record, Anonymization};
use crate::audit::AuditTable;
use crate::container;
use crate::error::{ErrorEntry, FileError};
use crate::uid::UidRegistry;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub salt: String,
}

/// Result of one run. Every input file is counted in exactly one of `written` or `errors`
/// (`errors` may additionally hold report-level entries appended by the caller).
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub audit: AuditTable,
    pub errors: Vec<ErrorEntry>,
    pub written: Vec<PathBuf>,
    pub processed: usize,
    pub total: usize,
    /// Attribute rewrites that were skipped across all written files.
    pub field_failures: usize,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Owns the run-scoped state; consumed by [`BatchProcessor::run`].
pub struct BatchProcessor {
    options: BatchOptions,
    registry: UidRegistry,
    audit: AuditTable,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            registry: UidRegistry::new(),
            audit: AuditTable::new(),
        }
    }

    /// Process `files` in order. `progress` receives `floor(processed * 100 / total)` after each file,
    /// or a single `100` when there is nothing to do.
    pub fn run(mut self, files: &[PathBuf], mut progress: impl FnMut(u8)) -> BatchOutcome {
        let total = files.len();
        let mut outcome = BatchOutcome {
            total,
            ..BatchOutcome::default()
        };

        if total == 0 {
            progress(100);
            return outcome;
        }

        for src in files {
            let rel = self.relative(src);
            match self.process_file(src, &rel) {
                Ok((dst, result)) => {
                    debug!(
                        "Sucesso: {} ({} -> {}, SOP {})",
                        rel.display(),
                        result.subject_key,
                        result.pseudonym,
                        result.sop_instance_uid
                    );
                    outcome.field_failures += result.field_failures.len();
                    outcome.written.push(dst);
                }
                Err(error) => {
                    match &error {
                        FileError::NotDicom => {
                            warn!("non-DICOM file encountered: {}", rel.display())
                        }
                        other => warn!("failed to process {}: {}", rel.display(), other),
                    }
                    outcome.errors.push(ErrorEntry::File { path: rel, error });
                }
            }

            outcome.processed += 1;
            progress((outcome.processed * 100 / total) as u8);
        }

        info!(
            "{} de {} arquivos anonimizados; {} study/series UIDs remapeados; {} campos mantidos sem alteração",
            outcome.written.len(),
            total,
            self.registry.len(),
            outcome.field_failures
        );
        outcome.audit = self.audit;
        outcome
    }

    // classify -> parse -> anonymize -> persist
    fn process_file(
        &mut self,
        src: &Path,
        rel: &Path,
    ) -> Result<(PathBuf, Anonymization), FileError> {
        if !container::is_dicom_file(src) {
            return Err(FileError::NotDicom);
        }

        let mut record = container::read_record(src)?;
        let result = anonymize_record(
            &mut record,
            &mut self.audit,
            &mut self.registry,
            &self.options.salt,
        );

        let dst = self.options.output_root.join(rel);
        container::write_record(&record, &dst)?;
        Ok((dst, result))
    }

    fn relative(&self, src: &Path) -> PathBuf {
        src.strip_prefix(&self.options.input_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| src.file_name().map(PathBuf::from).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;
    use dicom::core::value::{DataSetSequence, PrimitiveValue, Value};
    use dicom::core::{DataElement, Length, VR};
    use dicom::dictionary_std::StandardDataDictionary;
    use dicom::object::{FileDicomObject, FileMetaTableBuilder, InMemDicomObject};
    use dicom::transfer_syntax::entries::EXPLICIT_VR_LITTLE_ENDIAN;
    use std::fs;
    use tempfile::tempdir;

    fn write_dicom(path: &Path, other_ids_as_sequence: bool) {
        let meta = FileMetaTableBuilder::new()
            .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN.uid())
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.7")
            .media_storage_sop_instance_uid("1.2.3.4.5")
            .build()
            .expect("meta");
        let mut obj = FileDicomObject::new_empty_with_dict_and_meta(StandardDataDictionary, meta);
        obj.put(DataElement::new(
            Field::PatientId.tag(),
            VR::LO,
            PrimitiveValue::from("P001"),
        ));
        obj.put(DataElement::new(
            Field::StudyInstanceUid.tag(),
            VR::UI,
            PrimitiveValue::from("1.2.3"),
        ));
        if other_ids_as_sequence {
            let mut item = InMemDicomObject::new_empty();
            item.put(DataElement::new(
                Field::PatientId.tag(),
                VR::LO,
                PrimitiveValue::from("ALT-7"),
            ));
            obj.put(DataElement::new(
                Field::OtherPatientIds.tag(),
                VR::SQ,
                Value::Sequence(DataSetSequence::new(vec![item], Length::UNDEFINED)),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent");
        }
        obj.write_to_file(path).expect("write dicom");
    }

    fn options(root: &Path) -> BatchOptions {
        BatchOptions {
            input_root: root.join("in"),
            output_root: root.join("out"),
            salt: "anon".to_string(),
        }
    }

    #[test]
    fn empty_list_reports_full_progress_once() {
        let dir = tempdir().expect("tempdir");
        let mut seen = Vec::new();
        let outcome = BatchProcessor::new(options(dir.path())).run(&[], |p| seen.push(p));

        assert_eq!(seen, vec![100]);
        assert!(outcome.is_success());
        assert!(outcome.audit.is_empty());
        assert_eq!(outcome.processed, 0);
    }

    #[test]
    fn non_dicom_files_are_errors_and_progress_is_monotonic() {
        let dir = tempdir().expect("tempdir");
        let opts = options(dir.path());
        fs::create_dir_all(&opts.input_root).expect("input root");
        let files: Vec<PathBuf> = (0..3)
            .map(|i| {
                let p = opts.input_root.join(format!("notes{i}.txt"));
                fs::write(&p, b"plain text").expect("write");
                p
            })
            .collect();

        let mut seen = Vec::new();
        let outcome = BatchProcessor::new(opts.clone()).run(&files, |p| seen.push(p));

        assert_eq!(seen, vec![33, 66, 100]);
        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.errors.len(), 3);
        assert!(outcome.written.is_empty());
        assert!(matches!(
            outcome.errors[0],
            ErrorEntry::File {
                error: FileError::NotDicom,
                ..
            }
        ));
        assert_eq!(outcome.errors[0].report_line(), "notes0.txt");
        assert!(!opts.output_root.exists());
    }

    #[test]
    fn unwritable_output_root_is_a_per_file_error() {
        let dir = tempdir().expect("tempdir");
        let opts = options(dir.path());
        let src = opts.input_root.join("image.dcm");
        write_dicom(&src, false);
        // A plain file where the output directory should be.
        fs::write(&opts.output_root, b"in the way").expect("blocker");

        let mut seen = Vec::new();
        let outcome = BatchProcessor::new(opts).run(&[src], |p| seen.push(p));

        assert_eq!(seen, vec![100]);
        assert_eq!(outcome.processed, 1);
        assert!(outcome.written.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            ErrorEntry::File {
                error: FileError::CreateDir { .. } | FileError::Persist { .. },
                ..
            }
        ));
        assert_eq!(outcome.errors[0].report_line(), "image.dcm");
        // The subject was still pseudonymized before the write failed.
        assert_eq!(outcome.audit.len(), 1);
    }

    #[test]
    fn skipped_attributes_are_counted_without_failing_the_file() {
        let dir = tempdir().expect("tempdir");
        let opts = options(dir.path());
        let plain = opts.input_root.join("a.dcm");
        let nested = opts.input_root.join("b.dcm");
        write_dicom(&plain, false);
        write_dicom(&nested, true);

        let outcome = BatchProcessor::new(opts).run(&[plain, nested], |_| {});

        assert!(outcome.is_success());
        assert_eq!(outcome.written.len(), 2);
        assert_eq!(outcome.field_failures, 1);
    }
}
