//
// anonymize.rs
// dicom-anonymizer
//
// Applies the de-identification policy to a single record: pseudonymize the subject, blank identifying
// attributes, and remap structural UIDs through the run registry.
//
// Thales Matheus Mendonça Santos - November 2025

use tracing::warn;

use crate::audit::AuditTable;
use crate::dicom_access::MetadataRecord;
use crate::error::FieldError;
use crate::fields::{Field, IDENTIFYING_FIELDS};
use crate::pseudonym::{pseudonym, UNKNOWN_SUBJECT};
use crate::uid::{generate_uid, UidKind, UidRegistry};

/// What happened to one record.
#[derive(Debug, Clone)]
pub struct Anonymization {
    /// PatientID, else PatientName, else `"unknown"`. Never written back to the record.
    pub subject_key: String,
    pub pseudonym: String,
    pub sop_instance_uid: String,
    /// Attributes that could not be rewritten and kept their previous value.
    pub field_failures: Vec<FieldError>,
}

/// Subject key used for pseudonym derivation and the audit table.
pub fn subject_key<R: MetadataRecord + ?Sized>(record: &R) -> String {
    record
        .non_empty(Field::PatientId)
        .or_else(|| record.non_empty(Field::PatientName))
        .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string())
}

/// Anonymize `record` in place. Never fails: attribute rewrites that cannot be
/// applied are logged and returned in [`Anonymization::field_failures`].
pub fn anonymize_record<R: MetadataRecord + ?Sized>(
    record: &mut R,
    audit: &mut AuditTable,
    registry: &mut UidRegistry,
    salt: &str,
) -> Anonymization {
    let mut failures = Vec::new();

    // 1-2. Subject key and its pseudonym.
    let subject_key = subject_key(record);
    let pseud = pseudonym(Some(&subject_key), salt);

    // 3. Identifying attributes: name/ID carry the pseudonym, the rest are blanked.
    for field in IDENTIFYING_FIELDS {
        if !record.has(field) {
            continue;
        }
        let value = if field.carries_pseudonym() {
            pseud.as_str()
        } else {
            ""
        };
        apply(record, field, value, &mut failures);
    }

    // 4-5. Study and series UIDs stay linked across files through the registry.
    for (field, kind) in [
        (Field::StudyInstanceUid, UidKind::Study),
        (Field::SeriesInstanceUid, UidKind::Series),
    ] {
        if let Some(original) = record.non_empty(field) {
            let replacement = registry.resolve(kind, &original).to_string();
            apply(record, field, &replacement, &mut failures);
        }
    }

    // 6-7. Every instance gets its own UID, mirrored into the file meta group.
    let sop_instance_uid = generate_uid();
    apply(record, Field::SopInstanceUid, &sop_instance_uid, &mut failures);
    if record.has(Field::MediaStorageSopInstanceUid) {
        apply(
            record,
            Field::MediaStorageSopInstanceUid,
            &sop_instance_uid,
            &mut failures,
        );
    }

    // 8. Audit entry.
    audit.record(&subject_key, &pseud);

    Anonymization {
        subject_key,
        pseudonym: pseud,
        sop_instance_uid,
        field_failures: failures,
    }
}

fn apply<R: MetadataRecord + ?Sized>(
    record: &mut R,
    field: Field,
    value: &str,
    failures: &mut Vec<FieldError>,
) {
    if let Err(e) = record.set_value(field, value) {
        warn!("Campo mantido sem alteração: {}", e);
        failures.push(e);
    }
}
