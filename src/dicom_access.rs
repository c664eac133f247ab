//
// dicom_access.rs
// dicom-anonymizer
//
// Optional-field accessor over a DICOM record so the anonymizer never pokes at raw elements directly.
//
// Thales Matheus Mendonça Santos - November 2025

use dicom::core::value::{PrimitiveValue, Value};
use dicom::core::DataElement;
use dicom::object::DefaultDicomObject;

use crate::error::FieldError;
use crate::fields::Field;

/// Read and rewrite named attributes of one metadata record.
///
/// `value` returns `None` when the attribute is absent. `set_value` replaces the value
/// (creating the attribute if needed) and reports failures instead of panicking,
/// leaving the record untouched for that attribute.
pub trait MetadataRecord {
    fn value(&self, field: Field) -> Option<String>;
    fn set_value(&mut self, field: Field, value: &str) -> Result<(), FieldError>;

    fn has(&self, field: Field) -> bool {
        self.value(field).is_some()
    }

    /// Present and not blank.
    fn non_empty(&self, field: Field) -> Option<String> {
        self.value(field).filter(|v| !v.trim().is_empty())
    }
}

impl MetadataRecord for DefaultDicomObject {
    fn value(&self, field: Field) -> Option<String> {
        if field == Field::MediaStorageSopInstanceUid {
            let uid = self.meta().media_storage_sop_instance_uid();
            return Some(uid.to_string());
        }
        self.element(field.tag())
            .ok()
            .and_then(|e| e.to_str().ok())
            .map(|s| s.trim_end_matches(|c: char| c == '\0' || c == ' ').to_string())
    }

    // Presence is about the element, not its textual form: sequences count too.
    fn has(&self, field: Field) -> bool {
        if field == Field::MediaStorageSopInstanceUid {
            return true;
        }
        self.element(field.tag()).is_ok()
    }

    fn set_value(&mut self, field: Field, value: &str) -> Result<(), FieldError> {
        if field == Field::MediaStorageSopInstanceUid {
            let meta = self.meta_mut();
            meta.media_storage_sop_instance_uid = even_padded_uid(value);
            meta.update_information_group_length();
            return Ok(());
        }

        // Keep the VR the file already uses; only fall back to the dictionary VR for new elements.
        let vr = match self.element(field.tag()) {
            Ok(existing) => match existing.value() {
                Value::Primitive(_) => existing.vr(),
                Value::Sequence(_) => {
                    return Err(FieldError::NotWritable {
                        field,
                        reason: "value is a sequence".to_string(),
                    })
                }
                _ => {
                    return Err(FieldError::NotWritable {
                        field,
                        reason: "value is an encapsulated pixel sequence".to_string(),
                    })
                }
            },
            Err(_) => field.vr(),
        };

        let value = if value.is_empty() {
            PrimitiveValue::Empty
        } else {
            PrimitiveValue::from(value)
        };
        self.put(DataElement::new(field.tag(), vr, value));
        Ok(())
    }
}

// File meta UIDs are stored already padded to even length.
fn even_padded_uid(uid: &str) -> String {
    let mut padded = uid.to_string();
    if padded.len() % 2 == 1 {
        padded.push('\0');
    }
    padded
}
