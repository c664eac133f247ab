//
// container.rs
// dicom-anonymizer
//
// Thin wrappers over the DICOM Part 10 reader/writer: signature sniffing, decoding and persisting records.
//
// Thales Matheus Mendonça Santos - November 2025

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use dicom::object::{open_file, DefaultDicomObject};

use crate::error::FileError;

const PREAMBLE_LEN: usize = 128;
const MAGIC: &[u8; 4] = b"DICM";

/// True when `DICM` sits right after the 128-byte preamble. Unreadable paths count as not DICOM.
pub fn is_dicom_file(path: &Path) -> bool {
    let mut head = [0u8; PREAMBLE_LEN + 4];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut head))
        .map(|_| &head[PREAMBLE_LEN..] == MAGIC)
        .unwrap_or(false)
}

/// Decode a Part 10 file, pixel data included.
pub fn read_record(path: &Path) -> Result<DefaultDicomObject, FileError> {
    open_file(path).map_err(FileError::Malformed)
}

/// Write the record to `output`, creating parent directories first.
pub fn write_record(record: &DefaultDicomObject, output: &Path) -> Result<(), FileError> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|source| FileError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    record
        .write_to_file(output)
        .map_err(|source| FileError::Persist {
            path: output.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn signature_at_offset_128_is_required() {
        let dir = tempdir().expect("tempdir");

        let good = dir.path().join("good.dcm");
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"DICM");
        fs::write(&good, &bytes).expect("write good");
        assert!(is_dicom_file(&good));

        let shifted = dir.path().join("shifted.dcm");
        let mut bytes = vec![0u8; 127];
        bytes.extend_from_slice(b"DICM");
        fs::write(&shifted, &bytes).expect("write shifted");
        assert!(!is_dicom_file(&shifted));

        let short = dir.path().join("short.txt");
        fs::write(&short, b"DICM").expect("write short");
        assert!(!is_dicom_file(&short));
    }

    #[test]
    fn missing_file_is_not_dicom() {
        let dir = tempdir().expect("tempdir");
        assert!(!is_dicom_file(&dir.path().join("nope.dcm")));
        assert!(!is_dicom_file(dir.path()));
    }

    #[test]
    fn truncated_container_is_malformed() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("truncated.dcm");
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"DICM");
        bytes.extend_from_slice(&[0x02, 0x00, 0x00]);
        fs::write(&path, &bytes).expect("write truncated");

        assert!(is_dicom_file(&path));
        assert!(matches!(read_record(&path), Err(FileError::Malformed(_))));
    }
}
