//
// fields.rs
// dicom-anonymizer
//
// Names the attributes the anonymizer reads or rewrites, with their tags and value representations.
//
// Thales Matheus Mendonça Santos - November 2025

use std::fmt;

use dicom::core::{Tag, VR};

/// Attributes touched by the anonymizer.
///
/// `MediaStorageSopInstanceUid` lives in the file meta group rather than the
/// main data set; record implementations route it accordingly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PatientName,
    PatientId,
    PatientBirthDate,
    PatientSex,
    PatientAddress,
    OtherPatientIds,
    OtherPatientNames,
    EthnicGroup,
    PatientTelephoneNumbers,
    AccessionNumber,
    InstitutionName,
    InstitutionAddress,
    ReferringPhysicianName,
    StudyId,
    StudyDescription,
    PerformingPhysicianName,
    OperatorsName,
    RequestingPhysician,
    StudyComments,
    SeriesDescription,
    StudyInstanceUid,
    SeriesInstanceUid,
    SopInstanceUid,
    MediaStorageSopInstanceUid,
}

/// Attributes that identify the patient or the people and place around the study.
///
/// SeriesDescription is intentionally absent: it is kept verbatim.
pub const IDENTIFYING_FIELDS: [Field; 19] = [
    Field::PatientName,
    Field::PatientId,
    Field::PatientBirthDate,
    Field::PatientSex,
    Field::PatientAddress,
    Field::OtherPatientIds,
    Field::OtherPatientNames,
    Field::EthnicGroup,
    Field::PatientTelephoneNumbers,
    Field::AccessionNumber,
    Field::InstitutionName,
    Field::InstitutionAddress,
    Field::ReferringPhysicianName,
    Field::StudyId,
    Field::StudyDescription,
    Field::PerformingPhysicianName,
    Field::OperatorsName,
    Field::RequestingPhysician,
    Field::StudyComments,
];

impl Field {
    pub fn tag(self) -> Tag {
        match self {
            Field::PatientName => Tag(0x0010, 0x0010),
            Field::PatientId => Tag(0x0010, 0x0020),
            Field::PatientBirthDate => Tag(0x0010, 0x0030),
            Field::PatientSex => Tag(0x0010, 0x0040),
            Field::PatientAddress => Tag(0x0010, 0x1040),
            Field::OtherPatientIds => Tag(0x0010, 0x1000),
            Field::OtherPatientNames => Tag(0x0010, 0x1001),
            Field::EthnicGroup => Tag(0x0010, 0x2160),
            Field::PatientTelephoneNumbers => Tag(0x0010, 0x2154),
            Field::AccessionNumber => Tag(0x0008, 0x0050),
            Field::InstitutionName => Tag(0x0008, 0x0080),
            Field::InstitutionAddress => Tag(0x0008, 0x0081),
            Field::ReferringPhysicianName => Tag(0x0008, 0x0090),
            Field::StudyId => Tag(0x0020, 0x0010),
            Field::StudyDescription => Tag(0x0008, 0x1030),
            Field::PerformingPhysicianName => Tag(0x0008, 0x1050),
            Field::OperatorsName => Tag(0x0008, 0x1070),
            Field::RequestingPhysician => Tag(0x0032, 0x1032),
            Field::StudyComments => Tag(0x0032, 0x4000),
            Field::SeriesDescription => Tag(0x0008, 0x103E),
            Field::StudyInstanceUid => Tag(0x0020, 0x000D),
            Field::SeriesInstanceUid => Tag(0x0020, 0x000E),
            Field::SopInstanceUid => Tag(0x0008, 0x0018),
            Field::MediaStorageSopInstanceUid => Tag(0x0002, 0x0003),
        }
    }

    /// Value representation used when the attribute has to be created from scratch.
    pub fn vr(self) -> VR {
        match self {
            Field::PatientName
            | Field::OtherPatientNames
            | Field::ReferringPhysicianName
            | Field::PerformingPhysicianName
            | Field::OperatorsName
            | Field::RequestingPhysician => VR::PN,
            Field::PatientId
            | Field::PatientAddress
            | Field::OtherPatientIds
            | Field::InstitutionName
            | Field::StudyDescription
            | Field::SeriesDescription => VR::LO,
            Field::PatientBirthDate => VR::DA,
            Field::PatientSex => VR::CS,
            Field::EthnicGroup
            | Field::PatientTelephoneNumbers
            | Field::AccessionNumber
            | Field::StudyId => VR::SH,
            Field::InstitutionAddress => VR::ST,
            Field::StudyComments => VR::LT,
            Field::StudyInstanceUid
            | Field::SeriesInstanceUid
            | Field::SopInstanceUid
            | Field::MediaStorageSopInstanceUid => VR::UI,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Field::PatientName => "PatientName",
            Field::PatientId => "PatientID",
            Field::PatientBirthDate => "PatientBirthDate",
            Field::PatientSex => "PatientSex",
            Field::PatientAddress => "PatientAddress",
            Field::OtherPatientIds => "OtherPatientIDs",
            Field::OtherPatientNames => "OtherPatientNames",
            Field::EthnicGroup => "EthnicGroup",
            Field::PatientTelephoneNumbers => "PatientTelephoneNumbers",
            Field::AccessionNumber => "AccessionNumber",
            Field::InstitutionName => "InstitutionName",
            Field::InstitutionAddress => "InstitutionAddress",
            Field::ReferringPhysicianName => "ReferringPhysicianName",
            Field::StudyId => "StudyID",
            Field::StudyDescription => "StudyDescription",
            Field::PerformingPhysicianName => "PerformingPhysicianName",
            Field::OperatorsName => "OperatorsName",
            Field::RequestingPhysician => "RequestingPhysician",
            Field::StudyComments => "StudyComments",
            Field::SeriesDescription => "SeriesDescription",
            Field::StudyInstanceUid => "StudyInstanceUID",
            Field::SeriesInstanceUid => "SeriesInstanceUID",
            Field::SopInstanceUid => "SOPInstanceUID",
            Field::MediaStorageSopInstanceUid => "MediaStorageSOPInstanceUID",
        }
    }

    /// Fields that receive the subject pseudonym instead of being blanked.
    pub fn carries_pseudonym(self) -> bool {
        matches!(self, Field::PatientName | Field::PatientId)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
