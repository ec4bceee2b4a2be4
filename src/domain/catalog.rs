//! Static catalog of requestable document types.
//!
//! The string forms are sent verbatim to the backend and must not change.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown document type: {0}")]
pub struct UnknownDocumentType(pub String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown board: {0}")]
pub struct UnknownBoard(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Migration Certificate")]
    MigrationCertificate,
    #[serde(rename = "School Leaving Certificate")]
    SchoolLeavingCertificate,
    #[serde(rename = "Passport")]
    Passport,
    #[serde(rename = "Disability Certificate")]
    DisabilityCertificate,
    #[serde(rename = "Income Certificate")]
    IncomeCertificate,
    #[serde(rename = "Death Certificate")]
    DeathCertificate,
    #[serde(rename = "XII Marksheet")]
    XiiMarksheet,
    #[serde(rename = "Domicile Certificate")]
    DomicileCertificate,
}

impl DocumentType {
    /// All document types in catalog order.
    pub const ALL: [DocumentType; 8] = [
        DocumentType::MigrationCertificate,
        DocumentType::SchoolLeavingCertificate,
        DocumentType::Passport,
        DocumentType::DisabilityCertificate,
        DocumentType::IncomeCertificate,
        DocumentType::DeathCertificate,
        DocumentType::XiiMarksheet,
        DocumentType::DomicileCertificate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::MigrationCertificate => "Migration Certificate",
            DocumentType::SchoolLeavingCertificate => "School Leaving Certificate",
            DocumentType::Passport => "Passport",
            DocumentType::DisabilityCertificate => "Disability Certificate",
            DocumentType::IncomeCertificate => "Income Certificate",
            DocumentType::DeathCertificate => "Death Certificate",
            DocumentType::XiiMarksheet => "XII Marksheet",
            DocumentType::DomicileCertificate => "Domicile Certificate",
        }
    }

    /// Supporting documents, in declaration order.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            DocumentType::MigrationCertificate => &["Birth Certificate", "XII Marksheet"],
            DocumentType::SchoolLeavingCertificate => &["XII Marksheet"],
            DocumentType::Passport => &["Birth Certificate"],
            DocumentType::DisabilityCertificate => &["Birth Certificate", "Medical Report"],
            DocumentType::IncomeCertificate => &["Salary Slip"],
            DocumentType::DeathCertificate => &["Birth Certificate", "Death Report"],
            DocumentType::XiiMarksheet => &["Admit Card"],
            DocumentType::DomicileCertificate => &["Birth Certificate", "Proof of Residence"],
        }
    }

    pub fn issuing_authority(&self) -> &'static str {
        match self {
            DocumentType::MigrationCertificate => "School/College Administration",
            DocumentType::SchoolLeavingCertificate => "School Principal/Headmaster",
            DocumentType::Passport => "Ministry of External Affairs, Government of India",
            DocumentType::DisabilityCertificate => {
                "Chief Medical Officer (CMO), Government Hospital"
            }
            DocumentType::IncomeCertificate => "Revenue Department, State Government",
            DocumentType::DeathCertificate => {
                "Registrar of Births and Deaths, Municipal Corporation"
            }
            DocumentType::XiiMarksheet => "Ministry of Education/State Education Board",
            DocumentType::DomicileCertificate => {
                "District Magistrate/Tehsildar, State Government"
            }
        }
    }

    /// Whether the form asks for the issuing board.
    pub fn requires_board(&self) -> bool {
        matches!(self, DocumentType::MigrationCertificate)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|doc_type| doc_type.as_str() == s)
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}

/// Examination board, asked for Migration Certificates only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Board {
    #[serde(rename = "CBSE")]
    Cbse,
    #[serde(rename = "MP")]
    Mp,
    Chhattisgarh,
    Other,
}

impl Board {
    pub const ALL: [Board; 4] = [Board::Cbse, Board::Mp, Board::Chhattisgarh, Board::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Cbse => "CBSE",
            Board::Mp => "MP",
            Board::Chhattisgarh => "Chhattisgarh",
            Board::Other => "Other",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Board {
    type Err = UnknownBoard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::ALL
            .into_iter()
            .find(|board| board.as_str() == s)
            .ok_or_else(|| UnknownBoard(s.to_string()))
    }
}
