//! Document type registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SealError;

/// Document categories accepted by the notarization flow.
///
/// The wire code ([`DocumentType::code`]) is what gets embedded in
/// payloads and typed on the command line; [`DocumentType::label`] is the
/// human name shown in prompts and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    BirthCertificate,
    DegreeCertificate,
    PropertyDeed,
    EmploymentLetter,
    LegalContract,
    IdentityDocument,
    Other,
}

impl DocumentType {
    /// Every supported type, in menu order.
    pub const ALL: [DocumentType; 7] = [
        DocumentType::BirthCertificate,
        DocumentType::DegreeCertificate,
        DocumentType::PropertyDeed,
        DocumentType::EmploymentLetter,
        DocumentType::LegalContract,
        DocumentType::IdentityDocument,
        DocumentType::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DocumentType::BirthCertificate => "birth_certificate",
            DocumentType::DegreeCertificate => "degree_certificate",
            DocumentType::PropertyDeed => "property_deed",
            DocumentType::EmploymentLetter => "employment_letter",
            DocumentType::LegalContract => "legal_contract",
            DocumentType::IdentityDocument => "identity_document",
            DocumentType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentType::BirthCertificate => "Birth Certificate",
            DocumentType::DegreeCertificate => "Degree/Education Certificate",
            DocumentType::PropertyDeed => "Property Deed",
            DocumentType::EmploymentLetter => "Employment Letter",
            DocumentType::LegalContract => "Legal Contract/Agreement",
            DocumentType::IdentityDocument => "Identity Document",
            DocumentType::Other => "Other Document",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DocumentType {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == s)
            .ok_or_else(|| SealError::UnknownDocumentType {
                code: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back_to_themselves() {
        for t in DocumentType::ALL {
            assert_eq!(t.code().parse::<DocumentType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "passport_xyz".parse::<DocumentType>().unwrap_err();
        assert!(matches!(err, SealError::UnknownDocumentType { code } if code == "passport_xyz"));
    }

    #[test]
    fn serde_uses_snake_case_codes() {
        let json = serde_json::to_string(&DocumentType::BirthCertificate).unwrap();
        assert_eq!(json, "\"birth_certificate\"");
    }
}
