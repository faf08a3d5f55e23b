//! Verification workflow and its verdict taxonomy.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::adapter::{adapter_for, FormatHint};
use crate::auth::{hash_owner_id, Authenticator};
use crate::doctype::DocumentType;
use crate::error::SealError;
use crate::payload::{self, DecodeError, ProvenancePayload};

/// Outcome of verifying a document against an expected owner and type.
///
/// These are non-overlapping reportable outcomes, not errors; only I/O
/// failures surface as [`SealError`]. Checks run in a fixed order and
/// authenticity comes first: the MAC is verified before any claim in the
/// payload is trusted for comparison, and a MAC failure short-circuits so
/// a forged record cannot leak which field was altered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// All checks passed; the embedded payload is returned for display
    /// and audit (it never contained raw identity data).
    Valid { payload: ProvenancePayload },
    /// No embedded marker found. Not an attack, just "unsigned".
    NoSignature,
    /// Marker found but the fields do not parse.
    MalformedPayload { reason: String },
    /// MAC check failed: tampering or wrong key.
    InvalidSignature,
    /// Signed by someone else.
    OwnerMismatch,
    /// Signed as a different document type.
    TypeMismatch {
        expected: DocumentType,
        actual: DocumentType,
    },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }

    /// Taxonomy name in snake_case, for structured reports.
    pub fn name(&self) -> &'static str {
        match self {
            Verdict::Valid { .. } => "valid",
            Verdict::NoSignature => "no_signature",
            Verdict::MalformedPayload { .. } => "malformed_payload",
            Verdict::InvalidSignature => "invalid_signature",
            Verdict::OwnerMismatch => "owner_mismatch",
            Verdict::TypeMismatch { .. } => "type_mismatch",
        }
    }

    /// Human-readable explanation, safe to surface to end users. Never
    /// contains a raw identity number.
    pub fn describe(&self) -> String {
        match self {
            Verdict::Valid { .. } => "document signature is valid".into(),
            Verdict::NoSignature => "no provenance record found in document".into(),
            Verdict::MalformedPayload { reason } => {
                format!("provenance record is malformed: {reason}")
            }
            Verdict::InvalidSignature => {
                "document signature is invalid or has been tampered with".into()
            }
            Verdict::OwnerMismatch => "this document is signed for a different owner".into(),
            Verdict::TypeMismatch { expected, actual } => {
                format!("document type mismatch: signed as '{actual}', expected '{expected}'")
            }
        }
    }

    /// Process exit code for CLI consumers.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Valid { .. } => 0,
            Verdict::MalformedPayload { .. } => 1,
            Verdict::NoSignature => 2,
            Verdict::InvalidSignature => 4,
            Verdict::OwnerMismatch => 5,
            Verdict::TypeMismatch { .. } => 6,
        }
    }
}

/// Verify in-memory bytes against an expected owner and document type.
///
/// This is the entry point the notarization relay calls before permitting
/// an on-chain write.
pub fn verify_bytes(
    auth: &Authenticator,
    bytes: &[u8],
    hint: FormatHint,
    expected_owner_id: &str,
    expected_type: DocumentType,
) -> Verdict {
    let Some(block) = adapter_for(hint).extract(bytes) else {
        return Verdict::NoSignature;
    };
    let payload = match payload::decode(&block) {
        Ok(p) => p,
        Err(DecodeError::NotFound) => return Verdict::NoSignature,
        Err(DecodeError::Malformed(reason)) => return Verdict::MalformedPayload { reason },
    };

    // Authenticity before identity: nothing in the payload is trusted
    // until the MAC holds.
    if !auth.verify_tag(&payload) {
        return Verdict::InvalidSignature;
    }
    if payload.owner_id_hash != hash_owner_id(expected_owner_id) {
        return Verdict::OwnerMismatch;
    }
    if payload.document_type != expected_type {
        return Verdict::TypeMismatch {
            expected: expected_type,
            actual: payload.document_type,
        };
    }
    Verdict::Valid { payload }
}

/// Verify a document on disk.
pub fn verify_file(
    auth: &Authenticator,
    path: &Path,
    expected_owner_id: &str,
    expected_type: DocumentType,
) -> Result<Verdict, SealError> {
    let bytes =
        fs::read(path).map_err(|e| SealError::io(format!("failed to read {}", path.display()), e))?;
    Ok(verify_bytes(
        auth,
        &bytes,
        FormatHint::from_path(path),
        expected_owner_id,
        expected_type,
    ))
}
