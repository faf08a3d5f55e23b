//! Provenance payload schema and its delimited text codec.
//!
//! The encoded form is a single marker-framed line:
//!
//! ```text
//! DOCSEAL-V1|<owner_id_hash>|<type code>|<timestamp>|<issuer>|<signature>|DOCSEAL-END
//! ```
//!
//! Every field except `issuer` is delimiter-safe by construction (hex
//! digests, an integer, an enum code); `issuer` is rejected at payload
//! construction if it would break the framing. Decoding tolerates the
//! block sitting anywhere inside a larger text — a PDF metadata value or
//! the tail of a text file — not only at a fixed offset.

use serde::{Deserialize, Serialize};

use crate::doctype::DocumentType;
use crate::error::SealError;

/// Start marker locating an embedded payload inside arbitrary content.
pub const MARKER_START: &str = "DOCSEAL-V1";
/// End marker closing the framed block.
pub const MARKER_END: &str = "DOCSEAL-END";
/// Reserved field delimiter; no field value may contain it.
pub const FIELD_DELIM: char = '|';
/// Issuer stored when the caller provides none.
pub const UNKNOWN_ISSUER: &str = "unknown";

/// The signed record embedded in a document.
///
/// Created once at signing time and never mutated afterwards; re-signing
/// produces a fresh record in a new output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenancePayload {
    /// SHA-256 hex digest of the owner's identity number. The raw number
    /// is never stored.
    pub owner_id_hash: String,
    pub document_type: DocumentType,
    /// Seconds since the Unix epoch, set at signing time.
    pub timestamp: i64,
    pub issuer: String,
    /// Hex HMAC over the other four fields; always computed last.
    pub signature: String,
}

/// Codec-level failures, kept distinct so verification can tell "never
/// signed" apart from "signed but corrupted".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("no payload marker found")]
    NotFound,
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Serialize a payload into its marker-framed text block.
pub fn encode(payload: &ProvenancePayload) -> String {
    format!(
        "{start}{d}{owner}{d}{ty}{d}{ts}{d}{issuer}{d}{sig}{d}{end}",
        start = MARKER_START,
        d = FIELD_DELIM,
        owner = payload.owner_id_hash,
        ty = payload.document_type.code(),
        ts = payload.timestamp,
        issuer = payload.issuer,
        sig = payload.signature,
        end = MARKER_END,
    )
}

/// Locate the framed payload block anywhere in `text`.
///
/// Returns the slice from the start marker through the end marker. When
/// the end marker is missing the rest of the text is returned so that
/// [`decode`] can report the truncation as malformed rather than absent.
pub fn find_block(text: &str) -> Option<&str> {
    let start = text.find(MARKER_START)?;
    let rest = &text[start..];
    match rest.find(MARKER_END) {
        Some(end) => Some(&rest[..end + MARKER_END.len()]),
        None => Some(rest),
    }
}

/// Lossy-decode raw bytes and locate the payload block. ASCII markers
/// survive lossy decoding, so this works on binary content too.
pub fn find_block_in_bytes(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    find_block(&text).map(str::to_owned)
}

/// Parse a payload out of `text`, scanning for the marker first.
pub fn decode(text: &str) -> Result<ProvenancePayload, DecodeError> {
    let block = find_block(text).ok_or(DecodeError::NotFound)?;
    parse_block(block)
}

fn parse_block(block: &str) -> Result<ProvenancePayload, DecodeError> {
    let Some(framed) = block.strip_suffix(MARKER_END) else {
        return Err(DecodeError::Malformed("missing end marker".into()));
    };
    let body = framed
        .strip_prefix(MARKER_START)
        .expect("find_block anchors on the start marker");

    // body is "|f1|f2|f3|f4|f5|", so splitting yields empty bookends.
    let fields: Vec<&str> = body.split(FIELD_DELIM).collect();
    if fields.len() != 7 || !fields[0].is_empty() || !fields[6].is_empty() {
        return Err(DecodeError::Malformed(format!(
            "expected 5 fields, found {}",
            fields.len().saturating_sub(2)
        )));
    }

    let document_type: DocumentType = fields[2].parse().map_err(|_| {
        DecodeError::Malformed(format!("unknown document type code: {}", fields[2]))
    })?;
    let timestamp: i64 = fields[3]
        .parse()
        .map_err(|_| DecodeError::Malformed("timestamp is not an integer".into()))?;

    Ok(ProvenancePayload {
        owner_id_hash: fields[1].to_string(),
        document_type,
        timestamp,
        issuer: fields[4].to_string(),
        signature: fields[5].to_string(),
    })
}

/// Normalize and validate an issuer value for embedding.
///
/// Absent or blank issuers fall back to [`UNKNOWN_ISSUER`]. Values that
/// would break the delimited framing (the reserved delimiter, either
/// marker, control characters) are rejected rather than escaped, keeping
/// the codec trivially reversible.
pub fn sanitize_issuer(issuer: Option<&str>) -> Result<String, SealError> {
    let issuer = match issuer.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(UNKNOWN_ISSUER.to_string()),
    };
    if issuer.contains(FIELD_DELIM)
        || issuer.contains(MARKER_START)
        || issuer.contains(MARKER_END)
        || issuer.chars().any(char::is_control)
    {
        return Err(SealError::InvalidIssuer {
            issuer: issuer.to_string(),
        });
    }
    Ok(issuer.to_string())
}
