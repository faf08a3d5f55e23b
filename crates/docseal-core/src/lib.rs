//! Tamper-evident provenance sealing for notarized documents.
//!
//! A document is sealed by embedding a delimited provenance payload —
//! owner identity hash, document type, timestamp, issuer and an HMAC tag
//! binding them to a shared secret — into the file itself: into the
//! information dictionary for PDFs, as a trailing marker-framed block for
//! everything else. Verification extracts the payload, re-checks the HMAC,
//! and only then compares the claimed owner and type against the caller's
//! expectations.
//!
//! The notarization backend calls [`verify::verify_bytes`] before it
//! permits an on-chain write; the `docseal` binary wraps the same
//! workflows for offline use. Signing is purely local: no network, no
//! chain interaction, and the raw identity number is hashed immediately
//! and never stored or logged.

pub mod adapter;
pub mod auth;
pub mod config;
pub mod doctype;
pub mod error;
pub mod payload;
pub mod sign;
pub mod verify;

pub use auth::Authenticator;
pub use doctype::DocumentType;
pub use error::SealError;
pub use payload::ProvenancePayload;
pub use verify::Verdict;
