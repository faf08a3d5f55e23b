//! Signing workflow: read, build payload, authenticate, embed, write.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::adapter::{adapter_for, FormatHint};
use crate::auth::{hash_owner_id, Authenticator};
use crate::doctype::DocumentType;
use crate::error::SealError;
use crate::payload::{self, ProvenancePayload};

/// Where a signed copy landed and what was embedded in it.
#[derive(Debug)]
pub struct SignOutcome {
    pub output: PathBuf,
    pub payload: ProvenancePayload,
}

/// Build a signed payload without touching any file.
///
/// The raw identity number is hashed here and discarded; the signature is
/// computed last, over the other four fields. Useful for embedding into a
/// pre-existing document by hand, and for tests.
pub fn generate_payload(
    auth: &Authenticator,
    owner_id: &str,
    document_type: DocumentType,
    issuer: Option<&str>,
) -> Result<ProvenancePayload, SealError> {
    let issuer = payload::sanitize_issuer(issuer)?;
    let owner_id_hash = hash_owner_id(owner_id);
    let timestamp = Utc::now().timestamp();
    let signature = auth.tag(&owner_id_hash, document_type, timestamp, &issuer);
    Ok(ProvenancePayload {
        owner_id_hash,
        document_type,
        timestamp,
        issuer,
        signature,
    })
}

/// Sign in-memory bytes, returning the new buffer and the embedded payload.
pub fn sign_bytes(
    auth: &Authenticator,
    bytes: &[u8],
    hint: FormatHint,
    owner_id: &str,
    document_type: DocumentType,
    issuer: Option<&str>,
) -> Result<(Vec<u8>, ProvenancePayload), SealError> {
    let payload = generate_payload(auth, owner_id, document_type, issuer)?;
    let block = payload::encode(&payload);
    let signed = adapter_for(hint).embed(bytes, &block)?;
    Ok((signed, payload))
}

/// Conventional output name for a signed copy: `<stem>_signed.<ext>`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_signed.{ext}"),
        None => format!("{stem}_signed"),
    };
    input.with_file_name(name)
}

/// Sign a document on disk.
///
/// Writes the signed copy to `output` (default: sibling
/// `<stem>_signed.<ext>`). The input file is read-only input and is never
/// overwritten; signing is purely local, with no network or chain
/// interaction.
pub fn sign_file(
    auth: &Authenticator,
    input: &Path,
    owner_id: &str,
    document_type: DocumentType,
    issuer: Option<&str>,
    output: Option<&Path>,
) -> Result<SignOutcome, SealError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    if resolves_to(&output, input) {
        return Err(SealError::OverwriteInput { path: output });
    }

    let bytes = fs::read(input)
        .map_err(|e| SealError::io(format!("failed to read {}", input.display()), e))?;
    let hint = FormatHint::from_path(input);
    let (signed, payload) = sign_bytes(auth, &bytes, hint, owner_id, document_type, issuer)?;

    fs::write(&output, signed)
        .map_err(|e| SealError::io(format!("failed to write {}", output.display()), e))?;
    info!(
        output = %output.display(),
        doc_type = payload.document_type.code(),
        "document signed"
    );
    Ok(SignOutcome { output, payload })
}

/// True when `output` names the same file as `input`, after resolving
/// `..` components and symlinks. Structural equality alone misses aliased
/// paths, which would let a signed copy land on top of the original.
fn resolves_to(output: &Path, input: &Path) -> bool {
    if output == input {
        return true;
    }
    let Ok(input) = fs::canonicalize(input) else {
        return false;
    };
    if let Ok(output) = fs::canonicalize(output) {
        return output == input;
    }
    // Output does not exist yet; resolve its parent instead.
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), output.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name) == input,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_output_adds_signed_suffix() {
        assert_eq!(
            default_output_path(Path::new("certs/deed.pdf")),
            PathBuf::from("certs/deed_signed.pdf")
        );
        assert_eq!(
            default_output_path(Path::new("notes.txt")),
            PathBuf::from("notes_signed.txt")
        );
        assert_eq!(
            default_output_path(Path::new("blob")),
            PathBuf::from("blob_signed")
        );
    }

    #[test]
    fn generate_payload_hashes_owner_and_tags_last() {
        let auth = Authenticator::new("secret");
        let p = generate_payload(&auth, "123412341234", DocumentType::Other, None).unwrap();
        assert_eq!(p.owner_id_hash.len(), 64);
        assert!(!p.owner_id_hash.contains("123412341234"));
        assert_eq!(p.issuer, "unknown");
        assert!(auth.verify_tag(&p));
    }

    #[test]
    fn explicit_output_equal_to_input_is_refused() {
        let auth = Authenticator::new("secret");
        let err = sign_file(
            &auth,
            Path::new("deed.pdf"),
            "123412341234",
            DocumentType::PropertyDeed,
            None,
            Some(Path::new("deed.pdf")),
        )
        .unwrap_err();
        assert!(matches!(err, SealError::OverwriteInput { .. }));
    }

    #[test]
    fn aliased_output_path_is_refused() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("doc.txt");
        fs::write(&input, b"hello world").unwrap();

        // Same file spelled through a parent-directory round trip.
        let dir_name = tmp.path().file_name().unwrap();
        let alias = tmp.path().join("..").join(dir_name).join("doc.txt");

        let auth = Authenticator::new("secret");
        let err = sign_file(
            &auth,
            &input,
            "123412341234",
            DocumentType::Other,
            None,
            Some(&alias),
        )
        .unwrap_err();
        assert!(matches!(err, SealError::OverwriteInput { .. }));
        assert_eq!(fs::read(&input).unwrap(), b"hello world");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_output_path_is_refused() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("doc.txt");
        fs::write(&input, b"hello world").unwrap();
        let link = tmp.path().join("doc_link.txt");
        std::os::unix::fs::symlink(&input, &link).unwrap();

        let auth = Authenticator::new("secret");
        let err = sign_file(
            &auth,
            &input,
            "123412341234",
            DocumentType::Other,
            None,
            Some(&link),
        )
        .unwrap_err();
        assert!(matches!(err, SealError::OverwriteInput { .. }));
        assert_eq!(fs::read(&input).unwrap(), b"hello world");
    }

    #[test]
    fn distinct_sibling_output_is_allowed() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("doc.txt");
        fs::write(&input, b"hello world").unwrap();
        let out = tmp.path().join("..").join(
            tmp.path().file_name().unwrap(),
        ).join("sealed.txt");

        let auth = Authenticator::new("secret");
        let outcome = sign_file(
            &auth,
            &input,
            "123412341234",
            DocumentType::Other,
            None,
            Some(&out),
        )
        .unwrap();
        assert_eq!(fs::read(&input).unwrap(), b"hello world");
        assert!(outcome.output.exists());
    }
}
