//! Keyed authentication of payload fields.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::doctype::DocumentType;
use crate::payload::{ProvenancePayload, FIELD_DELIM};

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 hex digest of a raw identity number.
///
/// Callers hash the number immediately and discard the original; only the
/// digest is ever embedded, compared or logged.
pub fn hash_owner_id(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Computes and checks the keyed tag binding payload fields to a shared
/// secret.
///
/// The secret is always passed in explicitly; nothing here reads the
/// environment (see [`crate::config`] for resolution). The signing tool
/// and any verifying component must hold the same secret or every check
/// fails.
pub struct Authenticator {
    key: Vec<u8>,
}

impl Authenticator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    /// Lowercase hex HMAC-SHA256 over the canonical field serialization:
    /// codec field order, codec delimiter, signature excluded.
    pub fn tag(
        &self,
        owner_id_hash: &str,
        document_type: DocumentType,
        timestamp: i64,
        issuer: &str,
    ) -> String {
        let mut mac = self.mac();
        mac.update(canonical_message(owner_id_hash, document_type, timestamp, issuer).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Recompute the tag from the candidate fields and compare in constant
    /// time. Returns a boolean only; the expected tag never leaves here,
    /// and a mismatch is never attributed to a particular field.
    pub fn verify_tag(&self, payload: &ProvenancePayload) -> bool {
        let Ok(claimed) = hex::decode(&payload.signature) else {
            return false;
        };
        let mut mac = self.mac();
        mac.update(
            canonical_message(
                &payload.owner_id_hash,
                payload.document_type,
                payload.timestamp,
                &payload.issuer,
            )
            .as_bytes(),
        );
        mac.verify_slice(&claimed).is_ok()
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size")
    }
}

fn canonical_message(
    owner_id_hash: &str,
    document_type: DocumentType,
    timestamp: i64,
    issuer: &str,
) -> String {
    format!(
        "{owner_id_hash}{d}{ty}{d}{timestamp}{d}{issuer}",
        d = FIELD_DELIM,
        ty = document_type.code(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged_payload(auth: &Authenticator) -> ProvenancePayload {
        let owner_id_hash = hash_owner_id("123412341234");
        let signature = auth.tag(&owner_id_hash, DocumentType::LegalContract, 1_700_000_000, "x");
        ProvenancePayload {
            owner_id_hash,
            document_type: DocumentType::LegalContract,
            timestamp: 1_700_000_000,
            issuer: "x".into(),
            signature,
        }
    }

    #[test]
    fn tag_is_deterministic() {
        let auth = Authenticator::new("secret");
        let a = auth.tag("aa", DocumentType::Other, 1, "issuer");
        let b = auth.tag("aa", DocumentType::Other, 1, "issuer");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn verify_accepts_untampered_payload() {
        let auth = Authenticator::new("secret");
        assert!(auth.verify_tag(&tagged_payload(&auth)));
    }

    #[test]
    fn verify_rejects_any_mutated_field() {
        let auth = Authenticator::new("secret");
        let base = tagged_payload(&auth);

        let mut p = base.clone();
        p.timestamp += 1;
        assert!(!auth.verify_tag(&p));

        let mut p = base.clone();
        p.document_type = DocumentType::Other;
        assert!(!auth.verify_tag(&p));

        let mut p = base.clone();
        p.issuer = "someone else".into();
        assert!(!auth.verify_tag(&p));

        let mut p = base;
        p.owner_id_hash = hash_owner_id("999912341234");
        assert!(!auth.verify_tag(&p));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let auth = Authenticator::new("secret");
        let other = Authenticator::new("other-secret");
        assert!(!other.verify_tag(&tagged_payload(&auth)));
    }

    #[test]
    fn verify_rejects_non_hex_signature() {
        let auth = Authenticator::new("secret");
        let mut p = tagged_payload(&auth);
        p.signature = "not-hex-at-all".into();
        assert!(!auth.verify_tag(&p));
    }

    #[test]
    fn owner_hash_is_stable_sha256() {
        assert_eq!(hash_owner_id("123412341234").len(), 64);
        assert_eq!(hash_owner_id("a"), hash_owner_id("a"));
        assert_ne!(hash_owner_id("a"), hash_owner_id("b"));
    }
}
