//! Error taxonomy for sealing operations.

use std::path::PathBuf;

/// Failures that abort a signing or verification run.
///
/// Verification *outcomes* (unsigned input, tampering, wrong owner) are not
/// errors; they are reported through [`crate::verify::Verdict`].
#[derive(Debug, thiserror::Error)]
pub enum SealError {
    #[error("unknown document type: {code}")]
    UnknownDocumentType { code: String },

    #[error("unsupported format: {reason}")]
    UnsupportedFormat { reason: String },

    #[error("issuer contains reserved characters: {issuer:?}")]
    InvalidIssuer { issuer: String },

    #[error("output path {} would overwrite the input document", path.display())]
    OverwriteInput { path: PathBuf },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl SealError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
