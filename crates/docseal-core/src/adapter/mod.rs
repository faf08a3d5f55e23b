//! Format-specific embedding and extraction of payload blocks.
//!
//! Each concrete format implements the same embed/extract contract; the
//! workflows pick an adapter from the file extension and never branch on
//! format themselves.

pub mod append;
pub mod pdf;

use std::path::Path;

use crate::error::SealError;

/// Embedding strategy selected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Pdf,
    Text,
    /// Anything else: treated as opaque bytes with a trailing append.
    Opaque,
}

impl FormatHint {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => FormatHint::Opaque,
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => FormatHint::Pdf,
            "txt" | "text" | "md" | "csv" | "log" | "rtf" => FormatHint::Text,
            _ => FormatHint::Opaque,
        }
    }
}

/// Uniform embed/extract contract over concrete file formats.
pub trait FormatAdapter {
    /// Return a new buffer with the payload block embedded. Input bytes
    /// are never mutated in place; choosing the output path is the
    /// caller's job.
    fn embed(&self, bytes: &[u8], block: &str) -> Result<Vec<u8>, SealError>;

    /// Locate an embedded payload block, or `None` when the file carries
    /// none.
    fn extract(&self, bytes: &[u8]) -> Option<String>;
}

static PDF_ADAPTER: pdf::PdfAdapter = pdf::PdfAdapter;
static TEXT_ADAPTER: append::AppendAdapter = append::AppendAdapter { opaque: false };
static OPAQUE_ADAPTER: append::AppendAdapter = append::AppendAdapter { opaque: true };

pub fn adapter_for(hint: FormatHint) -> &'static dyn FormatAdapter {
    match hint {
        FormatHint::Pdf => &PDF_ADAPTER,
        FormatHint::Text => &TEXT_ADAPTER,
        FormatHint::Opaque => &OPAQUE_ADAPTER,
    }
}
