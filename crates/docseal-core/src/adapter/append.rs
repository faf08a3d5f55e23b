//! Byte-append embedding for plain-text and opaque formats.

use tracing::warn;

use super::FormatAdapter;
use crate::error::SealError;
use crate::payload;

/// Appends the payload block after a separating newline.
///
/// For opaque formats the trailing bytes may or may not survive
/// format-specific tooling; the caller is warned but not blocked.
pub struct AppendAdapter {
    pub(super) opaque: bool,
}

impl FormatAdapter for AppendAdapter {
    fn embed(&self, bytes: &[u8], block: &str) -> Result<Vec<u8>, SealError> {
        if self.opaque {
            warn!("appending payload to an unrecognized format; its structure may not tolerate trailing bytes");
        }
        let mut out = strip_existing_block(bytes);
        out.push(b'\n');
        out.extend_from_slice(block.as_bytes());
        out.push(b'\n');
        Ok(out)
    }

    fn extract(&self, bytes: &[u8]) -> Option<String> {
        payload::find_block_in_bytes(bytes)
    }
}

/// Drop a legacy payload block (plus its framing newlines) so re-signing
/// never stacks two records in one file.
fn strip_existing_block(bytes: &[u8]) -> Vec<u8> {
    let Some(start) = find_subslice(bytes, payload::MARKER_START.as_bytes()) else {
        return bytes.to_vec();
    };
    let end = find_subslice(&bytes[start..], payload::MARKER_END.as_bytes())
        .map(|i| start + i + payload::MARKER_END.len())
        .unwrap_or(bytes.len());

    let mut head = &bytes[..start];
    if head.ends_with(b"\n") {
        head = &head[..head.len() - 1];
    }
    let mut tail = &bytes[end..];
    if tail.starts_with(b"\n") {
        tail = &tail[1..];
    }

    let mut out = Vec::with_capacity(head.len() + tail.len());
    out.extend_from_slice(head);
    out.extend_from_slice(tail);
    out
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
