//! PDF embedding via the document information dictionary.

use lopdf::{Dictionary, Document, Object};

use super::FormatAdapter;
use crate::error::SealError;
use crate::payload;

/// Information dictionary key carrying the payload block.
const INFO_KEY: &str = "DocsealProvenance";

/// Writes the payload into the PDF information dictionary and reads it
/// back from there.
///
/// A file that does not parse as a PDF is a hard failure: byte-appending
/// inside a binary PDF structure would corrupt the xref table, so there is
/// no degraded append path for this format.
pub struct PdfAdapter;

impl FormatAdapter for PdfAdapter {
    fn embed(&self, bytes: &[u8], block: &str) -> Result<Vec<u8>, SealError> {
        let mut doc = Document::load_mem(bytes).map_err(|e| SealError::UnsupportedFormat {
            reason: format!("not a readable PDF: {e}"),
        })?;

        let value = Object::string_literal(block);
        let info_id = match doc.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        };
        match info_id {
            Some(id) => {
                let dict = doc
                    .get_object_mut(id)
                    .and_then(|obj| obj.as_dict_mut())
                    .map_err(|e| SealError::UnsupportedFormat {
                        reason: format!("information dictionary unreadable: {e}"),
                    })?;
                dict.set(INFO_KEY, value);
            }
            None => {
                // Some writers store the information dictionary inline in
                // the trailer; merge into it rather than replacing it.
                if let Ok(Object::Dictionary(dict)) = doc.trailer.get_mut(b"Info") {
                    dict.set(INFO_KEY, value);
                } else {
                    let mut dict = Dictionary::new();
                    dict.set(INFO_KEY, value);
                    let id = doc.add_object(Object::Dictionary(dict));
                    doc.trailer.set("Info", Object::Reference(id));
                }
            }
        }

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| SealError::UnsupportedFormat {
                reason: format!("failed to rewrite PDF: {e}"),
            })?;
        Ok(out)
    }

    fn extract(&self, bytes: &[u8]) -> Option<String> {
        if let Some(block) = extract_from_info(bytes) {
            return Some(block);
        }
        // Documents sealed by older tooling carried the block as a
        // trailing comment; a raw scan still finds those.
        payload::find_block_in_bytes(bytes)
    }
}

fn extract_from_info(bytes: &[u8]) -> Option<String> {
    let doc = Document::load_mem(bytes).ok()?;
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    match info.get(INFO_KEY.as_bytes()).ok()? {
        Object::String(raw, _) => {
            payload::find_block(&String::from_utf8_lossy(raw)).map(str::to_owned)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{adapter_for, FormatHint};
    use crate::doctype::DocumentType;
    use crate::payload::ProvenancePayload;
    use lopdf::dictionary;

    /// Smallest structurally valid document lopdf will load back.
    pub(crate) fn minimal_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn block() -> String {
        payload::encode(&ProvenancePayload {
            owner_id_hash: "ab".repeat(32),
            document_type: DocumentType::DegreeCertificate,
            timestamp: 7,
            issuer: "unknown".into(),
            signature: "cd".repeat(32),
        })
    }

    #[test]
    fn embed_writes_info_dictionary_and_extract_reads_it() {
        let adapter = adapter_for(FormatHint::Pdf);
        let signed = adapter.embed(&minimal_pdf(), &block()).unwrap();
        assert_eq!(adapter.extract(&signed).unwrap(), block());
    }

    #[test]
    fn garbage_bytes_are_unsupported() {
        let adapter = adapter_for(FormatHint::Pdf);
        let err = adapter.embed(b"definitely not a pdf", &block()).unwrap_err();
        assert!(matches!(err, SealError::UnsupportedFormat { .. }));
    }

    #[test]
    fn extract_on_unsigned_pdf_is_none() {
        let adapter = adapter_for(FormatHint::Pdf);
        assert!(adapter.extract(&minimal_pdf()).is_none());
    }

    #[test]
    fn raw_scan_fallback_finds_trailing_comment_block() {
        // Legacy layout: block appended after the PDF body instead of in
        // the information dictionary.
        let mut legacy = minimal_pdf();
        legacy.extend_from_slice(format!("\n% {}\n", block()).as_bytes());

        let adapter = adapter_for(FormatHint::Pdf);
        assert_eq!(adapter.extract(&legacy).unwrap(), block());
    }

    #[test]
    fn embed_preserves_existing_info_entries() {
        let mut doc = Document::load_mem(&minimal_pdf()).unwrap();
        let mut info = Dictionary::new();
        info.set("Producer", Object::string_literal("typewriter"));
        let info_id = doc.add_object(Object::Dictionary(info));
        doc.trailer.set("Info", Object::Reference(info_id));
        let mut with_info = Vec::new();
        doc.save_to(&mut with_info).unwrap();

        let adapter = adapter_for(FormatHint::Pdf);
        let signed = adapter.embed(&with_info, &block()).unwrap();

        let reloaded = Document::load_mem(&signed).unwrap();
        let info_obj = match reloaded.trailer.get(b"Info").unwrap() {
            Object::Reference(id) => reloaded.get_object(*id).unwrap().as_dict().unwrap(),
            Object::Dictionary(dict) => dict,
            other => panic!("unexpected Info object: {other:?}"),
        };
        assert!(info_obj.get(b"Producer").is_ok());
        assert!(info_obj.get(INFO_KEY.as_bytes()).is_ok());
    }

    #[test]
    fn embed_merges_into_inline_info_dictionary() {
        let mut doc = Document::load_mem(&minimal_pdf()).unwrap();
        let mut info = Dictionary::new();
        info.set("Producer", Object::string_literal("typewriter"));
        doc.trailer.set("Info", Object::Dictionary(info));
        let mut with_info = Vec::new();
        doc.save_to(&mut with_info).unwrap();

        let adapter = adapter_for(FormatHint::Pdf);
        let signed = adapter.embed(&with_info, &block()).unwrap();
        assert_eq!(adapter.extract(&signed).unwrap(), block());

        let reloaded = Document::load_mem(&signed).unwrap();
        let info_obj = match reloaded.trailer.get(b"Info").unwrap() {
            Object::Reference(id) => reloaded.get_object(*id).unwrap().as_dict().unwrap(),
            Object::Dictionary(dict) => dict,
            other => panic!("unexpected Info object: {other:?}"),
        };
        assert!(info_obj.get(b"Producer").is_ok());
        assert!(info_obj.get(INFO_KEY.as_bytes()).is_ok());
    }
}
