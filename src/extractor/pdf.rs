use crate::classifier::FormatFamily;
use crate::error::ExtractionError;
use crate::extractor::Extractor;
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// PDF text extractor
/// Reads pages with lopdf and falls back to pdf-extract when lopdf recovers nothing
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PdfExtractor {
    fn family(&self) -> FormatFamily {
        FormatFamily::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // Both parsers are known to panic on some malformed files
        panic::catch_unwind(AssertUnwindSafe(|| extract_pdf_text(bytes)))
            .unwrap_or_else(|_| Err(ExtractionError::parse("PDF", "parser panicked on malformed input")))
    }
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::parse("PDF", e))?;

    let mut text_content = String::new();

    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text_content.push_str(&page_text);
                text_content.push('\n');
            }
            Err(e) => debug!("lopdf could not read page {}: {}", page_num, e),
        }
    }

    if !text_content.trim().is_empty() {
        return Ok(text_content);
    }

    debug!("lopdf recovered no text, trying pdf-extract");
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::parse("PDF", e))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a one-page PDF showing `text` in Helvetica
    pub(crate) fn build_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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

    #[test]
    fn test_pdf_extraction() {
        let bytes = build_pdf("Invoice #42");
        let text = PdfExtractor::new().extract(&bytes).unwrap();
        assert!(text.contains("Invoice #42"));
    }

    #[test]
    fn test_invalid_pdf() {
        let result = PdfExtractor::new().extract(b"%PDF-1.4 truncated garbage");
        assert!(result.is_err());
    }

    #[test]
    fn test_family() {
        assert_eq!(PdfExtractor::new().family(), FormatFamily::Pdf);
    }
}
