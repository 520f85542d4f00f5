use crate::classifier::FormatFamily;
use crate::error::ExtractionError;
use crate::extractor::container::{self, DRAWINGML, OPENDOCUMENT};
use crate::extractor::Extractor;

/// Presentation decks: PPTX slide parts or the ODP `content.xml`
pub struct PresentationExtractor;

impl PresentationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// `ppt/slides/slide12.xml` -> 12
    fn slide_number(name: &str) -> Option<u32> {
        name.strip_prefix("ppt/slides/slide")?
            .strip_suffix(".xml")?
            .parse()
            .ok()
    }
}

impl Default for PresentationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PresentationExtractor {
    fn family(&self) -> FormatFamily {
        FormatFamily::Presentation
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = container::open_archive(bytes)?;

        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| Self::slide_number(name).map(|n| (n, name.to_string())))
            .collect();
        slides.sort();

        if !slides.is_empty() {
            let mut texts = Vec::with_capacity(slides.len());
            for (_, name) in &slides {
                let xml = container::read_entry(&mut archive, name)?;
                let paragraphs = container::collect_paragraphs(&xml, name, &DRAWINGML)?;
                let slide: Vec<String> = paragraphs.into_iter().filter(|p| !p.is_empty()).collect();
                texts.push(slide.join("\n"));
            }
            return Ok(texts.join("\n\n"));
        }

        if container::has_entry(&archive, "content.xml") {
            let xml = container::read_entry(&mut archive, "content.xml")?;
            let paragraphs = container::collect_paragraphs(&xml, "content.xml", &OPENDOCUMENT)?;
            return Ok(paragraphs.join("\n"));
        }

        Err(ExtractionError::parse(
            "presentation",
            "archive has neither ppt/slides nor content.xml",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::container::tests::build_zip;

    fn slide(text: &str) -> String {
        format!(
            r#"<p:sld><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
        )
    }

    #[test]
    fn test_slide_number() {
        assert_eq!(PresentationExtractor::slide_number("ppt/slides/slide3.xml"), Some(3));
        assert_eq!(PresentationExtractor::slide_number("ppt/slides/_rels/slide3.xml.rels"), None);
        assert_eq!(PresentationExtractor::slide_number("ppt/slideLayouts/slideLayout1.xml"), None);
    }

    #[test]
    fn test_pptx_slides_in_numeric_order() {
        let (one, two, ten) = (slide("Intro"), slide("Agenda"), slide("Questions"));
        let bytes = build_zip(&[
            ("ppt/slides/slide10.xml", ten.as_str()),
            ("ppt/slides/slide2.xml", two.as_str()),
            ("ppt/slides/slide1.xml", one.as_str()),
            ("ppt/slides/_rels/slide1.xml.rels", "<Relationships/>"),
        ]);

        let text = PresentationExtractor::new().extract(&bytes).unwrap();
        assert_eq!(text, "Intro\n\nAgenda\n\nQuestions");
    }

    #[test]
    fn test_odp_content() {
        let bytes = build_zip(&[(
            "content.xml",
            r#"<office:document-content><office:body><office:presentation><draw:page><draw:frame><draw:text-box><text:p>Roadmap</text:p></draw:text-box></draw:frame></draw:page></office:presentation></office:body></office:document-content>"#,
        )]);

        let text = PresentationExtractor::new().extract(&bytes).unwrap();
        assert_eq!(text, "Roadmap");
    }

    #[test]
    fn test_not_a_presentation() {
        let bytes = build_zip(&[("word/document.xml", "<w:document/>")]);
        assert!(PresentationExtractor::new().extract(&bytes).is_err());
    }
}
