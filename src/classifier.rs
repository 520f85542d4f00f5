use crate::constants::{
    DIRECT_TEXT_EXTENSIONS, LEGACY_PRESENTATION_EXTENSIONS, LEGACY_WORD_EXTENSIONS,
    NOTEBOOK_EXTENSIONS, PDF_EXTENSIONS, PRESENTATION_EXTENSIONS, RICH_TEXT_EXTENSIONS,
    SPREADSHEET_EXTENSIONS, WORD_PROCESSING_EXTENSIONS,
};
use std::fmt;

/// A class of binary document format sharing one extraction routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatFamily {
    WordProcessing,
    Spreadsheet,
    Presentation,
    Pdf,
    Notebook,
    RichText,
    LegacyWord,
    LegacyPresentation,
}

impl FormatFamily {
    pub const ALL: [FormatFamily; 8] = [
        FormatFamily::WordProcessing,
        FormatFamily::Spreadsheet,
        FormatFamily::Presentation,
        FormatFamily::Pdf,
        FormatFamily::Notebook,
        FormatFamily::RichText,
        FormatFamily::LegacyWord,
        FormatFamily::LegacyPresentation,
    ];

    /// Human readable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            FormatFamily::WordProcessing => "word-processing document",
            FormatFamily::Spreadsheet => "spreadsheet",
            FormatFamily::Presentation => "presentation",
            FormatFamily::Pdf => "PDF",
            FormatFamily::Notebook => "notebook",
            FormatFamily::RichText => "rich text",
            FormatFamily::LegacyWord => "legacy Word document",
            FormatFamily::LegacyPresentation => "legacy PowerPoint deck",
        }
    }

    /// Extensions (lowercase, without dot) belonging to this family
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FormatFamily::WordProcessing => WORD_PROCESSING_EXTENSIONS,
            FormatFamily::Spreadsheet => SPREADSHEET_EXTENSIONS,
            FormatFamily::Presentation => PRESENTATION_EXTENSIONS,
            FormatFamily::Pdf => PDF_EXTENSIONS,
            FormatFamily::Notebook => NOTEBOOK_EXTENSIONS,
            FormatFamily::RichText => RICH_TEXT_EXTENSIONS,
            FormatFamily::LegacyWord => LEGACY_WORD_EXTENSIONS,
            FormatFamily::LegacyPresentation => LEGACY_PRESENTATION_EXTENSIONS,
        }
    }
}

impl fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with a file, decided from its extension alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Bytes are decoded as text and passed through
    DirectText,
    /// Bytes are handed to the extractor for this family
    Extract(FormatFamily),
    /// File is skipped
    Unsupported,
}

/// Classify a file extension. Case-insensitive, a leading dot is ignored.
/// Total: every input maps to exactly one disposition.
pub fn classify(extension: &str) -> Disposition {
    let ext = extension.trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        return Disposition::Unsupported;
    }

    if DIRECT_TEXT_EXTENSIONS.contains(&ext.as_str()) {
        return Disposition::DirectText;
    }

    FormatFamily::ALL
        .iter()
        .find(|family| family.extensions().contains(&ext.as_str()))
        .map(|family| Disposition::Extract(*family))
        .unwrap_or(Disposition::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_direct_text() {
        assert_eq!(classify("txt"), Disposition::DirectText);
        assert_eq!(classify("md"), Disposition::DirectText);
        assert_eq!(classify("rs"), Disposition::DirectText);
        assert_eq!(classify("csv"), Disposition::DirectText);
    }

    #[test]
    fn test_classify_families() {
        assert_eq!(classify("docx"), Disposition::Extract(FormatFamily::WordProcessing));
        assert_eq!(classify("odt"), Disposition::Extract(FormatFamily::WordProcessing));
        assert_eq!(classify("xlsm"), Disposition::Extract(FormatFamily::Spreadsheet));
        assert_eq!(classify("pptx"), Disposition::Extract(FormatFamily::Presentation));
        assert_eq!(classify("pdf"), Disposition::Extract(FormatFamily::Pdf));
        assert_eq!(classify("ipynb"), Disposition::Extract(FormatFamily::Notebook));
        assert_eq!(classify("rtf"), Disposition::Extract(FormatFamily::RichText));
        assert_eq!(classify("doc"), Disposition::Extract(FormatFamily::LegacyWord));
        assert_eq!(classify("ppt"), Disposition::Extract(FormatFamily::LegacyPresentation));
    }

    #[test]
    fn test_classify_mixed_case_and_dot() {
        assert_eq!(classify("PDF"), Disposition::Extract(FormatFamily::Pdf));
        assert_eq!(classify(".Docx"), Disposition::Extract(FormatFamily::WordProcessing));
        assert_eq!(classify(".TXT"), Disposition::DirectText);
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(classify(""), Disposition::Unsupported);
        assert_eq!(classify("."), Disposition::Unsupported);
        assert_eq!(classify("exe"), Disposition::Unsupported);
        assert_eq!(classify("png"), Disposition::Unsupported);
    }

    #[test]
    fn test_family_tables_do_not_overlap() {
        for family in FormatFamily::ALL {
            for ext in family.extensions() {
                assert!(!DIRECT_TEXT_EXTENSIONS.contains(ext), "{ext} listed twice");
                assert_eq!(classify(ext), Disposition::Extract(family));
            }
        }
    }

    proptest! {
        #[test]
        fn classify_is_case_insensitive(ext in "[a-zA-Z0-9]{0,6}") {
            prop_assert_eq!(classify(&ext), classify(&ext.to_uppercase()));
            prop_assert_eq!(classify(&ext), classify(&format!(".{ext}")));
        }

        #[test]
        fn classify_never_panics(ext in "\\PC*") {
            let _ = classify(&ext);
        }
    }
}
