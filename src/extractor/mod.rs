pub mod notebook;
pub mod registry;
pub mod rtf;
pub mod r#trait;

#[cfg(feature = "office")]
pub mod container;
#[cfg(feature = "office")]
pub mod document;
#[cfg(feature = "legacy")]
pub mod legacy;
#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "office")]
pub mod presentation;
#[cfg(feature = "spreadsheet")]
pub mod spreadsheet;

pub use notebook::NotebookExtractor;
pub use r#trait::Extractor;
pub use registry::ExtractorRegistry;
pub use rtf::RtfExtractor;

#[cfg(feature = "office")]
pub use document::WordProcessingExtractor;
#[cfg(feature = "legacy")]
pub use legacy::LegacyExtractor;
#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;
#[cfg(feature = "office")]
pub use presentation::PresentationExtractor;
#[cfg(feature = "spreadsheet")]
pub use spreadsheet::SpreadsheetExtractor;
