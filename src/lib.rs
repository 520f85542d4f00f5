pub mod archive;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod models;
pub mod sanitize;
pub mod utils;
pub mod walker;

pub use classifier::{classify, Disposition, FormatFamily};
pub use config::{Config, ConversionConfig};
pub use error::{ExtractionError, SkipReason};
pub use extractor::{Extractor, ExtractorRegistry};
pub use models::{ConversionSummary, FileOutcome, SourceFile};
pub use sanitize::sanitize;
pub use walker::Converter;
