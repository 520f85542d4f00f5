use crate::classifier::FormatFamily;
use crate::error::ExtractionError;

/// Trait for text extractors, one implementation per format family
pub trait Extractor: Send + Sync {
    /// Family of formats this extractor understands
    fn family(&self) -> FormatFamily;

    /// Recover all textual content from the raw file bytes
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}
