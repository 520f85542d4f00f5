use crate::classifier::FormatFamily;
use crate::config::Config;
use crate::error::SkipReason;
use crate::extractor::{Extractor, NotebookExtractor, RtfExtractor};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Registry of the extractors this build and this machine can run
pub struct ExtractorRegistry {
    extractors: HashMap<FormatFamily, Arc<dyn Extractor>>,
    unavailable: HashMap<FormatFamily, String>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            unavailable: HashMap::new(),
        }
    }

    /// Register every extractor available in this build, probing PATH for the
    /// legacy converters listed in the configuration
    pub fn detect(config: &Config) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(NotebookExtractor::new()));
        registry.register(Arc::new(RtfExtractor::new()));

        #[cfg(feature = "office")]
        {
            registry.register(Arc::new(crate::extractor::WordProcessingExtractor::new()));
            registry.register(Arc::new(crate::extractor::PresentationExtractor::new()));
        }
        #[cfg(not(feature = "office"))]
        {
            registry.mark_missing_feature(FormatFamily::WordProcessing, "office");
            registry.mark_missing_feature(FormatFamily::Presentation, "office");
        }

        #[cfg(feature = "spreadsheet")]
        registry.register(Arc::new(crate::extractor::SpreadsheetExtractor::new()));
        #[cfg(not(feature = "spreadsheet"))]
        registry.mark_missing_feature(FormatFamily::Spreadsheet, "spreadsheet");

        #[cfg(feature = "pdf")]
        registry.register(Arc::new(crate::extractor::PdfExtractor::new()));
        #[cfg(not(feature = "pdf"))]
        registry.mark_missing_feature(FormatFamily::Pdf, "pdf");

        #[cfg(feature = "legacy")]
        {
            registry.register_legacy(FormatFamily::LegacyWord, &config.legacy.doc_tools);
            registry.register_legacy(FormatFamily::LegacyPresentation, &config.legacy.ppt_tools);
        }
        #[cfg(not(feature = "legacy"))]
        {
            let _ = config;
            registry.mark_missing_feature(FormatFamily::LegacyWord, "legacy");
            registry.mark_missing_feature(FormatFamily::LegacyPresentation, "legacy");
        }

        registry
    }

    /// Register an extractor for its family, replacing any previous one
    pub fn register(&mut self, extractor: Arc<dyn Extractor>) {
        let family = extractor.family();
        self.unavailable.remove(&family);
        self.extractors.insert(family, extractor);
    }

    /// Record that a family cannot be converted and why
    pub fn mark_unavailable(&mut self, family: FormatFamily, reason: impl Into<String>) {
        let reason = reason.into();
        info!("{} extraction unavailable: {}", family, reason);
        self.extractors.remove(&family);
        self.unavailable.insert(family, reason);
    }

    /// Find the extractor for a family
    pub fn get(&self, family: FormatFamily) -> Result<Arc<dyn Extractor>, SkipReason> {
        if let Some(extractor) = self.extractors.get(&family) {
            return Ok(extractor.clone());
        }

        let reason = self
            .unavailable
            .get(&family)
            .cloned()
            .unwrap_or_else(|| "no extractor registered".to_string());
        Err(SkipReason::Unsupported(format!("{family}: {reason}")))
    }

    pub fn is_available(&self, family: FormatFamily) -> bool {
        self.extractors.contains_key(&family)
    }

    /// Families with a registered extractor, in declaration order
    pub fn available_families(&self) -> Vec<FormatFamily> {
        FormatFamily::ALL
            .into_iter()
            .filter(|family| self.is_available(*family))
            .collect()
    }

    #[allow(dead_code)]
    fn mark_missing_feature(&mut self, family: FormatFamily, feature: &str) {
        self.mark_unavailable(family, format!("built without the `{feature}` feature"));
    }

    #[cfg(feature = "legacy")]
    fn register_legacy(&mut self, family: FormatFamily, tools: &[String]) {
        match crate::extractor::LegacyExtractor::detect(family, tools) {
            Some(extractor) => self.register(Arc::new(extractor)),
            None => self.mark_unavailable(family, format!("none of {tools:?} found on PATH")),
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
