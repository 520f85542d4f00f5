use crate::classifier::FormatFamily;
use crate::error::ExtractionError;
use crate::extractor::Extractor;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Binary Office 97-2003 documents converted by an external command-line tool
/// (antiword, catdoc, catppt...). The tool receives a file path and prints text.
pub struct LegacyExtractor {
    family: FormatFamily,
    tool: String,
}

impl LegacyExtractor {
    pub fn new(family: FormatFamily, tool: impl Into<String>) -> Self {
        Self {
            family,
            tool: tool.into(),
        }
    }

    /// Pick the first tool from `candidates` that is installed
    pub fn detect(family: FormatFamily, candidates: &[String]) -> Option<Self> {
        candidates
            .iter()
            .find(|tool| Self::check_command(tool))
            .map(|tool| {
                debug!("Using {} for {} files", tool, family);
                Self::new(family, tool.clone())
            })
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Check if a command is available, either as a path or on PATH
    fn check_command(cmd: &str) -> bool {
        let direct = Path::new(cmd);
        if direct.components().count() > 1 {
            return direct.is_file();
        }

        std::env::var_os("PATH")
            .map(|paths| {
                std::env::split_paths(&paths).any(|dir| {
                    dir.join(cmd).is_file() || dir.join(format!("{cmd}.exe")).is_file()
                })
            })
            .unwrap_or(false)
    }

    fn suffix(&self) -> &'static str {
        match self.family {
            FormatFamily::LegacyPresentation => ".ppt",
            _ => ".doc",
        }
    }
}

impl Extractor for LegacyExtractor {
    fn family(&self) -> FormatFamily {
        self.family
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // the converters only read from named files
        let mut input = tempfile::Builder::new()
            .prefix("file2txt-")
            .suffix(self.suffix())
            .tempfile()?;
        input.write_all(bytes)?;
        input.flush()?;

        let output = Command::new(&self.tool)
            .arg(input.path())
            .output()
            .map_err(|e| ExtractionError::Tool {
                tool: self.tool.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Tool {
                tool: self.tool.clone(),
                reason: format!("{} ({})", stderr.trim(), output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_missing_tools() {
        let candidates = vec!["file2txt-no-such-tool".to_string()];
        assert!(LegacyExtractor::detect(FormatFamily::LegacyWord, &candidates).is_none());
        assert!(LegacyExtractor::detect(FormatFamily::LegacyWord, &[]).is_none());
    }

    #[test]
    fn test_family_and_suffix() {
        let extractor = LegacyExtractor::new(FormatFamily::LegacyPresentation, "catppt");
        assert_eq!(extractor.family(), FormatFamily::LegacyPresentation);
        assert_eq!(extractor.suffix(), ".ppt");
        assert_eq!(extractor.tool(), "catppt");
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_through_tool() {
        // `cat` stands in for a converter that prints its input
        let extractor = LegacyExtractor::new(FormatFamily::LegacyWord, "cat");
        let text = extractor.extract(b"legacy body").unwrap();
        assert_eq!(text, "legacy body");
    }

    #[cfg(unix)]
    #[test]
    fn test_detect_finds_tool_on_path() {
        let candidates = vec!["file2txt-no-such-tool".to_string(), "sh".to_string()];
        let extractor = LegacyExtractor::detect(FormatFamily::LegacyWord, &candidates).unwrap();
        assert_eq!(extractor.tool(), "sh");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_is_an_error() {
        let extractor = LegacyExtractor::new(FormatFamily::LegacyWord, "false");
        let err = extractor.extract(b"anything").unwrap_err();
        assert!(matches!(err, ExtractionError::Tool { .. }));
    }

    #[test]
    fn test_missing_tool_is_an_error() {
        let extractor = LegacyExtractor::new(FormatFamily::LegacyWord, "file2txt-no-such-tool");
        assert!(extractor.extract(b"anything").is_err());
    }
}
