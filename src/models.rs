use crate::error::SkipReason;
use crate::utils;
use std::path::{Path, PathBuf};

/// A file picked up by the walker, read exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Path relative to the input root
    pub relative_path: PathBuf,
    /// File extension (lowercase, without the dot)
    pub extension: Option<String>,
    /// File size in bytes
    pub size: u64,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Create a new SourceFile from already-loaded bytes
    pub fn new(path: PathBuf, relative_path: PathBuf, bytes: Vec<u8>) -> Self {
        let extension = utils::get_extension(&path);
        Self {
            path,
            relative_path,
            extension,
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Read a file below `root` from disk
    pub fn load(path: &Path, root: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let relative_path = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.file_name().map(PathBuf::from).unwrap_or_default());
        Ok(Self::new(path.to_path_buf(), relative_path, bytes))
    }
}

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Text was written to the given output path
    Written(PathBuf),
    /// File was intentionally left out
    Skipped(SkipReason),
    /// Reading, extracting or writing failed
    Failed(String),
}

/// Per-run record of every processed file
#[derive(Debug, Default, Clone)]
pub struct ConversionSummary {
    pub written: Vec<(PathBuf, PathBuf)>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
    pub failed: Vec<(PathBuf, String)>,
}

impl ConversionSummary {
    /// Record the outcome for a source path
    pub fn record(&mut self, source: PathBuf, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Written(output) => self.written.push((source, output)),
            FileOutcome::Skipped(reason) => self.skipped.push((source, reason)),
            FileOutcome::Failed(reason) => self.failed.push((source, reason)),
        }
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failed.len()
    }

    /// True when `source` ends with the given relative path and failed
    pub fn has_failure_for(&self, name: &str) -> bool {
        self.failed.iter().any(|(path, _)| path.ends_with(name))
    }
}
