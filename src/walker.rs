//! Directory traversal and the per-file conversion pipeline.
//!
//! Files are processed one at a time in file-name order. A failure on one
//! file is logged and recorded in the [`ConversionSummary`]; only problems
//! with the input or output roots abort the run.

use crate::classifier::{classify, Disposition};
use crate::config::ConversionConfig;
use crate::error::SkipReason;
use crate::extractor::ExtractorRegistry;
use crate::models::{ConversionSummary, FileOutcome, SourceFile};
use crate::sanitize::{decode_text, sanitize};
use crate::utils;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Converts every supported file below an input directory into text files
/// under an output directory
pub struct Converter {
    config: ConversionConfig,
    registry: ExtractorRegistry,
}

impl Converter {
    pub fn new(config: ConversionConfig, registry: ExtractorRegistry) -> Self {
        Self { config, registry }
    }

    /// Walk `input`, mirroring every converted file under `output`
    pub fn convert_tree(&self, input: &Path, output: &Path) -> Result<ConversionSummary> {
        if !input.exists() {
            bail!("Input directory does not exist: {}", input.display());
        }
        if !input.is_dir() {
            bail!("Input path is not a directory: {}", input.display());
        }
        std::fs::read_dir(input)
            .with_context(|| format!("Failed to read input directory: {}", input.display()))?;
        std::fs::create_dir_all(output)
            .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
        if same_directory(input, output) {
            bail!(
                "Output directory must differ from the input directory: {}",
                output.display()
            );
        }

        let excluded = nested_output_dir(input, output);
        if let Some(dir) = &excluded {
            debug!("Output directory {} is inside the input tree, skipping it", dir.display());
        }

        info!("Converting {} into {}", input.display(), output.display());

        let mut summary = ConversionSummary::default();
        let mut written_outputs: HashSet<PathBuf> = HashSet::new();

        let walker = WalkDir::new(input)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.should_visit(entry, excluded.as_deref()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error!("Failed to read directory entry: {}", e);
                    if let Some(path) = e.path() {
                        summary.record(path.to_path_buf(), FileOutcome::Failed(e.to_string()));
                    }
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let outcome = self.convert_entry(&entry, input, output);
            if let FileOutcome::Written(target) = &outcome {
                if !written_outputs.insert(target.clone()) {
                    warn!(
                        "{} overwrote {} written from an earlier file",
                        entry.path().display(),
                        target.display()
                    );
                }
            }
            summary.record(entry.path().to_path_buf(), outcome);
        }

        info!(
            "Done: {} written, {} skipped, {} failed",
            summary.written.len(),
            summary.skipped.len(),
            summary.failed.len()
        );

        Ok(summary)
    }

    fn should_visit(&self, entry: &DirEntry, excluded: Option<&Path>) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        if self.config.skip_hidden && utils::is_hidden(entry.file_name()) {
            debug!("Skipping hidden {}", entry.path().display());
            return false;
        }
        !excluded.is_some_and(|dir| entry.path() == dir)
    }

    fn convert_entry(&self, entry: &DirEntry, input_root: &Path, output_root: &Path) -> FileOutcome {
        let path = entry.path();
        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                error!("Failed to read metadata for {}: {}", path.display(), e);
                return FileOutcome::Failed(e.to_string());
            }
        };

        self.convert_file(path, size, input_root, output_root)
    }

    /// Run one file through size check, classification, extraction,
    /// sanitization and the mirrored write
    pub fn convert_file(
        &self,
        path: &Path,
        size: u64,
        input_root: &Path,
        output_root: &Path,
    ) -> FileOutcome {
        if size > self.config.max_file_size {
            let reason = SkipReason::SizeExceeded {
                size,
                limit: self.config.max_file_size,
            };
            info!("Skipping {}: {}", path.display(), reason);
            return FileOutcome::Skipped(reason);
        }

        let extension = utils::get_extension(path).unwrap_or_default();
        let disposition = classify(&extension);

        let extractor = match disposition {
            Disposition::Unsupported => {
                let label = if extension.is_empty() {
                    "no extension".to_string()
                } else {
                    format!(".{extension}")
                };
                let reason = SkipReason::Unsupported(label);
                info!("Skipping {}: {}", path.display(), reason);
                return FileOutcome::Skipped(reason);
            }
            Disposition::DirectText => None,
            Disposition::Extract(family) => match self.registry.get(family) {
                Ok(extractor) => Some(extractor),
                Err(reason) => {
                    info!("Skipping {}: {}", path.display(), reason);
                    return FileOutcome::Skipped(reason);
                }
            },
        };

        let file = match SourceFile::load(path, input_root) {
            Ok(file) => file,
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                return FileOutcome::Failed(format!("read failed: {e}"));
            }
        };

        let raw = match extractor {
            Some(extractor) => {
                let extracted =
                    panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(&file.bytes)));
                match extracted {
                    Ok(Ok(text)) => text,
                    Ok(Err(e)) => {
                        warn!("Failed to extract text from {}: {}", path.display(), e);
                        return FileOutcome::Failed(e.to_string());
                    }
                    Err(_) => {
                        warn!("Extractor panicked on {}", path.display());
                        let reason = format!("{} extractor panicked", extractor.family());
                        return FileOutcome::Failed(reason);
                    }
                }
            }
            None => {
                let decoded = decode_text(&file.bytes);
                if decoded.lossy {
                    debug!("Replaced invalid byte sequences in {}", path.display());
                }
                decoded.text
            }
        };

        let text = sanitize(&raw);
        if text.is_empty() {
            debug!("No text left in {}", path.display());
            return FileOutcome::Skipped(SkipReason::Empty);
        }

        let target =
            utils::mirrored_path(output_root, &file.relative_path, &self.config.output_extension);
        if let Err(e) = write_output(&target, &text) {
            error!("Failed to write {}: {}", target.display(), e);
            return FileOutcome::Failed(format!("write failed: {e}"));
        }

        debug!("Converted {} -> {}", path.display(), target.display());
        FileOutcome::Written(target)
    }
}

fn write_output(target: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, text)
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// The output directory as it appears while walking `input`, when it lives
/// inside the input tree
fn nested_output_dir(input: &Path, output: &Path) -> Option<PathBuf> {
    let input_abs = input.canonicalize().ok()?;
    let output_abs = output.canonicalize().ok()?;
    if output_abs == input_abs {
        return None;
    }
    output_abs
        .strip_prefix(&input_abs)
        .ok()
        .map(|relative| input.join(relative))
}
