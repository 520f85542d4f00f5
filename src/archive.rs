use crate::utils;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Bundle every converted file under `output_dir` into a zip archive placed
/// next to it. Entry names are relative to `output_dir` and use `/`.
pub fn zip_output_dir(output_dir: &Path, archive_name: &str, extension: &str) -> Result<PathBuf> {
    let archive_path = archive_location(output_dir, archive_name);
    let file = File::create(&archive_path)
        .with_context(|| format!("Failed to create archive: {}", archive_path.display()))?;

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut count = 0usize;

    for entry in WalkDir::new(output_dir).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to walk output directory: {}", output_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = utils::get_extension(entry.path())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }

        let relative = entry.path().strip_prefix(output_dir)?;
        let name = entry_name(relative);
        let content = std::fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;

        zip.start_file(name.as_str(), options)
            .with_context(|| format!("Failed to add {} to archive", name))?;
        zip.write_all(&content)?;
        debug!("Archived {}", name);
        count += 1;
    }

    zip.finish().context("Failed to finalize archive")?;
    info!("Wrote {} files to {}", count, archive_path.display());

    Ok(archive_path)
}

/// Archives go in the parent of the output directory
fn archive_location(output_dir: &Path, archive_name: &str) -> PathBuf {
    let absolute = output_dir
        .canonicalize()
        .unwrap_or_else(|_| output_dir.to_path_buf());
    match absolute.parent() {
        Some(parent) => parent.join(archive_name),
        None => absolute.join(archive_name),
    }
}

fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    #[test]
    fn test_zip_output_dir() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out");
        std::fs::create_dir_all(output.join("sub/dir")).unwrap();
        std::fs::write(output.join("top.txt"), "top").unwrap();
        std::fs::write(output.join("sub/dir/file.txt"), "nested").unwrap();
        std::fs::write(output.join("ignored.log"), "not text output").unwrap();

        let archive_path = zip_output_dir(&output, "bundle.zip", "txt").unwrap();
        assert_eq!(archive_path, dir.path().canonicalize().unwrap().join("bundle.zip"));

        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(names, vec!["sub/dir/file.txt", "top.txt"]);

        let mut content = String::new();
        archive
            .by_name("sub/dir/file.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "nested");
    }

    #[test]
    fn test_zip_extension_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out");
        std::fs::create_dir(&output).unwrap();
        std::fs::write(output.join("upper.TXT"), "upper").unwrap();
        std::fs::write(output.join("lower.txt"), "lower").unwrap();

        let archive_path = zip_output_dir(&output, "mixed.zip", "TXT").unwrap();
        let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_zip_empty_output_dir() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out");
        std::fs::create_dir(&output).unwrap();

        let archive_path = zip_output_dir(&output, "empty.zip", "txt").unwrap();
        let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_entry_name_uses_forward_slashes() {
        let relative: PathBuf = ["a", "b", "c.txt"].iter().collect();
        assert_eq!(entry_name(&relative), "a/b/c.txt");
    }
}
