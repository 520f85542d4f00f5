use std::path::{Path, PathBuf};

/// Get file extension from path (without the dot, lowercase)
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Hidden entries are the ones whose name starts with a dot
pub fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}

/// Build the output path for `relative_path`: same directories under
/// `output_root`, extension replaced by `output_extension`
pub fn mirrored_path(output_root: &Path, relative_path: &Path, output_extension: &str) -> PathBuf {
    output_root
        .join(relative_path)
        .with_extension(output_extension)
}
