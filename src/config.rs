use crate::constants::{
    DEFAULT_ARCHIVE_NAME, DEFAULT_LEGACY_DOC_TOOLS, DEFAULT_LEGACY_PPT_TOOLS,
    DEFAULT_MAX_FILE_SIZE, DEFAULT_OUTPUT_EXTENSION,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub legacy: LegacyToolsConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Settings handed to the walker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Files larger than this many bytes are skipped
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Skip files and directories whose name starts with a dot
    #[serde(default = "default_skip_hidden")]
    pub skip_hidden: bool,
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

/// External converters for the binary Office 97-2003 formats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyToolsConfig {
    #[serde(default = "default_doc_tools")]
    pub doc_tools: Vec<String>,
    #[serde(default = "default_ppt_tools")]
    pub ppt_tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_archive_name")]
    pub name: String,
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_skip_hidden() -> bool {
    true
}

fn default_output_extension() -> String {
    DEFAULT_OUTPUT_EXTENSION.to_string()
}

fn default_doc_tools() -> Vec<String> {
    DEFAULT_LEGACY_DOC_TOOLS.iter().map(|s| s.to_string()).collect()
}

fn default_ppt_tools() -> Vec<String> {
    DEFAULT_LEGACY_PPT_TOOLS.iter().map(|s| s.to_string()).collect()
}

fn default_archive_name() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            skip_hidden: default_skip_hidden(),
            output_extension: default_output_extension(),
        }
    }
}

impl Default for LegacyToolsConfig {
    fn default() -> Self {
        Self {
            doc_tools: default_doc_tools(),
            ppt_tools: default_ppt_tools(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            name: default_archive_name(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Load configuration from the first default location that exists, or return defaults
    pub fn load() -> Result<Self> {
        for path in Self::default_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    fn default_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("file2txt.toml"),
            PathBuf::from("config/file2txt.toml"),
            PathBuf::from(shellexpand::tilde("~/.config/file2txt/settings.toml").into_owned()),
        ]
    }
}
