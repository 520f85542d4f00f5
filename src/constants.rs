/// Constants used throughout file2txt
/// This module centralizes extension tables and defaults

/// Extensions whose bytes are already text and are passed straight to the sanitizer
pub const DIRECT_TEXT_EXTENSIONS: &[&str] = &[
    // Prose and markup
    "txt", "text", "md", "markdown", "rst", "tex",
    "html", "htm", "xml", "css", "scss",
    // Data and configuration
    "json", "csv", "tsv", "log", "yaml", "yml", "toml", "ini", "cfg", "conf", "sql",
    // Shell and scripting
    "sh", "bash", "zsh", "cmd", "bat", "ps1",
    "py", "pl", "rb", "php", "lua", "r",
    // Compiled languages
    "js", "jsx", "ts", "tsx", "swift", "kt", "go", "rs", "m", "vb", "cs",
    "java", "c", "h", "cpp", "hpp", "asm", "dart",
];

/// Word-processing documents (Office Open XML and OpenDocument)
pub const WORD_PROCESSING_EXTENSIONS: &[&str] = &["docx", "odt"];

/// Spreadsheet workbooks
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "ods"];

/// Presentation decks
pub const PRESENTATION_EXTENSIONS: &[&str] = &["pptx", "odp"];

pub const PDF_EXTENSIONS: &[&str] = &["pdf"];

pub const NOTEBOOK_EXTENSIONS: &[&str] = &["ipynb"];

pub const RICH_TEXT_EXTENSIONS: &[&str] = &["rtf"];

/// Binary Word 97-2003 documents
pub const LEGACY_WORD_EXTENSIONS: &[&str] = &["doc"];

/// Binary PowerPoint 97-2003 decks
pub const LEGACY_PRESENTATION_EXTENSIONS: &[&str] = &["ppt"];

/// Files larger than this are skipped (5 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Extension given to every converted file
pub const DEFAULT_OUTPUT_EXTENSION: &str = "txt";

/// Archive name used when `--zip` is passed without a value
pub const DEFAULT_ARCHIVE_NAME: &str = "converted_files.zip";

/// External converters tried, in order, for `.doc` files
pub const DEFAULT_LEGACY_DOC_TOOLS: &[&str] = &["antiword", "catdoc"];

/// External converters tried, in order, for `.ppt` files
pub const DEFAULT_LEGACY_PPT_TOOLS: &[&str] = &["catppt"];
