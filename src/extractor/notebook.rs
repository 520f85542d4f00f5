use crate::classifier::FormatFamily;
use crate::error::ExtractionError;
use crate::extractor::Extractor;
use serde::Deserialize;

/// Jupyter notebooks: the source of every cell, in order
pub struct NotebookExtractor;

#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    #[serde(default)]
    source: CellSource,
}

/// nbformat allows either a single string or a list of lines
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
    #[default]
    Missing,
}

impl CellSource {
    fn into_text(self) -> String {
        match self {
            CellSource::Text(text) => text,
            CellSource::Lines(lines) => lines.concat(),
            CellSource::Missing => String::new(),
        }
    }
}

impl NotebookExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NotebookExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for NotebookExtractor {
    fn family(&self) -> FormatFamily {
        FormatFamily::Notebook
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let notebook: Notebook =
            serde_json::from_slice(bytes).map_err(|e| ExtractionError::parse("notebook", e))?;

        let cells: Vec<String> = notebook
            .cells
            .into_iter()
            .map(|cell| cell.source.into_text())
            .collect();

        Ok(cells.join("\n"))
    }
}
