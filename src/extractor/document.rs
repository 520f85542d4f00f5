use crate::classifier::FormatFamily;
use crate::error::ExtractionError;
use crate::extractor::container::{self, OPENDOCUMENT};
use crate::extractor::Extractor;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table};
use tracing::debug;

/// Word-processing documents: DOCX through docx-rs, ODT through its `content.xml`
pub struct WordProcessingExtractor;

impl WordProcessingExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WordProcessingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for WordProcessingExtractor {
    fn family(&self) -> FormatFamily {
        FormatFamily::WordProcessing
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = container::open_archive(bytes)?;

        if container::has_entry(&archive, "word/document.xml") {
            return extract_docx(bytes);
        }

        if container::has_entry(&archive, "content.xml") {
            debug!("Reading OpenDocument text body");
            let xml = container::read_entry(&mut archive, "content.xml")?;
            let paragraphs = container::collect_paragraphs(&xml, "content.xml", &OPENDOCUMENT)?;
            return Ok(paragraphs.join("\n"));
        }

        Err(ExtractionError::parse(
            "word-processing document",
            "archive has neither word/document.xml nor content.xml",
        ))
    }
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::parse("DOCX", e))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => lines.extend(table_rows(table)),
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        match child {
            ParagraphChild::Run(run) => push_run(run, &mut text),
            ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let ParagraphChild::Run(run) = inner {
                        push_run(run, &mut text);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run(run: &Run, output: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => output.push_str(&text.text),
            RunChild::Tab(_) => output.push('\t'),
            RunChild::Break(_) => output.push('\n'),
            _ => {}
        }
    }
}

/// One line per table row, cells separated by ` | `
fn table_rows(table: &Table) -> Vec<String> {
    let mut rows = Vec::new();
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(tr) = row;
        let cells: Vec<String> = tr
            .cells
            .iter()
            .map(|cell| {
                let docx_rs::TableRowChild::TableCell(tc) = cell;
                tc.children
                    .iter()
                    .filter_map(|content| match content {
                        docx_rs::TableCellContent::Paragraph(paragraph) => {
                            Some(paragraph_text(paragraph))
                        }
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells.join(" | "));
    }
    rows
}
