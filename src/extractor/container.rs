//! Helpers shared by the zip-based office formats (OOXML and OpenDocument).

use crate::error::ExtractionError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Upper bound for a single run of repeated spaces (`text:s text:c="N"`)
const MAX_SPACE_RUN: usize = 1024;

/// Which XML elements delimit paragraphs, text runs and inline breaks
pub struct ParagraphRules {
    pub paragraphs: &'static [&'static [u8]],
    /// When set, only character data inside this element is collected
    pub text_run: Option<&'static [u8]>,
    pub line_breaks: &'static [&'static [u8]],
    pub tabs: &'static [&'static [u8]],
    /// Element standing for one or more spaces, with its count attribute
    pub spaces: Option<(&'static [u8], &'static [u8])>,
}

/// OpenDocument text (`content.xml` of .odt and .odp)
pub const OPENDOCUMENT: ParagraphRules = ParagraphRules {
    paragraphs: &[b"text:p", b"text:h"],
    text_run: None,
    line_breaks: &[b"text:line-break"],
    tabs: &[b"text:tab"],
    spaces: Some((b"text:s", b"text:c")),
};

/// DrawingML text bodies (PowerPoint slides)
pub const DRAWINGML: ParagraphRules = ParagraphRules {
    paragraphs: &[b"a:p"],
    text_run: Some(b"a:t"),
    line_breaks: &[b"a:br"],
    tabs: &[],
    spaces: None,
};

pub fn open_archive(bytes: &[u8]) -> Result<Archive<'_>, ExtractionError> {
    ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Archive(e.to_string()))
}

pub fn has_entry(archive: &Archive<'_>, name: &str) -> bool {
    archive.file_names().any(|entry| entry == name)
}

/// Read one archive member fully
pub fn read_entry(archive: &mut Archive<'_>, name: &str) -> Result<Vec<u8>, ExtractionError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ExtractionError::Archive(format!("{name}: {e}")))?;
    let mut content = Vec::new();
    entry.read_to_end(&mut content)?;
    Ok(content)
}

/// Walk an XML part and return the text of every paragraph, in document order.
/// Empty paragraphs are kept as empty strings.
pub fn collect_paragraphs(
    xml: &[u8],
    part: &str,
    rules: &ParagraphRules,
) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut run_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if rules.paragraphs.contains(&name) {
                    // nested paragraph (frames, notes): close the outer one first
                    if depth > 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    depth += 1;
                } else if Some(name) == rules.text_run {
                    run_depth += 1;
                }
            }
            Ok(Event::Empty(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if rules.paragraphs.contains(&name) {
                    if depth > 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraphs.push(String::new());
                } else if depth > 0 {
                    push_inline(&e, name, rules, &mut current);
                }
            }
            Ok(Event::Text(t)) => {
                if depth > 0 && (rules.text_run.is_none() || run_depth > 0) {
                    let text = t.unescape().map_err(|e| xml_error(part, e))?;
                    current.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if depth > 0 && (rules.text_run.is_none() || run_depth > 0) {
                    current.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if rules.paragraphs.contains(&name) && depth > 0 {
                    paragraphs.push(std::mem::take(&mut current));
                    depth -= 1;
                } else if Some(name) == rules.text_run {
                    run_depth = run_depth.saturating_sub(1);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_inline(element: &BytesStart<'_>, name: &[u8], rules: &ParagraphRules, current: &mut String) {
    if rules.line_breaks.contains(&name) {
        current.push('\n');
    } else if rules.tabs.contains(&name) {
        current.push('\t');
    } else if let Some((space, count_attr)) = rules.spaces {
        if name == space {
            let count = element
                .attributes()
                .flatten()
                .find(|attr| attr.key.as_ref() == count_attr)
                .and_then(|attr| std::str::from_utf8(&attr.value).ok()?.parse::<usize>().ok())
                .unwrap_or(1)
                .min(MAX_SPACE_RUN);
            current.extend(std::iter::repeat(' ').take(count));
        }
    }
}

fn xml_error(part: &str, err: impl std::fmt::Display) -> ExtractionError {
    ExtractionError::Xml {
        part: part.to_string(),
        reason: err.to_string(),
    }
}
