//! Rich Text Format reader.
//!
//! RTF is 7-bit text with control words, so it is read natively: groups are
//! tracked on a stack, ignorable destinations (font and colour tables,
//! stylesheets, document info, embedded pictures) are dropped and the
//! remaining character data is decoded.

use crate::classifier::FormatFamily;
use crate::error::ExtractionError;
use crate::extractor::Extractor;

/// Destinations whose content is never document text
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "object",
    "header",
    "footer",
    "headerl",
    "headerr",
    "footerl",
    "footerr",
    "listtable",
    "listoverridetable",
    "revtbl",
    "rsidtbl",
    "generator",
    "xmlnstbl",
    "themedata",
    "colorschememapping",
    "datastore",
    "latentstyles",
    "filetbl",
];

/// Windows-1252 code points for bytes 0x80..=0x9F
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{FFFD}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{FFFD}', '\u{017D}', '\u{FFFD}',
    '\u{FFFD}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{FFFD}', '\u{017E}', '\u{0178}',
];

pub struct RtfExtractor;

impl RtfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RtfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for RtfExtractor {
    fn family(&self) -> FormatFamily {
        FormatFamily::RichText
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let start = bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(bytes.len());
        if !bytes[start..].starts_with(b"{\\rtf") {
            return Err(ExtractionError::parse("RTF", "missing {\\rtf header"));
        }
        Ok(RtfReader::new(&bytes[start..]).read())
    }
}

#[derive(Debug, Clone, Copy)]
struct GroupState {
    skip: bool,
    /// Number of fallback characters following a `\uN`
    unicode_skip: usize,
}

struct RtfReader<'a> {
    input: &'a [u8],
    pos: usize,
    stack: Vec<GroupState>,
    state: GroupState,
    /// Fallback characters still to be swallowed after a `\uN`
    pending_skip: usize,
    /// True right after `{`, where a destination control word may appear
    group_start: bool,
    output: String,
}

impl<'a> RtfReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            stack: Vec::new(),
            state: GroupState {
                skip: false,
                unicode_skip: 1,
            },
            pending_skip: 0,
            group_start: false,
            output: String::new(),
        }
    }

    fn read(mut self) -> String {
        while let Some(&byte) = self.input.get(self.pos) {
            self.pos += 1;
            match byte {
                b'{' => {
                    self.stack.push(self.state);
                    self.group_start = true;
                    self.pending_skip = 0;
                    continue;
                }
                b'}' => {
                    if let Some(state) = self.stack.pop() {
                        self.state = state;
                    }
                    self.pending_skip = 0;
                }
                b'\\' => {
                    let at_group_start = self.group_start;
                    self.group_start = false;
                    self.control(at_group_start);
                    continue;
                }
                b'\r' | b'\n' => {}
                _ => self.emit(decode_byte(byte)),
            }
            self.group_start = false;
        }
        self.output
    }

    fn emit(&mut self, ch: char) {
        if self.pending_skip > 0 {
            self.pending_skip -= 1;
            return;
        }
        if !self.state.skip {
            self.output.push(ch);
        }
    }

    /// Emit text that is not subject to `\uN` fallback counting
    fn emit_str(&mut self, text: &str) {
        self.pending_skip = 0;
        if !self.state.skip {
            self.output.push_str(text);
        }
    }

    fn control(&mut self, at_group_start: bool) {
        let Some(&next) = self.input.get(self.pos) else {
            return;
        };

        if !next.is_ascii_alphabetic() {
            self.pos += 1;
            match next {
                b'\\' | b'{' | b'}' => self.emit(next as char),
                b'\'' => {
                    let hex = self.input.get(self.pos..self.pos + 2);
                    if let Some(value) = hex
                        .and_then(|h| std::str::from_utf8(h).ok())
                        .and_then(|h| u8::from_str_radix(h, 16).ok())
                    {
                        self.pos += 2;
                        self.emit(decode_byte(value));
                    }
                }
                b'*' => self.state.skip = true,
                b'~' => self.emit_str(" "),
                b'_' => self.emit_str("-"),
                b'\r' | b'\n' => self.emit_str("\n"),
                _ => {}
            }
            return;
        }

        let word_start = self.pos;
        while self.input.get(self.pos).is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let word = String::from_utf8_lossy(&self.input[word_start..self.pos]).into_owned();

        let param_start = self.pos;
        if self.input.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        while self.input.get(self.pos).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let param: Option<i32> = std::str::from_utf8(&self.input[param_start..self.pos])
            .ok()
            .and_then(|p| p.parse().ok());

        // a single space delimits the control word and is not text
        if self.input.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        if at_group_start && SKIPPED_DESTINATIONS.contains(&word.as_str()) {
            self.state.skip = true;
            return;
        }

        match word.as_str() {
            "par" | "line" | "sect" | "page" | "row" => self.emit_str("\n"),
            "tab" | "cell" => self.emit_str("\t"),
            "emdash" => self.emit_str("\u{2014}"),
            "endash" => self.emit_str("\u{2013}"),
            "bullet" => self.emit_str("\u{2022}"),
            "lquote" => self.emit_str("\u{2018}"),
            "rquote" => self.emit_str("\u{2019}"),
            "ldblquote" => self.emit_str("\u{201C}"),
            "rdblquote" => self.emit_str("\u{201D}"),
            "uc" => self.state.unicode_skip = param.unwrap_or(1).max(0) as usize,
            "u" => {
                if let Some(value) = param {
                    let code = (if value < 0 { value + 65536 } else { value }) as u32;
                    let ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                    self.emit_str(&ch.to_string());
                    self.pending_skip = self.state.unicode_skip;
                }
            }
            _ => {}
        }
    }
}

/// Map a single byte through Windows-1252
fn decode_byte(byte: u8) -> char {
    match byte {
        0x80..=0x9F => CP1252_HIGH[(byte - 0x80) as usize],
        _ => byte as char,
    }
}
