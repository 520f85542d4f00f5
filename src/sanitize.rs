use unicode_normalization::UnicodeNormalization;

/// Text decoded from raw bytes, with a flag telling whether invalid
/// sequences had to be replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub lossy: bool,
}

/// Decode file bytes as text. Honours UTF-8 and UTF-16 byte order marks,
/// otherwise assumes UTF-8 and replaces invalid sequences with U+FFFD.
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return decode_utf8(rest);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    decode_utf8(bytes)
}

fn decode_utf8(bytes: &[u8]) -> DecodedText {
    match std::str::from_utf8(bytes) {
        Ok(text) => DecodedText {
            text: text.to_string(),
            lossy: false,
        },
        Err(_) => DecodedText {
            text: String::from_utf8_lossy(bytes).into_owned(),
            lossy: true,
        },
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> DecodedText {
    let chunks = bytes.chunks_exact(2);
    let odd_tail = !chunks.remainder().is_empty();
    let units: Vec<u16> = chunks.map(|pair| to_unit([pair[0], pair[1]])).collect();

    let mut lossy = odd_tail;
    let mut text: String = char::decode_utf16(units)
        .map(|unit| {
            unit.unwrap_or_else(|_| {
                lossy = true;
                char::REPLACEMENT_CHARACTER
            })
        })
        .collect();
    if odd_tail {
        text.push(char::REPLACEMENT_CHARACTER);
    }

    DecodedText { text, lossy }
}

/// Normalize extracted text into clean, printable, NFC-normalized UTF-8.
///
/// Line endings become `\n`, control and invisible format characters are
/// dropped (newline and tab survive), exotic spaces become ASCII spaces,
/// the result is trimmed and finally composed to NFC. The function is total
/// and idempotent.
pub fn sanitize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                cleaned.push('\n');
            }
            '\n' | '\t' => cleaned.push(ch),
            '\u{2028}' | '\u{2029}' => cleaned.push('\n'),
            c if is_space_separator(c) => cleaned.push(' '),
            c if is_dropped(c) => {}
            c => cleaned.push(c),
        }
    }

    cleaned.trim().nfc().collect()
}

/// True for characters that survive sanitization unchanged
pub fn is_printable(ch: char) -> bool {
    matches!(ch, '\n' | '\t')
        || !(ch == '\r'
            || ch == '\u{2028}'
            || ch == '\u{2029}'
            || is_space_separator(ch)
            || is_dropped(ch))
}

fn is_space_separator(ch: char) -> bool {
    matches!(
        ch,
        '\u{00A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

fn is_dropped(ch: char) -> bool {
    ch.is_control() || is_invisible_format(ch) || is_noncharacter(ch)
}

fn is_invisible_format(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}'
            | '\u{200B}'
            | '\u{200E}'
            | '\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

fn is_noncharacter(ch: char) -> bool {
    let code = ch as u32;
    (0xFDD0..=0xFDEF).contains(&code) || (code & 0xFFFE) == 0xFFFE
}
