//! ToUnicode CMap parsing.
//!
//! Parses the `/ToUnicode` stream of a font into a character-code →
//! Unicode-string map. Handles `begincodespacerange`, `beginbfchar`
//! (single mappings), and `beginbfrange` (ranged mappings with either a
//! numeric destination offset or an explicit per-offset destination
//! array). Destinations are UTF-16BE.
//!
//! The code byte width is not declared anywhere in the font dictionary;
//! it is inferred empirically from the hex-token lengths of the
//! codespace ranges (falling back to the source codes of bfchar/bfrange
//! entries). Composite fonts commonly use 2-byte codes.

use std::collections::HashMap;

use crate::error::BackendError;

/// A parsed ToUnicode CMap.
#[derive(Debug, Clone)]
pub struct ToUnicodeCMap {
    mappings: HashMap<u32, String>,
    /// Inferred code width in bytes, when any entry revealed one.
    code_byte_len: Option<usize>,
}

impl ToUnicodeCMap {
    /// Parse a CMap from its raw (already filter-decoded) bytes.
    pub fn parse(data: &[u8]) -> Result<Self, BackendError> {
        let text = String::from_utf8_lossy(data);
        let mut mappings = HashMap::new();
        let mut byte_len: Option<usize> = None;

        for section in find_sections(&text, "begincodespacerange", "endcodespacerange") {
            for line in section.lines() {
                for hex in hex_tokens(line) {
                    note_byte_len(&mut byte_len, hex);
                }
            }
        }

        for section in find_sections(&text, "beginbfchar", "endbfchar") {
            parse_bfchar_section(section, &mut mappings, &mut byte_len)?;
        }

        for section in find_sections(&text, "beginbfrange", "endbfrange") {
            parse_bfrange_section(section, &mut mappings, &mut byte_len)?;
        }

        Ok(ToUnicodeCMap {
            mappings,
            code_byte_len: byte_len,
        })
    }

    /// Unicode string for a character code, if mapped.
    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.mappings.get(&code).map(|s| s.as_str())
    }

    /// All mappings, for overlaying onto a resolved encoding.
    pub fn mappings(&self) -> &HashMap<u32, String> {
        &self.mappings
    }

    /// Inferred code width in bytes (1 or 2), when detectable.
    pub fn byte_len(&self) -> Option<usize> {
        self.code_byte_len
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// All `begin…end` section bodies in order of appearance.
fn find_sections<'a>(text: &'a str, begin: &str, end: &str) -> Vec<&'a str> {
    let mut sections = Vec::new();
    let mut search_from = 0;
    while let Some(start) = text[search_from..].find(begin) {
        let body_start = search_from + start + begin.len();
        match text[body_start..].find(end) {
            Some(len) => {
                sections.push(&text[body_start..body_start + len]);
                search_from = body_start + len + end.len();
            }
            None => break,
        }
    }
    sections
}

/// Record the byte width a source hex token implies, keeping the widest.
fn note_byte_len(byte_len: &mut Option<usize>, hex: &str) {
    let width = hex.len().div_ceil(2);
    if width >= 1 {
        *byte_len = Some(byte_len.map_or(width, |w| w.max(width)));
    }
}

/// All `<hex>` tokens in a line.
fn hex_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        match rest[start + 1..].find('>') {
            Some(end) => {
                tokens.push(&rest[start + 1..start + 1 + end]);
                rest = &rest[start + 1 + end + 1..];
            }
            None => break,
        }
    }
    tokens
}

fn parse_hex_code(hex: &str) -> Result<u32, BackendError> {
    u32::from_str_radix(hex, 16)
        .map_err(|e| BackendError::Parse(format!("invalid hex code '{hex}': {e}")))
}

/// Decode a hex destination token as UTF-16BE.
///
/// Destinations are sequences of 16-bit code units: one unit for BMP
/// characters, surrogate pairs for supplementary characters, several
/// units for multi-character mappings (ligatures). A bare 2-digit token
/// is padded to a single unit.
fn decode_utf16be_hex(hex: &str) -> Result<String, BackendError> {
    if hex.len() == 2 {
        let padded = format!("00{hex}");
        return decode_utf16be_hex(&padded);
    }
    if hex.len() % 4 != 0 {
        return Err(BackendError::Parse(format!(
            "UTF-16BE destination '{hex}' has invalid length {}",
            hex.len()
        )));
    }

    let mut units = Vec::with_capacity(hex.len() / 4);
    for chunk in hex.as_bytes().chunks(4) {
        let chunk = std::str::from_utf8(chunk)
            .map_err(|e| BackendError::Parse(format!("invalid UTF-8 in hex token: {e}")))?;
        let unit = u16::from_str_radix(chunk, 16)
            .map_err(|e| BackendError::Parse(format!("invalid hex unit '{chunk}': {e}")))?;
        units.push(unit);
    }

    String::from_utf16(&units)
        .map_err(|e| BackendError::Parse(format!("invalid UTF-16BE sequence '{hex}': {e}")))
}

/// `<src> <dst>` per line.
fn parse_bfchar_section(
    section: &str,
    mappings: &mut HashMap<u32, String>,
    byte_len: &mut Option<usize>,
) -> Result<(), BackendError> {
    for line in section.lines() {
        let tokens = hex_tokens(line);
        if tokens.len() >= 2 {
            note_byte_len(byte_len, tokens[0]);
            let src = parse_hex_code(tokens[0])?;
            let dst = decode_utf16be_hex(tokens[1])?;
            mappings.insert(src, dst);
        }
    }
    Ok(())
}

/// `<low> <high> <dstStart>` or `<low> <high> [<dst> <dst> …]` per line.
fn parse_bfrange_section(
    section: &str,
    mappings: &mut HashMap<u32, String>,
    byte_len: &mut Option<usize>,
) -> Result<(), BackendError> {
    for line in section.lines() {
        let trimmed = line.trim();
        if !trimmed.contains('<') {
            continue;
        }

        if let Some(bracket) = trimmed.find('[') {
            let src_tokens = hex_tokens(&trimmed[..bracket]);
            if src_tokens.len() < 2 {
                continue;
            }
            note_byte_len(byte_len, src_tokens[0]);
            let low = parse_hex_code(src_tokens[0])?;
            let high = parse_hex_code(src_tokens[1])?;

            let bracket_end = trimmed.rfind(']').unwrap_or(trimmed.len());
            let dst_tokens = hex_tokens(&trimmed[bracket + 1..bracket_end]);
            for (i, dst_hex) in dst_tokens.iter().enumerate() {
                let code = low + i as u32;
                if code > high {
                    break;
                }
                mappings.insert(code, decode_utf16be_hex(dst_hex)?);
            }
        } else {
            let tokens = hex_tokens(trimmed);
            if tokens.len() < 3 {
                continue;
            }
            note_byte_len(byte_len, tokens[0]);
            let low = parse_hex_code(tokens[0])?;
            let high = parse_hex_code(tokens[1])?;
            let dst_start = parse_hex_code(tokens[2])?;
            for offset in 0..=high.saturating_sub(low) {
                if let Some(ch) = char::from_u32(dst_start + offset) {
                    mappings.insert(low + offset, ch.to_string());
                }
            }
        }
    }
    Ok(())
}
