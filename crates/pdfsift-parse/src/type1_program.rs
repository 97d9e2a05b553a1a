//! Encoding extraction from embedded Type-1 font programs.
//!
//! A Type-1 `/FontFile` starts with a cleartext PostScript header before
//! the `eexec`-encrypted portion. When a font dictionary carries no
//! usable `/Encoding`, that header is the next-best source: it declares
//! the font's built-in encoding either as a predefined name
//! (`/Encoding StandardEncoding def`) or as an array filled with
//! `dup <code> /<glyphname> put` entries. Both forms can appear; both
//! are extracted.

/// Encoding information recovered from a Type-1 program header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedEncoding {
    /// Predefined encoding name, when declared (e.g. "StandardEncoding").
    pub base: Option<String>,
    /// Explicit `dup … put` assignments: (code, glyph name).
    pub assignments: Vec<(u32, String)>,
}

impl EmbeddedEncoding {
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.assignments.is_empty()
    }
}

/// Scan the cleartext header of a Type-1 font program for its
/// `/Encoding` declaration.
///
/// Only the portion before `eexec` is considered; the encrypted body
/// never contains encoding entries.
pub fn parse_type1_encoding(data: &[u8]) -> EmbeddedEncoding {
    let cleartext_len = find_subslice(data, b"eexec").unwrap_or(data.len());
    let text = String::from_utf8_lossy(&data[..cleartext_len]);

    let Some(enc_pos) = text.find("/Encoding") else {
        return EmbeddedEncoding::default();
    };
    let after = &text[enc_pos + "/Encoding".len()..];

    let mut result = EmbeddedEncoding::default();

    // Form 1: "/Encoding StandardEncoding def"
    let mut head = after.split_whitespace();
    if let (Some(first), Some(second)) = (head.next(), head.next()) {
        if second == "def" && first.chars().all(|c| c.is_ascii_alphanumeric()) {
            result.base = Some(first.to_string());
        }
    }

    // Form 2: "/Encoding 256 array … dup 65 /emdash put … readonly def"
    let mut tokens = after.split_whitespace().peekable();
    while let Some(token) = tokens.next() {
        match token {
            "dup" => {
                let Some(code) = tokens.next().and_then(|t| t.parse::<u32>().ok()) else {
                    continue;
                };
                let Some(name_token) = tokens.next() else {
                    break;
                };
                let Some(name) = name_token.strip_prefix('/') else {
                    continue;
                };
                if tokens.peek() == Some(&"put") {
                    tokens.next();
                    result.assignments.push((code, name.to_string()));
                }
            }
            // The encoding array ends here; stop before unrelated code.
            "readonly" | "def" if !result.assignments.is_empty() => break,
            _ => {}
        }
    }

    result
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
