//! Layered font encoding resolution.
//!
//! Builds, per font, the single [`ResolvedEncoding`] that turns raw
//! content-stream byte codes into Unicode text. Sources are merged with
//! explicit precedence — each later layer overlays the previous one:
//!
//! 1. a named base encoding (`/Encoding` or `/Encoding./BaseEncoding`)
//! 2. the embedded Type-1 font program's built-in encoding (only when
//!    layer 1 produced nothing), including the single-glyph `/CharSet`
//!    shortcut
//! 3. the `/ToUnicode` CMap, which also fixes the code byte width
//! 4. a StandardEncoding guess when everything above came up empty
//! 5. the `/Differences` array — always last, so it wins even over
//!    ToUnicode
//!
//! `Identity-H` is recognized as an encoding name but leaves the byte
//! width at its default; the ToUnicode CMap supplies the real width for
//! the composite fonts that use it.

use std::collections::HashMap;

use pdfsift_core::{PredefinedEncoding, glyph_name_to_char};

use crate::cmap::ToUnicodeCMap;
use crate::objects::{decode_stream, dict_get, name_to_string, object_to_i64, resolve_ref};
use crate::type1_program::parse_type1_encoding;

/// The merged character-code → Unicode map for one font.
///
/// "Unset" (no entry) is distinct from an explicitly empty mapping; the
/// placeholder-escape fallback fires only for unset codes.
#[derive(Debug, Clone)]
pub struct ResolvedEncoding {
    map: HashMap<u32, String>,
    byte_len: usize,
}

impl ResolvedEncoding {
    /// An empty 1-byte encoding.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
            byte_len: 1,
        }
    }

    /// Code width in bytes used to chunk raw strings (1 or 2).
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Unicode text for a character code, if mapped.
    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.map.get(&code).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    fn overlay_predefined(&mut self, encoding: PredefinedEncoding) {
        for (code, entry) in encoding.table().iter().enumerate() {
            if let Some(ch) = entry {
                self.map.insert(code as u32, ch.to_string());
            }
        }
    }

    fn overlay_glyph_name(&mut self, code: u32, name: &str) {
        if let Some(ch) = glyph_name_to_char(name) {
            self.map.insert(code, ch.to_string());
        } else {
            debug_log!("unresolvable glyph name '{name}' for code {code}");
        }
    }
}

/// Build the resolved encoding for a font dictionary.
pub(crate) fn resolve_encoding(
    doc: &lopdf::Document,
    font_dict: &lopdf::Dictionary,
) -> ResolvedEncoding {
    let mut enc = ResolvedEncoding::empty();
    let mut differences: Vec<(u32, String)> = Vec::new();

    // Layer 1: named base encoding
    if let Some(obj) = dict_get(doc, font_dict, b"Encoding") {
        match obj {
            lopdf::Object::Name(bytes) => {
                let name = String::from_utf8_lossy(bytes);
                if let Some(predefined) = PredefinedEncoding::from_name(&name) {
                    enc.overlay_predefined(predefined);
                } else if name == "Identity-H" || name == "Identity-V" {
                    // Byte width deliberately left at the default here;
                    // the ToUnicode layer sets it when a CMap is present.
                    debug_log!("font uses {name} encoding");
                } else {
                    debug_log!("unrecognized encoding name '{name}'");
                }
            }
            lopdf::Object::Dictionary(enc_dict) => {
                if let Some(base) = enc_dict
                    .get(b"BaseEncoding")
                    .ok()
                    .and_then(name_to_string)
                    .and_then(|n| PredefinedEncoding::from_name(&n))
                {
                    enc.overlay_predefined(base);
                }
                if let Ok(diff_obj) = enc_dict.get(b"Differences") {
                    let diff_obj = resolve_ref(doc, diff_obj);
                    if let Ok(arr) = diff_obj.as_array() {
                        differences = parse_differences(arr);
                    }
                }
            }
            _ => {}
        }
    }

    // Layer 2: embedded font program (only when nothing mapped yet)
    if enc.is_empty() {
        apply_font_program_encoding(doc, font_dict, &mut enc);
    }

    // Layer 3: ToUnicode CMap
    if let Some(cmap) = load_to_unicode(doc, font_dict) {
        for (&code, text) in cmap.mappings() {
            enc.map.insert(code, text.clone());
        }
        if let Some(width) = cmap.byte_len() {
            enc.byte_len = width;
        }
    }

    // Layer 4: low-confidence default
    if enc.is_empty() {
        debug_log!("no encoding source found; falling back to StandardEncoding");
        enc.overlay_predefined(PredefinedEncoding::Standard);
    }

    // Layer 5: Differences always win
    for (code, name) in &differences {
        enc.overlay_glyph_name(*code, name);
    }

    enc
}

/// Expand a `/Differences` array into (code, glyph name) pairs.
///
/// A number resets the running character code; each following name is
/// assigned to that code and increments it.
fn parse_differences(arr: &[lopdf::Object]) -> Vec<(u32, String)> {
    let mut result = Vec::new();
    let mut code: Option<u32> = None;
    for obj in arr {
        match obj {
            lopdf::Object::Integer(i) if *i >= 0 => code = Some(*i as u32),
            lopdf::Object::Name(name) => {
                if let Some(c) = code {
                    result.push((c, String::from_utf8_lossy(name).into_owned()));
                    code = Some(c + 1);
                }
            }
            _ => {}
        }
    }
    result
}

/// Layer 2: mine the FontDescriptor for encoding information.
fn apply_font_program_encoding(
    doc: &lopdf::Document,
    font_dict: &lopdf::Dictionary,
    enc: &mut ResolvedEncoding,
) {
    let Some(descriptor) = dict_get(doc, font_dict, b"FontDescriptor").and_then(|o| o.as_dict().ok())
    else {
        return;
    };

    // Shortcut: a one-glyph font declares its single glyph in /CharSet.
    let first_char = font_dict.get(b"FirstChar").ok().and_then(object_to_i64);
    let last_char = font_dict.get(b"LastChar").ok().and_then(object_to_i64);
    if let (Some(first), Some(last)) = (first_char, last_char) {
        if first == last && first >= 0 {
            if let Some(name) = single_charset_glyph(descriptor) {
                enc.overlay_glyph_name(first as u32, &name);
                return;
            }
        }
    }

    // Otherwise scan the embedded Type-1 program's cleartext header.
    let Some(font_file) = dict_get(doc, descriptor, b"FontFile").and_then(|o| o.as_stream().ok())
    else {
        return;
    };
    let Ok(program) = decode_stream(font_file) else {
        return;
    };

    let embedded = parse_type1_encoding(&program);
    if let Some(base) = embedded
        .base
        .as_deref()
        .and_then(PredefinedEncoding::from_name)
    {
        enc.overlay_predefined(base);
    }
    for (code, name) in &embedded.assignments {
        enc.overlay_glyph_name(*code, name);
    }
}

/// The glyph name from a `/CharSet` naming exactly one glyph.
fn single_charset_glyph(descriptor: &lopdf::Dictionary) -> Option<String> {
    let charset = match descriptor.get(b"CharSet").ok()? {
        lopdf::Object::String(bytes, _) => String::from_utf8_lossy(bytes).into_owned(),
        lopdf::Object::Name(bytes) => format!("/{}", String::from_utf8_lossy(bytes)),
        _ => return None,
    };
    let mut names = charset
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let first = names.next()?;
    if names.next().is_some() {
        return None;
    }
    Some(first.to_string())
}

/// Parse the font's `/ToUnicode` stream, if any.
fn load_to_unicode(doc: &lopdf::Document, font_dict: &lopdf::Dictionary) -> Option<ToUnicodeCMap> {
    let stream = dict_get(doc, font_dict, b"ToUnicode")?.as_stream().ok()?;
    let data = decode_stream(stream).ok()?;
    ToUnicodeCMap::parse(&data).ok()
}
