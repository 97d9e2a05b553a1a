//! Font abstraction over PDF font resources.
//!
//! A [`Font`] pairs a [`ResolvedEncoding`] (byte codes → Unicode) with a
//! width source, dispatched by [`FontKind`]: simple fonts measure by
//! character code through their `/Widths` table (or the core-14 AFM
//! fallback), composite fonts by CID through the descendant's `/W`
//! array. The shared [`FontCache`] guarantees at-most-once construction
//! per font object, so concurrent page renders reuse the same resolved
//! fonts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::encoding::{ResolvedEncoding, resolve_encoding};
use crate::error::BackendError;
use crate::objects::{dict_get, name_to_string, object_to_f64, object_to_i64, resolve_ref};
use crate::standard_fonts::core14_metrics;
use crate::widths::{CidWidths, SimpleWidths, parse_w_array};

/// Width-resolution data specific to the font variant.
#[derive(Debug, Clone)]
pub enum FontKind {
    /// Type1, TrueType, or Type3: widths keyed by character code.
    Simple(SimpleWidths),
    /// Type0 composite: widths keyed by CID.
    Composite(CidWidths),
}

/// A loaded, immutable font resource.
#[derive(Debug, Clone)]
pub struct Font {
    pub base_name: String,
    pub bold: bool,
    pub italic: bool,
    /// Ascent in 1/1000 em units.
    pub ascent: f64,
    /// Descent in 1/1000 em units (negative below the baseline).
    pub descent: f64,
    encoding: ResolvedEncoding,
    kind: FontKind,
}

impl Font {
    /// Load a font from its dictionary.
    ///
    /// Fails only when a simple font has no width source at all (no
    /// `/Widths`, and the base name is not a standard-14 font).
    pub fn load(doc: &lopdf::Document, font_dict: &lopdf::Dictionary) -> Result<Self, BackendError> {
        let raw_name = dict_get(doc, font_dict, b"BaseFont")
            .and_then(name_to_string)
            .unwrap_or_default();
        let base_name = strip_subset_prefix(&raw_name).to_string();

        if is_type0(font_dict) {
            Self::load_composite(doc, font_dict, base_name)
        } else {
            Self::load_simple(doc, font_dict, base_name)
        }
    }

    fn load_simple(
        doc: &lopdf::Document,
        font_dict: &lopdf::Dictionary,
        base_name: String,
    ) -> Result<Self, BackendError> {
        let descriptor = dict_get(doc, font_dict, b"FontDescriptor").and_then(|o| o.as_dict().ok());

        let first_char = font_dict
            .get(b"FirstChar")
            .ok()
            .and_then(object_to_i64)
            .unwrap_or(0)
            .max(0) as u32;

        let missing_width = descriptor
            .and_then(|d| d.get(b"MissingWidth").ok())
            .and_then(object_to_f64)
            .unwrap_or(0.0);

        let explicit_widths: Vec<f64> = dict_get(doc, font_dict, b"Widths")
            .and_then(|o| o.as_array().ok())
            .map(|arr| {
                arr.iter()
                    .map(|o| object_to_f64(resolve_ref(doc, o)).unwrap_or(0.0))
                    .collect()
            })
            .unwrap_or_default();

        let widths = if explicit_widths.is_empty() {
            match core14_metrics(&base_name) {
                Some(metrics) => SimpleWidths::from_core14(metrics),
                None => {
                    return Err(BackendError::Font(format!(
                        "font '{base_name}' has no /Widths and no built-in metrics"
                    )));
                }
            }
        } else {
            // Type 3 widths are in glyph space; scale them through the
            // font matrix into the usual 1/1000 em units.
            let scale = type3_scale(doc, font_dict);
            let widths = explicit_widths.into_iter().map(|w| w * scale).collect();
            SimpleWidths::new(widths, first_char, missing_width)
        };

        let (ascent, descent) = ascent_descent(descriptor);
        let (bold, italic) = detect_style(&base_name, descriptor);

        Ok(Font {
            base_name,
            bold,
            italic,
            ascent,
            descent,
            encoding: resolve_encoding(doc, font_dict),
            kind: FontKind::Simple(widths),
        })
    }

    fn load_composite(
        doc: &lopdf::Document,
        font_dict: &lopdf::Dictionary,
        base_name: String,
    ) -> Result<Self, BackendError> {
        let descendant = dict_get(doc, font_dict, b"DescendantFonts")
            .and_then(|o| o.as_array().ok())
            .and_then(|arr| arr.first())
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_dict().ok());

        let (widths, descriptor) = match descendant {
            Some(cid_dict) => {
                let default_width = cid_dict
                    .get(b"DW")
                    .ok()
                    .and_then(object_to_f64)
                    .unwrap_or(1000.0);
                let per_cid = dict_get(doc, cid_dict, b"W")
                    .and_then(|o| o.as_array().ok())
                    .map(|arr| parse_w_array(arr, doc))
                    .unwrap_or_default();
                let descriptor =
                    dict_get(doc, cid_dict, b"FontDescriptor").and_then(|o| o.as_dict().ok());
                (CidWidths::new(per_cid, default_width), descriptor)
            }
            None => {
                debug_log!("Type0 font '{base_name}' has no descendant font; using defaults");
                (CidWidths::new(HashMap::new(), 1000.0), None)
            }
        };

        let (ascent, descent) = ascent_descent(descriptor);
        let (bold, italic) = detect_style(&base_name, descriptor);

        Ok(Font {
            base_name,
            bold,
            italic,
            ascent,
            descent,
            encoding: resolve_encoding(doc, font_dict),
            kind: FontKind::Composite(widths),
        })
    }

    /// Code width in bytes used to chunk raw strings.
    pub fn byte_len(&self) -> usize {
        self.encoding.byte_len()
    }

    pub fn encoding(&self) -> &ResolvedEncoding {
        &self.encoding
    }

    pub fn kind(&self) -> &FontKind {
        &self.kind
    }

    /// Chunk raw string bytes into character codes.
    ///
    /// Returns the codes and whether the buffer length was not a
    /// multiple of the code width (the trailing short chunk is still
    /// decoded rather than silently dropped).
    pub fn char_codes(&self, bytes: &[u8]) -> (Vec<u32>, bool) {
        match self.encoding.byte_len() {
            2 => {
                let mut codes = Vec::with_capacity(bytes.len() / 2 + 1);
                let mut chunks = bytes.chunks_exact(2);
                for pair in &mut chunks {
                    codes.push((u32::from(pair[0]) << 8) | u32::from(pair[1]));
                }
                let remainder = chunks.remainder();
                let mismatch = !remainder.is_empty();
                if let Some(&last) = remainder.first() {
                    codes.push(u32::from(last));
                }
                (codes, mismatch)
            }
            _ => (bytes.iter().map(|&b| u32::from(b)).collect(), false),
        }
    }

    /// Decode character codes to Unicode text.
    ///
    /// Unmapped codes render as a `\u{hex}` escape, or are dropped when
    /// `skip_missing` is set.
    pub fn decode_codes(&self, codes: &[u32], skip_missing: bool) -> String {
        let mut out = String::new();
        for &code in codes {
            match self.encoding.lookup(code) {
                Some(text) => out.push_str(text),
                None if skip_missing => {}
                None => {
                    out.push_str(&format!("\\u{{{code:x}}}"));
                }
            }
        }
        out
    }

    /// Decode a raw byte string (chunking + mapping in one step).
    pub fn decode_string(&self, bytes: &[u8], skip_missing: bool) -> String {
        let (codes, _) = self.char_codes(bytes);
        self.decode_codes(&codes, skip_missing)
    }

    /// Total advance width of the given codes, in 1/1000 em units.
    pub fn measure_codes(&self, codes: &[u32]) -> f64 {
        codes
            .iter()
            .map(|&code| match &self.kind {
                FontKind::Simple(widths) => widths.get(code),
                FontKind::Composite(widths) => widths.get(code),
            })
            .sum()
    }

    /// Total advance width of a raw byte string, in 1/1000 em units.
    pub fn measure_string(&self, bytes: &[u8]) -> f64 {
        let (codes, _) = self.char_codes(bytes);
        self.measure_codes(&codes)
    }
}

/// Strip a subset tag ("ABCDEF+Name" → "Name").
fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((prefix, rest))
            if prefix.len() == 6 && prefix.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            rest
        }
        _ => name,
    }
}

fn is_type0(font_dict: &lopdf::Dictionary) -> bool {
    font_dict
        .get(b"Subtype")
        .ok()
        .and_then(|o| o.as_name().ok())
        .is_some_and(|n| n == b"Type0")
}

/// Type 3 widths scale by `FontMatrix[0] / 0.001`; other fonts by 1.
fn type3_scale(doc: &lopdf::Document, font_dict: &lopdf::Dictionary) -> f64 {
    let is_type3 = font_dict
        .get(b"Subtype")
        .ok()
        .and_then(|o| o.as_name().ok())
        .is_some_and(|n| n == b"Type3");
    if !is_type3 {
        return 1.0;
    }
    dict_get(doc, font_dict, b"FontMatrix")
        .and_then(|o| o.as_array().ok())
        .and_then(|arr| arr.first())
        .and_then(object_to_f64)
        .map_or(1.0, |a| a / 0.001)
}

fn ascent_descent(descriptor: Option<&lopdf::Dictionary>) -> (f64, f64) {
    let ascent = descriptor
        .and_then(|d| d.get(b"Ascent").ok())
        .and_then(object_to_f64)
        .unwrap_or(750.0);
    let descent = descriptor
        .and_then(|d| d.get(b"Descent").ok())
        .and_then(object_to_f64)
        .unwrap_or(-250.0);
    (ascent, descent)
}

/// Bold/italic heuristics from the name and descriptor fields.
fn detect_style(name: &str, descriptor: Option<&lopdf::Dictionary>) -> (bool, bool) {
    let mut bold = name.contains("Bold") || name.contains("Black") || name.contains("Heavy");
    let mut italic = name.contains("Italic") || name.contains("Oblique");

    if let Some(d) = descriptor {
        if let Some(weight) = d.get(b"FontWeight").ok().and_then(object_to_f64) {
            bold = bold || weight >= 600.0;
        }
        if let Some(angle) = d.get(b"ItalicAngle").ok().and_then(object_to_f64) {
            italic = italic || angle.abs() > 1e-6;
        }
        if let Some(flags) = d.get(b"Flags").ok().and_then(object_to_i64) {
            bold = bold || flags & (1 << 18) != 0; // ForceBold
            italic = italic || flags & (1 << 6) != 0;
        }
    }

    (bold, italic)
}

/// Shared font cache keyed by PDF object id.
///
/// Encoding and width resolution are pure functions of the immutable
/// font dictionary, so resolved fonts are shared across pages and
/// worker threads. The mutex is held across construction, giving
/// at-most-once resolution per font object under concurrency.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: Mutex<HashMap<lopdf::ObjectId, Arc<Font>>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` through the resources dictionary's `/Font` map.
    ///
    /// An unresolvable name is an error: text shown with it cannot be
    /// decoded or measured, and downstream positions would be
    /// nonsensical.
    pub fn load(
        &self,
        doc: &lopdf::Document,
        resources: &lopdf::Dictionary,
        name: &str,
    ) -> Result<Arc<Font>, BackendError> {
        let entry = dict_get(doc, resources, b"Font")
            .and_then(|o| o.as_dict().ok())
            .and_then(|fonts| fonts.get(name.as_bytes()).ok())
            .ok_or_else(|| {
                BackendError::Font(format!("font /{name} not found in resources"))
            })?;

        if let lopdf::Object::Reference(id) = entry {
            let mut cache = self
                .fonts
                .lock()
                .map_err(|_| BackendError::Font("font cache poisoned".to_string()))?;
            if let Some(font) = cache.get(id) {
                return Ok(Arc::clone(font));
            }
            let dict = doc
                .get_object(*id)
                .ok()
                .and_then(|o| o.as_dict().ok())
                .ok_or_else(|| {
                    BackendError::Font(format!("font /{name} is not a dictionary"))
                })?;
            let font = Arc::new(Font::load(doc, dict)?);
            cache.insert(*id, Arc::clone(&font));
            return Ok(font);
        }

        // Inline font dictionary: build without caching.
        let dict = entry
            .as_dict()
            .map_err(|_| BackendError::Font(format!("font /{name} is not a dictionary")))?;
        Ok(Arc::new(Font::load(doc, dict)?))
    }
}
