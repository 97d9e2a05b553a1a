//! Page coordinate frame.
//!
//! PDF content streams draw in bottom-left-origin page space offset by
//! the MediaBox origin. [`PageFrame`] captures the visible box (CropBox
//! when present, MediaBox otherwise, with inheritance through the page
//! tree) and converts drawn rectangles into top-left-origin page
//! coordinates for the layout stages.

use pdfsift_core::Rect;

use crate::error::BackendError;
use crate::objects::{decode_stream, object_to_f64, resolve_ref};

/// The coordinate frame of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    pub width: f64,
    pub height: f64,
    /// Lower-left corner of the visible box in PDF space.
    off_x: f64,
    off_y: f64,
}

impl PageFrame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            off_x: 0.0,
            off_y: 0.0,
        }
    }

    /// Read the frame for a page, preferring CropBox over MediaBox.
    ///
    /// Both keys inherit through `/Parent`, per the page-tree rules.
    pub fn from_page(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Result<Self, BackendError> {
        let boxed = resolve_inherited(doc, page_id, b"CropBox")?
            .or(resolve_inherited(doc, page_id, b"MediaBox")?);
        let rect = boxed
            .ok_or_else(|| BackendError::Parse("page has no /MediaBox".to_string()))
            .and_then(|obj| parse_box(doc, obj))?;

        Ok(Self {
            width: rect[2] - rect[0],
            height: rect[3] - rect[1],
            off_x: rect[0],
            off_y: rect[1],
        })
    }

    /// Convert a rectangle from PDF drawing space to top-left page space.
    pub fn normalize_rect(&self, r: &Rect) -> Rect {
        Rect {
            min_x: r.min_x - self.off_x,
            min_y: self.height - (r.max_y - self.off_y),
            max_x: r.max_x - self.off_x,
            max_y: self.height - (r.min_y - self.off_y),
        }
    }
}

/// Concatenated, filter-decoded content bytes of a page.
///
/// `/Contents` may be a single stream or an array of streams; array
/// parts are joined with a separating space, since an operator may not
/// span stream boundaries but tokens assume whitespace between parts.
pub fn page_content(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<Vec<u8>, BackendError> {
    let page_dict = doc
        .get_object(page_id)
        .ok()
        .and_then(|o| o.as_dict().ok())
        .ok_or_else(|| BackendError::Parse("page is not a dictionary".to_string()))?;

    let contents = match page_dict.get(b"Contents") {
        Ok(obj) => resolve_ref(doc, obj),
        Err(_) => return Ok(Vec::new()), // page with no content
    };

    match contents {
        lopdf::Object::Stream(stream) => decode_stream(stream),
        lopdf::Object::Array(parts) => {
            let mut content = Vec::new();
            for part in parts {
                let stream = resolve_ref(doc, part).as_stream().map_err(|e| {
                    BackendError::Parse(format!("/Contents array item is not a stream: {e}"))
                })?;
                if !content.is_empty() {
                    content.push(b' ');
                }
                content.extend_from_slice(&decode_stream(stream)?);
            }
            Ok(content)
        }
        _ => Err(BackendError::Parse(
            "/Contents is neither a stream nor an array".to_string(),
        )),
    }
}

/// The page's resources dictionary, following page-tree inheritance.
///
/// A page without any `/Resources` gets an empty dictionary: content
/// that references nothing still interprets.
pub fn page_resources<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<&'a lopdf::Dictionary, BackendError> {
    match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => obj
            .as_dict()
            .map_err(|_| BackendError::Parse("/Resources is not a dictionary".to_string())),
        None => {
            static EMPTY: std::sync::OnceLock<lopdf::Dictionary> = std::sync::OnceLock::new();
            Ok(EMPTY.get_or_init(lopdf::Dictionary::new))
        }
    }
}

/// Resolve a page-tree-inherited key by walking `/Parent` links.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
    key: &[u8],
) -> Result<Option<&'a lopdf::Object>, BackendError> {
    let mut current = page_id;
    // Parent chains are shallow; the cap guards malformed cycles.
    for _ in 0..32 {
        let dict = doc
            .get_object(current)
            .ok()
            .and_then(|o| o.as_dict().ok())
            .ok_or_else(|| BackendError::Parse("page tree node is not a dictionary".to_string()))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(resolve_ref(doc, value)));
        }

        match dict.get(b"Parent") {
            Ok(parent) => {
                current = parent.as_reference().map_err(|e| {
                    BackendError::Parse(format!("invalid /Parent reference: {e}"))
                })?;
            }
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

/// Parse a `[llx lly urx ury]` box, normalizing flipped corners.
fn parse_box(doc: &lopdf::Document, obj: &lopdf::Object) -> Result<[f64; 4], BackendError> {
    let arr = obj
        .as_array()
        .map_err(|e| BackendError::Parse(format!("page box is not an array: {e}")))?;
    let values: Vec<f64> = arr
        .iter()
        .filter_map(|o| object_to_f64(resolve_ref(doc, o)))
        .collect();
    if values.len() != 4 {
        return Err(BackendError::Parse(format!(
            "page box has {} numeric entries, expected 4",
            values.len()
        )));
    }
    Ok([
        values[0].min(values[2]),
        values[1].min(values[3]),
        values[0].max(values[2]),
        values[1].max(values[3]),
    ])
}
