//! Glyph advance widths for simple and composite fonts.
//!
//! Simple fonts (Type1/TrueType/Type3) carry a `/Widths` array indexed
//! from `/FirstChar`; Type 3 widths additionally scale by the font
//! matrix. Composite fonts key widths by CID through the descendant
//! CIDFont's `/W` array, a run-length mixture of two record shapes,
//! with `/DW` as the default. All widths are in 1/1000 em units.

use std::collections::HashMap;

use crate::standard_fonts::CoreFontMetrics;

/// Width table for a simple font.
#[derive(Debug, Clone)]
pub struct SimpleWidths {
    widths: Vec<f64>,
    first_char: u32,
    missing_width: f64,
}

impl SimpleWidths {
    pub fn new(widths: Vec<f64>, first_char: u32, missing_width: f64) -> Self {
        Self {
            widths,
            first_char,
            missing_width,
        }
    }

    /// Widths from a core-14 AFM table (codes 0–255).
    pub fn from_core14(metrics: &CoreFontMetrics) -> Self {
        Self {
            widths: metrics.widths.iter().map(|&w| f64::from(w)).collect(),
            first_char: 0,
            missing_width: 0.0,
        }
    }

    /// Width for a character code; `/MissingWidth` outside the table.
    pub fn get(&self, code: u32) -> f64 {
        if code >= self.first_char {
            if let Some(&w) = self.widths.get((code - self.first_char) as usize) {
                return w;
            }
        }
        self.missing_width
    }
}

/// Width table for a composite (Type0/CID) font.
#[derive(Debug, Clone)]
pub struct CidWidths {
    widths: HashMap<u32, f64>,
    default_width: f64,
}

impl CidWidths {
    pub fn new(widths: HashMap<u32, f64>, default_width: f64) -> Self {
        Self {
            widths,
            default_width,
        }
    }

    /// Width for a CID; `/DW` (1000 when absent) for unlisted CIDs.
    pub fn get(&self, cid: u32) -> f64 {
        self.widths.get(&cid).copied().unwrap_or(self.default_width)
    }

    pub fn default_width(&self) -> f64 {
        self.default_width
    }
}

/// Parse a CIDFont `/W` array.
///
/// Two record shapes may be mixed freely:
/// - `start [w1 w2 … wn]` — explicit widths for `start`, `start+1`, …
/// - `first last w` — one width for every CID in `first..=last`
pub fn parse_w_array(objects: &[lopdf::Object], doc: &lopdf::Document) -> HashMap<u32, f64> {
    let mut widths = HashMap::new();
    let mut i = 0;

    while i < objects.len() {
        let Some(first) = object_to_u32(resolve(doc, &objects[i])) else {
            i += 1;
            continue;
        };
        let Some(next) = objects.get(i + 1).map(|o| resolve(doc, o)) else {
            break;
        };

        if let lopdf::Object::Array(per_cid) = next {
            for (offset, w) in per_cid.iter().enumerate() {
                if let Some(w) = object_to_f64(resolve(doc, w)) {
                    widths.insert(first + offset as u32, w);
                }
            }
            i += 2;
        } else if let Some(last) = object_to_u32(next) {
            let Some(w) = objects
                .get(i + 2)
                .and_then(|o| object_to_f64(resolve(doc, o)))
            else {
                break;
            };
            for cid in first..=last.max(first) {
                widths.insert(cid, w);
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    widths
}

fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> &'a lopdf::Object {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn object_to_f64(obj: &lopdf::Object) -> Option<f64> {
    match obj {
        lopdf::Object::Integer(i) => Some(*i as f64),
        lopdf::Object::Real(f) => Some(*f as f64),
        _ => None,
    }
}

fn object_to_u32(obj: &lopdf::Object) -> Option<u32> {
    match obj {
        lopdf::Object::Integer(i) if *i >= 0 => Some(*i as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Object;

    fn empty_doc() -> lopdf::Document {
        lopdf::Document::with_version("1.5")
    }

    #[test]
    fn simple_widths_lookup() {
        let w = SimpleWidths::new(vec![600.0, 500.0, 400.0], 65, 250.0);
        assert_eq!(w.get(65), 600.0);
        assert_eq!(w.get(66), 500.0);
        assert_eq!(w.get(67), 400.0);
        // Outside the table on either side
        assert_eq!(w.get(64), 250.0);
        assert_eq!(w.get(68), 250.0);
    }

    #[test]
    fn simple_widths_from_core14() {
        let metrics = crate::standard_fonts::core14_metrics("Helvetica").unwrap();
        let w = SimpleWidths::from_core14(metrics);
        assert_eq!(w.get(b'A' as u32), 667.0);
        assert_eq!(w.get(b' ' as u32), 278.0);
    }

    #[test]
    fn cid_widths_default() {
        let w = CidWidths::new(HashMap::new(), 1000.0);
        assert_eq!(w.get(42), 1000.0);
    }

    #[test]
    fn w_array_per_cid_records() {
        let doc = empty_doc();
        // 10 [500 600]
        let objects = vec![
            Object::Integer(10),
            Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
        ];
        let widths = parse_w_array(&objects, &doc);
        assert_eq!(widths.get(&10), Some(&500.0));
        assert_eq!(widths.get(&11), Some(&600.0));
        assert_eq!(widths.get(&12), None);
    }

    #[test]
    fn w_array_range_record() {
        let doc = empty_doc();
        // 20 25 1000
        let objects = vec![
            Object::Integer(20),
            Object::Integer(25),
            Object::Integer(1000),
        ];
        let widths = parse_w_array(&objects, &doc);
        for cid in 20..=25 {
            assert_eq!(widths.get(&cid), Some(&1000.0));
        }
        assert_eq!(widths.get(&26), None);
    }

    #[test]
    fn w_array_mixed_records() {
        let doc = empty_doc();
        // W = [10 [500 600] 20 25 1000]
        let objects = vec![
            Object::Integer(10),
            Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
            Object::Integer(20),
            Object::Integer(25),
            Object::Integer(1000),
        ];
        let widths = CidWidths::new(parse_w_array(&objects, &doc), 750.0);
        assert_eq!(widths.get(10), 500.0);
        assert_eq!(widths.get(11), 600.0);
        assert_eq!(widths.get(20), 1000.0);
        assert_eq!(widths.get(25), 1000.0);
        // Unlisted CIDs fall back to DW
        assert_eq!(widths.get(12), 750.0);
        assert_eq!(widths.get(26), 750.0);
    }

    #[test]
    fn w_array_real_widths() {
        let doc = empty_doc();
        let objects = vec![
            Object::Integer(5),
            Object::Array(vec![Object::Real(512.5)]),
        ];
        let widths = parse_w_array(&objects, &doc);
        assert_eq!(widths.get(&5), Some(&512.5));
    }

    #[test]
    fn w_array_truncated_record_is_ignored() {
        let doc = empty_doc();
        // Range record missing its width
        let objects = vec![Object::Integer(20), Object::Integer(25)];
        let widths = parse_w_array(&objects, &doc);
        assert!(widths.is_empty());
    }
}
