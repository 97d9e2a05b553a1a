//! pdfsift-layout: reading-order reconstruction over collected spans.
//!
//! The interpreter hands this crate a flat, draw-order list of
//! positioned [`TextSpan`](pdfsift_core::TextSpan)s per page — no
//! structural markup exists to rely on. Geometry alone drives the
//! pipeline:
//!
//! - [`cluster`]: draw-order line clustering and adjacent-container
//!   merging (the page's visual blocks)
//! - [`lines`]: grouping spans into lines and flattening lines to text
//! - [`paragraphs`]: indent-offset paragraph detection
//! - [`sections`]: document-wide header/section segmentation
//! - [`hyphenation`]: corpus-frequency resolution of line-break hyphens

pub mod cluster;
pub mod hyphenation;
pub mod lines;
pub mod paragraphs;
pub mod sections;

pub use cluster::{PageSpans, PlacedSpan, cluster_page};
pub use hyphenation::{WordBag, join_lines};
pub use lines::{Line, flatten_line, group_into_lines};
pub use paragraphs::detect_paragraphs;
pub use sections::{Paper, PaperSection, assemble_paper};

/// Distance thresholds and heuristics for the layout stages.
///
/// All distances are in PDF units (points) in top-left page space.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Vertical displacement starting a new container during the
    /// draw-order clustering pass (about half a typical font size).
    pub line_cluster_dy: f64,
    /// Maximum horizontal gap for merging adjacent containers
    /// (0 = their x-ranges must touch or overlap).
    pub merge_dx: f64,
    /// Maximum vertical gap for merging adjacent containers.
    pub merge_dy: f64,
    /// A span whose top clears the previous span's bottom by more than
    /// this starts a new line. Negative: spans overlapping by less than
    /// the magnitude still break (tight leading).
    pub line_break_dy: f64,
    /// Left-offset deviation from a container's typical offset that
    /// starts a new paragraph.
    pub indent_threshold: f64,
    /// Horizontal gap between spans that becomes a space when
    /// flattening a line.
    pub word_gap: f64,
    /// How far a span's font size must exceed the document's upper
    /// quartile to count as a section header.
    pub heading_margin: f64,
    /// With exactly two lines in a container, take the second line's
    /// offset as the typical offset instead of a true median (biases
    /// toward treating an indented first line as a paragraph start).
    pub two_line_bias: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_cluster_dy: 5.0,
            merge_dx: 0.0,
            merge_dy: 5.0,
            line_break_dy: -5.0,
            indent_threshold: 6.0,
            word_gap: 1.0,
            heading_margin: 0.5,
            two_line_bias: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = LayoutOptions::default();
        assert_eq!(opts.line_cluster_dy, 5.0);
        assert_eq!(opts.merge_dx, 0.0);
        assert_eq!(opts.line_break_dy, -5.0);
        assert!(opts.two_line_bias);
    }
}
