//! Line grouping and flattening.
//!
//! Grouping walks spans in emission order: a new line starts when the
//! vertical gap from the previous span exceeds the (negative) break
//! threshold, or when the span belongs to a different container than
//! its predecessor. Flattening concatenates a line's spans left to
//! right, inserting a single space only where the horizontal gap is
//! wide enough — overlapping and touching spans join bare, which
//! absorbs kerning artifacts and diacritic-composition tricks.

use pdfsift_core::{Rect, TextSpan, normalize_text};

use crate::LayoutOptions;
use crate::cluster::PlacedSpan;

/// One visual line of text.
#[derive(Debug, Clone)]
pub struct Line {
    pub rect: Rect,
    /// Container the line belongs to (from its first span).
    pub container: usize,
    /// Left edge of that container (the indent reference).
    pub container_left: f64,
    pub spans: Vec<TextSpan>,
}

impl Line {
    fn new(placed: &PlacedSpan) -> Self {
        Self {
            rect: placed.span.rect,
            container: placed.container,
            container_left: placed.container_left,
            spans: vec![placed.span.clone()],
        }
    }

    fn push(&mut self, span: TextSpan) {
        self.rect = self.rect.union(&span.rect);
        self.spans.push(span);
    }

    /// Indent offset relative to the containing container.
    pub fn indent(&self) -> f64 {
        self.rect.min_x - self.container_left
    }
}

/// Group spans into lines (emission order).
pub fn group_into_lines(spans: &[PlacedSpan], options: &LayoutOptions) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut prev_bottom = 0.0;
    let mut prev_container = usize::MAX;

    for placed in spans {
        let breaks = lines.is_empty()
            || placed.container != prev_container
            || placed.span.rect.min_y - prev_bottom > options.line_break_dy;
        if breaks {
            lines.push(Line::new(placed));
        } else if let Some(line) = lines.last_mut() {
            line.push(placed.span.clone());
        }
        prev_bottom = placed.span.rect.max_y;
        prev_container = placed.container;
    }

    lines
}

/// Flatten a line to normalized text.
///
/// Spans are taken left to right regardless of draw order; a space is
/// inserted only across gaps wider than `word_gap`.
pub fn flatten_line(line: &Line, options: &LayoutOptions) -> String {
    let mut ordered: Vec<&TextSpan> = line.spans.iter().collect();
    ordered.sort_by(|a, b| {
        a.rect
            .min_x
            .partial_cmp(&b.rect.min_x)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    let mut prev_right: Option<f64> = None;
    for span in ordered {
        if let Some(right) = prev_right {
            if span.rect.min_x - right > options.word_gap && !out.ends_with(' ') {
                out.push(' ');
            }
        }
        out.push_str(&span.text);
        prev_right = Some(span.rect.max_x.max(prev_right.unwrap_or(f64::MIN)));
    }

    normalize_text(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(text: &str, x: f64, top: f64, width: f64, container: usize) -> PlacedSpan {
        PlacedSpan {
            span: TextSpan {
                text: text.to_string(),
                rect: Rect::new(x, top, x + width, top + 10.0),
                font_name: "Helvetica".to_string(),
                font_size: 10.0,
                bold: false,
                italic: false,
            },
            container,
            container_left: 0.0,
        }
    }

    #[test]
    fn same_line_stays_together() {
        let spans = vec![placed("a", 0.0, 100.0, 30.0, 0), placed("b", 35.0, 100.0, 30.0, 0)];
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
    }

    #[test]
    fn clear_vertical_gap_breaks_lines() {
        let spans = vec![placed("a", 0.0, 100.0, 30.0, 0), placed("b", 0.0, 112.0, 30.0, 0)];
        // 112 − 110 = 2 > −5
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn tight_leading_still_breaks() {
        // Next line overlaps the previous by 3 (< 5): still a new line.
        let spans = vec![placed("a", 0.0, 100.0, 30.0, 0), placed("b", 0.0, 107.0, 30.0, 0)];
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn deep_overlap_stays_on_the_line() {
        // A superscript overlapping the line by more than 5 units.
        let spans = vec![placed("x", 0.0, 100.0, 30.0, 0), placed("2", 31.0, 97.0, 5.0, 0)];
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn container_change_breaks_lines() {
        // Same y-band but different containers (e.g. adjacent columns).
        let spans = vec![placed("a", 0.0, 100.0, 30.0, 0), placed("b", 300.0, 100.0, 30.0, 1)];
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].container, 0);
        assert_eq!(lines[1].container, 1);
    }

    #[test]
    fn flatten_inserts_spaces_across_gaps() {
        let spans = vec![
            placed("Hello", 0.0, 100.0, 30.0, 0),
            placed("world", 35.0, 100.0, 30.0, 0),
        ];
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        assert_eq!(flatten_line(&lines[0], &LayoutOptions::default()), "Hello world");
    }

    #[test]
    fn flatten_joins_adjacent_spans_bare() {
        // Kerned fragments 0.5 apart: no space.
        let spans = vec![
            placed("Hel", 0.0, 100.0, 20.0, 0),
            placed("lo", 20.5, 100.0, 15.0, 0),
        ];
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        assert_eq!(flatten_line(&lines[0], &LayoutOptions::default()), "Hello");
    }

    #[test]
    fn flatten_orders_by_position_not_draw_order() {
        let spans = vec![
            placed("world", 40.0, 100.0, 30.0, 0),
            placed("Hello", 0.0, 100.0, 30.0, 0),
        ];
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        assert_eq!(flatten_line(&lines[0], &LayoutOptions::default()), "Hello world");
    }

    #[test]
    fn flatten_recombines_diacritics() {
        // Overlapping accent span next to its base letter
        let spans = vec![
            placed("a", 0.0, 100.0, 6.0, 0),
            placed("\u{02DA}", 0.0, 100.0, 6.0, 0),
        ];
        let lines = group_into_lines(&spans, &LayoutOptions::default());
        let text = flatten_line(&lines[0], &LayoutOptions::default());
        assert_eq!(text, "\u{00E5}");
    }

    #[test]
    fn line_indent_is_relative_to_container() {
        let mut p = placed("a", 25.0, 100.0, 30.0, 0);
        p.container_left = 10.0;
        let lines = group_into_lines(&[p], &LayoutOptions::default());
        assert_eq!(lines[0].indent(), 15.0);
    }
}
