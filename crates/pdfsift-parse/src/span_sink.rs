//! Span-collecting drawing sink.
//!
//! Converts [`TextShowEvent`]s into positioned [`TextSpan`]s: the run's
//! box is laid out in text space (advance wide, descent..ascent tall,
//! shifted by the rise), mapped through Tm × CTM into PDF page space,
//! then flipped into top-left page coordinates by the [`PageFrame`].

use pdfsift_core::{Point, Rect, TextSpan, Warning};

use crate::page::PageFrame;
use crate::sink::{DrawingSink, TextShowEvent};

/// Accumulates the spans drawn on one page.
#[derive(Debug)]
pub struct SpanCollector {
    frame: PageFrame,
    spans: Vec<TextSpan>,
    warnings: Vec<Warning>,
}

impl SpanCollector {
    pub fn new(frame: PageFrame) -> Self {
        Self {
            frame,
            spans: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<TextSpan>, Vec<Warning>) {
        (self.spans, self.warnings)
    }
}

impl DrawingSink for SpanCollector {
    fn show_text(&mut self, event: TextShowEvent) {
        if event.text.is_empty() {
            return;
        }

        let to_page = event.text_matrix.concat(&event.ctm);

        // The run's box in text space: the advance horizontally,
        // descent..ascent (shifted by rise) vertically.
        let y0 = event.rise + event.descent / 1000.0 * event.font_size;
        let y1 = event.rise + event.ascent / 1000.0 * event.font_size;
        let corners = [
            to_page.transform_point(Point::new(0.0, y0)),
            to_page.transform_point(Point::new(event.advance, y0)),
            to_page.transform_point(Point::new(event.advance, y1)),
            to_page.transform_point(Point::new(0.0, y1)),
        ];
        let Some(pdf_rect) = Rect::bounding(corners) else {
            return;
        };

        // Report the size the text actually renders at, not the nominal
        // Tf operand: the text matrix commonly carries the scale.
        let vertical_scale = (to_page.b * to_page.b + to_page.d * to_page.d).sqrt();
        let font_size = event.font_size * vertical_scale;

        self.spans.push(TextSpan {
            text: event.text,
            rect: self.frame.normalize_rect(&pdf_rect),
            font_name: event.font_name,
            font_size,
            bold: event.bold,
            italic: event.italic,
        });
    }

    fn warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfsift_core::Mat3;

    fn show_event(text: &str, tm: Mat3, font_size: f64, advance: f64) -> TextShowEvent {
        TextShowEvent {
            text: text.to_string(),
            raw: text.as_bytes().to_vec(),
            font_name: "Helvetica".to_string(),
            font_size,
            bold: false,
            italic: false,
            byte_len: 1,
            advance,
            text_matrix: tm,
            ctm: Mat3::identity(),
            h_scaling: 1.0,
            rise: 0.0,
            ascent: 750.0,
            descent: -250.0,
        }
    }

    #[test]
    fn span_position_is_flipped_to_top_left() {
        let mut sink = SpanCollector::new(PageFrame::new(612.0, 792.0));
        sink.show_text(show_event(
            "Hello",
            Mat3::translation(100.0, 700.0),
            12.0,
            27.3,
        ));

        let spans = sink.spans();
        assert_eq!(spans.len(), 1);
        let span = &spans[0];
        assert_eq!(span.text, "Hello");
        assert!((span.rect.min_x - 100.0).abs() < 1e-9);
        assert!((span.rect.max_x - 127.3).abs() < 1e-9);
        // Baseline at y=700, ascent 750/1000 × 12 = 9 above it:
        // top = 792 − 709 = 83
        assert!((span.rect.min_y - 83.0).abs() < 1e-9);
        // descent −250/1000 × 12 = 3 below: bottom = 792 − 697 = 95
        assert!((span.rect.max_y - 95.0).abs() < 1e-9);
        assert_eq!(span.font_size, 12.0);
    }

    #[test]
    fn text_matrix_scale_contributes_to_font_size() {
        let mut sink = SpanCollector::new(PageFrame::new(612.0, 792.0));
        // Tf 1 with Tm scaling by 12
        sink.show_text(show_event(
            "x",
            Mat3::new(12.0, 0.0, 0.0, 12.0, 0.0, 0.0),
            1.0,
            0.5,
        ));
        assert!((sink.spans()[0].font_size - 12.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_is_dropped() {
        let mut sink = SpanCollector::new(PageFrame::new(612.0, 792.0));
        sink.show_text(show_event("", Mat3::identity(), 12.0, 4.0));
        assert!(sink.spans().is_empty());
    }

    #[test]
    fn warnings_are_collected() {
        use pdfsift_core::WarningCode;
        let mut sink = SpanCollector::new(PageFrame::new(612.0, 792.0));
        sink.warning(Warning::new(WarningCode::UnknownOperator, "zz"));
        assert_eq!(sink.warnings().len(), 1);
    }
}
