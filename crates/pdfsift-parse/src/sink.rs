//! Drawing-sink callback trait for content stream interpretation.
//!
//! The interpreter is not polymorphic itself; instead it draws through a
//! [`DrawingSink`] capability. Two sinks ship with pdfsift: the
//! span-collecting sink in [`crate::span_sink`] (geometry-aware) and the
//! flat [`TextOpLog`] here (debug-oriented, bypassing geometry).

use pdfsift_core::{Mat3, Warning};

/// One shown run of text with its full positioning context.
///
/// Emitted per show operation (`Tj`, each string element of `TJ`, `'`,
/// `"`), after decoding and measurement, with the text matrix as it was
/// *before* the advance.
#[derive(Debug, Clone)]
pub struct TextShowEvent {
    /// Decoded Unicode text (may contain `\u{..}` placeholder escapes).
    pub text: String,
    /// The raw string bytes from the content stream.
    pub raw: Vec<u8>,
    /// Base font name (subset prefix stripped).
    pub font_name: String,
    /// Nominal font size from Tf.
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    /// Code width used to chunk the raw bytes (1 or 2).
    pub byte_len: usize,
    /// Total advance in text space, spacing and scaling applied.
    pub advance: f64,
    /// Text matrix at the start of this run.
    pub text_matrix: Mat3,
    /// Current transformation matrix.
    pub ctm: Mat3,
    /// Horizontal scaling as a fraction (1.0 = 100%).
    pub h_scaling: f64,
    /// Text rise (Ts).
    pub rise: f64,
    /// Font ascent in 1/1000 em units.
    pub ascent: f64,
    /// Font descent in 1/1000 em units (negative below the baseline).
    pub descent: f64,
}

/// A pure horizontal advance of the text matrix (a `TJ` number).
#[derive(Debug, Clone, Copy)]
pub struct TextAdvanceEvent {
    /// Signed advance in text space (negative moves left).
    pub amount: f64,
}

/// Callback sink for the content-stream interpreter.
///
/// All methods default to no-ops so sinks subscribe only to what they
/// need.
pub trait DrawingSink {
    /// A run of text was shown.
    fn show_text(&mut self, _event: TextShowEvent) {}

    /// The text matrix advanced without showing text.
    fn advance_text(&mut self, _event: TextAdvanceEvent) {}

    /// A recoverable condition was encountered; interpretation continues.
    fn warning(&mut self, _warning: Warning) {}
}

/// One entry in the flat text-operation log.
#[derive(Debug, Clone, PartialEq)]
pub enum TextOp {
    ShowText {
        text: String,
        font_name: String,
        byte_len: usize,
        raw: Vec<u8>,
    },
    Advance {
        amount: f64,
    },
}

/// Debug sink recording show/advance operations in order, with no
/// geometry.
#[derive(Debug, Default)]
pub struct TextOpLog {
    pub ops: Vec<TextOp>,
    pub warnings: Vec<Warning>,
}

impl TextOpLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawingSink for TextOpLog {
    fn show_text(&mut self, event: TextShowEvent) {
        self.ops.push(TextOp::ShowText {
            text: event.text,
            font_name: event.font_name,
            byte_len: event.byte_len,
            raw: event.raw,
        });
    }

    fn advance_text(&mut self, event: TextAdvanceEvent) {
        self.ops.push(TextOp::Advance {
            amount: event.amount,
        });
    }

    fn warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}
