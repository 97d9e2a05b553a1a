//! Error and warning types shared across the pdfsift crates.
//!
//! [`SiftError`] covers fatal conditions that abort the current unit of
//! work (a page render, a font load). [`Warning`] carries the recoverable
//! conditions — unknown operators, unmapped glyphs, state underflow —
//! that degrade to a no-op or placeholder while processing continues.

use std::fmt;

/// Fatal error for PDF processing.
#[derive(Debug, Clone, PartialEq)]
pub enum SiftError {
    /// Error parsing PDF structure or syntax.
    Parse(String),
    /// I/O error reading PDF data.
    Io(String),
    /// Error resolving font or encoding information.
    Font(String),
    /// Error during content stream interpretation.
    Interpreter(String),
    /// Any other error not covered by a specific variant.
    Other(String),
}

impl fmt::Display for SiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiftError::Parse(msg) => write!(f, "parse error: {msg}"),
            SiftError::Io(msg) => write!(f, "I/O error: {msg}"),
            SiftError::Font(msg) => write!(f, "font error: {msg}"),
            SiftError::Interpreter(msg) => write!(f, "interpreter error: {msg}"),
            SiftError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SiftError {}

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        SiftError::Io(err.to_string())
    }
}

/// Machine-readable category for a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WarningCode {
    /// An unrecognized content stream operator was skipped.
    UnknownOperator,
    /// An operator had too few or ill-typed operands and was skipped.
    MalformedOperands,
    /// A character code had no Unicode mapping.
    MissingGlyph,
    /// A referenced resource (XObject, ExtGState) was not found.
    MissingResource,
    /// `Q` was seen with no matching `q` on the stack.
    StateUnderflow,
    /// Form XObject nesting reached the depth cap; descent stopped.
    DepthCapReached,
    /// A string's byte length did not match the font's code width.
    LengthMismatch,
    /// A text operator appeared outside a BT/ET pair.
    OutsideTextObject,
    /// Fallback encoding applied with low confidence.
    EncodingGuessed,
    /// Anything else.
    Other,
}

/// A recoverable condition reported during interpretation or decoding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
    /// Index of the offending operation in the content stream, if known.
    pub op_index: Option<usize>,
    /// Font in scope when the condition occurred, if relevant.
    pub font_name: Option<String>,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            op_index: None,
            font_name: None,
        }
    }

    pub fn at_op(mut self, op_index: usize) -> Self {
        self.op_index = Some(op_index);
        self
    }

    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(idx) = self.op_index {
            write!(f, " (op #{idx})")?;
        }
        if let Some(ref font) = self.font_name {
            write!(f, " (font {font})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            SiftError::Parse("bad xref".to_string()).to_string(),
            "parse error: bad xref"
        );
        assert_eq!(
            SiftError::Font("no widths".to_string()).to_string(),
            "font error: no widths"
        );
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SiftError = io_err.into();
        assert!(matches!(err, SiftError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn error_implements_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(SiftError::Interpreter("stack underflow".to_string()));
        assert!(err.to_string().contains("stack underflow"));
    }

    #[test]
    fn warning_builders() {
        let w = Warning::new(WarningCode::UnknownOperator, "unknown operator 'xyz'")
            .at_op(7)
            .with_font("F1");
        assert_eq!(w.code, WarningCode::UnknownOperator);
        assert_eq!(w.op_index, Some(7));
        assert_eq!(w.font_name.as_deref(), Some("F1"));
        assert_eq!(w.to_string(), "unknown operator 'xyz' (op #7) (font F1)");
    }

    #[test]
    fn warning_display_without_context() {
        let w = Warning::new(WarningCode::StateUnderflow, "Q without matching q");
        assert_eq!(w.to_string(), "Q without matching q");
    }
}
