//! pdfsift-core: Backend-independent primitives for pdfsift.
//!
//! This crate holds the foundational value types (points, rectangles,
//! affine transforms, text spans, containers), the static glyph-name and
//! predefined-encoding tables, Unicode normalization helpers, and the
//! shared error/warning types. It knows nothing about PDF files — the
//! parsing and interpretation layers live in `pdfsift-parse`.

pub mod encodings;
pub mod error;
pub mod geometry;
pub mod glyphs;
pub mod span;
pub mod unicode_norm;

pub use encodings::PredefinedEncoding;
pub use error::{SiftError, Warning, WarningCode};
pub use geometry::{Mat3, Point, Rect};
pub use glyphs::glyph_name_to_char;
pub use span::{Bounded, Container, TextSpan};
pub use unicode_norm::normalize_text;
