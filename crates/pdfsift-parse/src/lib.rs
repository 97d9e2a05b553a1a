//! pdfsift-parse: PDF reading and content-stream interpretation.
//!
//! Built on `lopdf` for the PDF object model (lexing, cross-reference
//! tables, stream filters, content tokenization). This crate adds the
//! layers above it: the graphics/text state machines, the content-stream
//! interpreter with its pluggable [`DrawingSink`](sink::DrawingSink),
//! and the font stack (encoding resolution, ToUnicode CMaps, width
//! tables, core-14 metrics).

/// Log through `tracing` when the feature is enabled; otherwise swallow
/// the message (while still type-checking the format arguments).
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
        #[cfg(not(feature = "tracing"))]
        let _ = format_args!($($arg)*);
    }};
}

pub mod cmap;
pub mod encoding;
pub mod error;
pub mod font;
pub mod graphics_state;
pub mod interpreter;
pub(crate) mod objects;
pub mod page;
pub mod sink;
pub mod span_sink;
pub mod standard_fonts;
pub mod text_state;
pub mod type1_program;
pub mod widths;

pub use error::BackendError;
pub use font::{Font, FontCache, FontKind};
pub use interpreter::{RenderOptions, interpret_content_stream};
pub use page::{PageFrame, page_content, page_resources};
pub use sink::{DrawingSink, TextAdvanceEvent, TextOp, TextOpLog, TextShowEvent};
pub use span_sink::SpanCollector;
