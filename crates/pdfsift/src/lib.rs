//! pdfsift: positioned text and reading-order reconstruction for PDFs.
//!
//! This is the public facade crate. It ties together:
//!
//! - **pdfsift-parse** — the lopdf-backed object model, the
//!   content-stream interpreter, and the font stack
//! - **pdfsift-layout** — line/paragraph/section reconstruction and
//!   hyphenation resolution
//! - **pdfsift-core** — the shared geometry and span types
//!
//! # Example
//!
//! ```no_run
//! use pdfsift::{LayoutOptions, Pdf, RenderOptions};
//!
//! let pdf = Pdf::open_file("paper.pdf")?;
//! let paper = pdf.paper(&RenderOptions::default(), &LayoutOptions::default())?;
//! for section in &paper.sections {
//!     println!("# {}", section.title);
//!     for paragraph in &section.paragraphs {
//!         println!("{paragraph}\n");
//!     }
//! }
//! # Ok::<(), pdfsift::SiftError>(())
//! ```

pub use pdfsift_core;
pub use pdfsift_layout;
pub use pdfsift_parse;

mod pdf;

pub use pdf::{Page, PageLayout, Pdf};
pub use pdfsift_core::{Container, Mat3, Point, Rect, SiftError, TextSpan, Warning, WarningCode};
pub use pdfsift_layout::{LayoutOptions, Paper, PaperSection};
pub use pdfsift_parse::{RenderOptions, TextOp};
