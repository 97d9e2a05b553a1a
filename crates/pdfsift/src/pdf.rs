//! The `Pdf` and `Page` public API.

use std::path::Path;

use pdfsift_core::{Container, Rect, SiftError, TextSpan, Warning};
use pdfsift_layout::{LayoutOptions, Paper, assemble_paper, cluster_page};
use pdfsift_parse::{
    FontCache, PageFrame, RenderOptions, SpanCollector, TextOp, TextOpLog,
    interpret_content_stream, page_content, page_resources,
};

/// An open PDF document.
///
/// Resolved fonts are cached document-wide; the cache is safe to share
/// across threads, so pages can render concurrently (see
/// [`Pdf::paper`] with the `parallel` feature).
pub struct Pdf {
    doc: lopdf::Document,
    pages: Vec<lopdf::ObjectId>,
    fonts: FontCache,
}

impl Pdf {
    /// Open a document from memory.
    pub fn open(bytes: &[u8]) -> Result<Self, SiftError> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| SiftError::Parse(format!("failed to load PDF: {e}")))?;
        Ok(Self::from_document(doc))
    }

    /// Open a document from a file path.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, SiftError> {
        let doc = lopdf::Document::load(path)
            .map_err(|e| SiftError::Parse(format!("failed to load PDF: {e}")))?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: lopdf::Document) -> Self {
        let pages = doc.get_pages().into_values().collect();
        Self {
            doc,
            pages,
            fonts: FontCache::new(),
        }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Access one page by zero-based index.
    pub fn page(&self, index: usize) -> Result<Page<'_>, SiftError> {
        let id = *self
            .pages
            .get(index)
            .ok_or_else(|| SiftError::Parse(format!("page index {index} out of range")))?;
        let frame = PageFrame::from_page(&self.doc, id).map_err(SiftError::from)?;
        Ok(Page {
            pdf: self,
            id,
            index,
            frame,
        })
    }

    /// Iterate over all pages.
    pub fn pages(&self) -> impl Iterator<Item = Result<Page<'_>, SiftError>> {
        (0..self.page_count()).map(move |i| self.page(i))
    }

    /// Reconstruct the whole document into sections and paragraphs.
    ///
    /// Every page renders first (concurrently under the `parallel`
    /// feature) — the section and hyphenation stages need all pages'
    /// spans before they can run. A page that fails to render is
    /// skipped rather than aborting the document.
    pub fn paper(&self, render: &RenderOptions, layout: &LayoutOptions) -> Result<Paper, SiftError> {
        let span_lists = self.render_all_pages(render);
        let pages: Vec<_> = span_lists
            .into_iter()
            .flatten()
            .map(|spans| cluster_page(spans, layout))
            .collect();
        Ok(assemble_paper(&pages, layout))
    }

    #[cfg(feature = "parallel")]
    fn render_all_pages(&self, render: &RenderOptions) -> Vec<Option<Vec<TextSpan>>> {
        use rayon::prelude::*;
        (0..self.page_count())
            .into_par_iter()
            .map(|i| self.page(i).and_then(|p| p.spans(render)).ok())
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn render_all_pages(&self, render: &RenderOptions) -> Vec<Option<Vec<TextSpan>>> {
        (0..self.page_count())
            .map(|i| self.page(i).and_then(|p| p.spans(render)).ok())
            .collect()
    }
}

/// The layout view of one page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Spans in draw order.
    pub spans: Vec<TextSpan>,
    /// Union of all span boxes; `None` for an empty page.
    pub bounds: Option<Rect>,
    /// The page's clustered containers.
    pub containers: Vec<Container<TextSpan>>,
}

/// One page of an open document.
pub struct Page<'a> {
    pdf: &'a Pdf,
    id: lopdf::ObjectId,
    index: usize,
    frame: PageFrame,
}

impl Page<'_> {
    /// Zero-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> f64 {
        self.frame.width
    }

    pub fn height(&self) -> f64 {
        self.frame.height
    }

    /// Extract the page's positioned text spans (draw order).
    pub fn spans(&self, options: &RenderOptions) -> Result<Vec<TextSpan>, SiftError> {
        self.spans_with_warnings(options).map(|(spans, _)| spans)
    }

    /// Extract spans along with the recoverable conditions encountered.
    pub fn spans_with_warnings(
        &self,
        options: &RenderOptions,
    ) -> Result<(Vec<TextSpan>, Vec<Warning>), SiftError> {
        let mut sink = SpanCollector::new(self.frame);
        self.interpret(options, &mut sink)?;
        Ok(sink.into_parts())
    }

    /// Cluster the page's spans into layout containers.
    pub fn layout(
        &self,
        render: &RenderOptions,
        layout: &LayoutOptions,
    ) -> Result<PageLayout, SiftError> {
        let spans = self.spans(render)?;
        let bounds = spans
            .iter()
            .map(|s| s.rect)
            .reduce(|acc, r| acc.union(&r));
        let clustered = cluster_page(spans, layout);
        Ok(PageLayout {
            spans: clustered.spans.into_iter().map(|p| p.span).collect(),
            bounds,
            containers: clustered.containers,
        })
    }

    /// The flat text-operation log, bypassing geometry. Debug-oriented.
    pub fn text_operations(&self, options: &RenderOptions) -> Result<Vec<TextOp>, SiftError> {
        let mut log = TextOpLog::new();
        self.interpret(options, &mut log)?;
        Ok(log.ops)
    }

    fn interpret(
        &self,
        options: &RenderOptions,
        sink: &mut dyn pdfsift_parse::DrawingSink,
    ) -> Result<(), SiftError> {
        let content = page_content(&self.pdf.doc, self.id).map_err(SiftError::from)?;
        let resources = page_resources(&self.pdf.doc, self.id).map_err(SiftError::from)?;
        let mut states = pdfsift_parse::graphics_state::GraphicsStack::new();
        interpret_content_stream(
            &self.pdf.doc,
            &content,
            resources,
            &self.pdf.fonts,
            sink,
            options,
            0,
            &mut states,
        )
        .map_err(SiftError::from)
    }
}
