//! Document-level section segmentation and paper assembly.
//!
//! This is the barrier stage: it needs every page's spans before it can
//! run, because both of its signals are document-wide — the typical
//! content font size (the upper quartile of all span sizes) and the
//! hyphenation word bag (built from all flattened lines).
//!
//! Scanning spans in page order, a span starts a new section header
//! when its font size exceeds the document's upper quartile by a small
//! margin, or when it is bold and the open section has no content yet.
//! Whitespace-only spans never start a section; they join whichever
//! part of the open section is still collecting.

use crate::LayoutOptions;
use crate::cluster::{PageSpans, PlacedSpan};
use crate::hyphenation::{WordBag, join_lines};
use crate::lines::{flatten_line, group_into_lines};
use crate::paragraphs::detect_paragraphs;

/// The reconstructed document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paper {
    pub sections: Vec<PaperSection>,
}

/// One section: a title and its flowing paragraphs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaperSection {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// A section while it is being accumulated.
#[derive(Debug, Default)]
struct OpenSection {
    header: Vec<PlacedSpan>,
    content: Vec<PlacedSpan>,
}

impl OpenSection {
    fn is_empty(&self) -> bool {
        self.header.is_empty() && self.content.is_empty()
    }
}

/// Assemble the whole-document paper view from all pages' spans.
pub fn assemble_paper(pages: &[PageSpans], options: &LayoutOptions) -> Paper {
    // Make container ids document-unique so lines never merge across
    // pages.
    let mut all: Vec<PlacedSpan> = Vec::new();
    let mut container_base = 0;
    for page in pages {
        for placed in &page.spans {
            let mut placed = placed.clone();
            placed.container += container_base;
            all.push(placed);
        }
        container_base += page.containers.len();
    }

    let heading_size = heading_threshold(&all, options);

    // Split the span stream into sections.
    let mut sections: Vec<OpenSection> = Vec::new();
    let mut current = OpenSection::default();
    for placed in all {
        if placed.span.is_whitespace() {
            if current.content.is_empty() {
                current.header.push(placed);
            } else {
                current.content.push(placed);
            }
            continue;
        }

        let is_header = placed.span.font_size > heading_size
            || (placed.span.bold && current.content.is_empty());
        if is_header {
            if !current.content.is_empty() {
                sections.push(current);
                current = OpenSection::default();
            }
            current.header.push(placed);
        } else {
            current.content.push(placed);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }

    // First pass: flatten everything and build the document word bag.
    let mut bag = WordBag::new();
    let mut rendered: Vec<(String, Vec<Vec<String>>)> = Vec::new();
    for section in &sections {
        let title_lines = group_into_lines(&section.header, options);
        let title = title_lines
            .iter()
            .map(|line| flatten_line(line, options))
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        bag.add_text(&title);

        let lines = group_into_lines(&section.content, options);
        let paragraphs = detect_paragraphs(lines, options);
        let flattened: Vec<Vec<String>> = paragraphs
            .iter()
            .map(|paragraph| {
                paragraph
                    .iter()
                    .map(|line| {
                        let text = flatten_line(line, options);
                        bag.add_text(&text);
                        text
                    })
                    .collect()
            })
            .collect();
        rendered.push((title, flattened));
    }

    // Second pass: join each paragraph's lines against the full bag.
    let sections = rendered
        .into_iter()
        .map(|(title, paragraphs)| PaperSection {
            title,
            paragraphs: paragraphs
                .iter()
                .map(|lines| join_lines(lines, &bag))
                .filter(|p| !p.trim().is_empty())
                .collect(),
        })
        .collect();

    Paper { sections }
}

/// Header font-size threshold: the upper quartile of all span sizes
/// plus a small margin.
fn heading_threshold(spans: &[PlacedSpan], options: &LayoutOptions) -> f64 {
    let mut sizes: Vec<f64> = spans.iter().map(|p| p.span.font_size).collect();
    if sizes.is_empty() {
        return f64::INFINITY;
    }
    sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let upper_quartile = sizes[(sizes.len() - 1) * 3 / 4];
    upper_quartile + options.heading_margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::cluster_page;
    use pdfsift_core::{Rect, TextSpan};

    /// A page of body text with an optional big/bold opener.
    fn span(text: &str, x: f64, top: f64, size: f64, bold: bool) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            rect: Rect::new(x, top, x + text.len() as f64 * size * 0.5, top + size),
            font_name: "Helvetica".to_string(),
            font_size: size,
            bold,
            italic: false,
        }
    }

    fn page_of(spans: Vec<TextSpan>) -> PageSpans {
        cluster_page(spans, &LayoutOptions::default())
    }

    #[test]
    fn empty_document() {
        let paper = assemble_paper(&[], &LayoutOptions::default());
        assert!(paper.sections.is_empty());
    }

    #[test]
    fn heading_by_font_size_starts_sections() {
        let page = page_of(vec![
            span("Introduction", 0.0, 0.0, 18.0, false),
            span("Body text one.", 0.0, 30.0, 10.0, false),
            span("Body text two.", 0.0, 42.0, 10.0, false),
            span("Body text three.", 0.0, 54.0, 10.0, false),
            span("Methods", 0.0, 90.0, 18.0, false),
            span("More body text.", 0.0, 120.0, 10.0, false),
            span("Even more body.", 0.0, 132.0, 10.0, false),
            span("Closing body.", 0.0, 144.0, 10.0, false),
        ]);
        let paper = assemble_paper(&[page], &LayoutOptions::default());
        assert_eq!(paper.sections.len(), 2);
        assert_eq!(paper.sections[0].title, "Introduction");
        assert_eq!(paper.sections[1].title, "Methods");
        assert_eq!(paper.sections[0].paragraphs.len(), 1);
        assert!(paper.sections[0].paragraphs[0].contains("Body text one."));
    }

    #[test]
    fn leading_bold_span_opens_a_header() {
        // Bold span at body size still heads the section when no
        // content has been collected yet.
        let page = page_of(vec![
            span("Abstract", 0.0, 0.0, 10.0, true),
            span("We study things.", 0.0, 20.0, 10.0, false),
        ]);
        let paper = assemble_paper(&[page], &LayoutOptions::default());
        assert_eq!(paper.sections.len(), 1);
        assert_eq!(paper.sections[0].title, "Abstract");
    }

    #[test]
    fn bold_after_content_does_not_split() {
        let page = page_of(vec![
            span("Heading", 0.0, 0.0, 18.0, false),
            span("Plain text with a ", 0.0, 30.0, 10.0, false),
            span("bold run", 95.0, 30.0, 10.0, true),
            span(" inside.", 140.0, 30.0, 10.0, false),
        ]);
        let paper = assemble_paper(&[page], &LayoutOptions::default());
        assert_eq!(paper.sections.len(), 1);
        assert!(paper.sections[0].paragraphs[0].contains("bold run"));
    }

    #[test]
    fn whitespace_spans_never_start_sections() {
        let page = page_of(vec![
            span("Title", 0.0, 0.0, 20.0, false),
            span("   ", 0.0, 30.0, 24.0, false), // oversized whitespace
            span("Body one.", 0.0, 50.0, 10.0, false),
            span("Body two.", 0.0, 62.0, 10.0, false),
            span("Body three.", 0.0, 74.0, 10.0, false),
            span("Body four.", 0.0, 86.0, 10.0, false),
            span("Body five.", 0.0, 98.0, 10.0, false),
            span("Body six.", 0.0, 110.0, 10.0, false),
        ]);
        let paper = assemble_paper(&[page], &LayoutOptions::default());
        assert_eq!(paper.sections.len(), 1);
        assert_eq!(paper.sections[0].title, "Title");
    }

    #[test]
    fn sections_span_pages() {
        let page1 = page_of(vec![
            span("Results", 0.0, 0.0, 18.0, false),
            span("Start of results.", 0.0, 30.0, 10.0, false),
        ]);
        let page2 = page_of(vec![span("Continuation text.", 0.0, 0.0, 10.0, false)]);
        let paper = assemble_paper(&[page1, page2], &LayoutOptions::default());
        assert_eq!(paper.sections.len(), 1);
        // Page-2 content lands in the same open section
        let body = paper.sections[0].paragraphs.join(" ");
        assert!(body.contains("Start of results."));
        assert!(body.contains("Continuation text."));
    }

    #[test]
    fn hyphen_seams_resolve_against_document_vocabulary() {
        let page = page_of(vec![
            span("Heading", 0.0, 0.0, 18.0, false),
            // "pipeline" appears intact twice in the body
            span("The pipeline design uses a pipeline cache.", 0.0, 30.0, 10.0, false),
            span("A second pipe-", 0.0, 42.0, 10.0, false),
            span("line stage follows.", 0.0, 54.0, 10.0, false),
        ]);
        let paper = assemble_paper(&[page], &LayoutOptions::default());
        let body = paper.sections[0].paragraphs.join(" ");
        assert!(body.contains("pipeline stage follows"), "body: {body}");
    }

    #[test]
    fn document_without_headings_is_one_untitled_section() {
        let page = page_of(vec![
            span("Just body text.", 0.0, 0.0, 10.0, false),
            span("More body text.", 0.0, 12.0, 10.0, false),
        ]);
        let paper = assemble_paper(&[page], &LayoutOptions::default());
        assert_eq!(paper.sections.len(), 1);
        assert_eq!(paper.sections[0].title, "");
    }
}
