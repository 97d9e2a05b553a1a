//! End-to-end tests over programmatically built PDFs.
//!
//! Test documents are created with lopdf so the whole pipeline runs:
//! bytes → Pdf::open → interpreter → spans → layout → paper.

use pdfsift::{LayoutOptions, Pdf, RenderOptions, TextOp};

/// Build a single-page PDF (US Letter) around the given content stream.
fn pdf_with_content(content: &[u8]) -> Vec<u8> {
    pdf_with_page_contents(&[content])
}

/// Build one page per content stream, sharing a Helvetica /F1.
fn pdf_with_page_contents(contents: &[&[u8]]) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for content in contents {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));
        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(contents.len() as i64),
    });
    for &pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

#[test]
fn open_reports_page_geometry() {
    let bytes = pdf_with_content(b"BT /F1 12 Tf (x) Tj ET");
    let pdf = Pdf::open(&bytes).unwrap();
    assert_eq!(pdf.page_count(), 1);
    let page = pdf.page(0).unwrap();
    assert_eq!(page.width(), 612.0);
    assert_eq!(page.height(), 792.0);
    assert_eq!(page.index(), 0);
}

#[test]
fn page_index_out_of_range() {
    let bytes = pdf_with_content(b"");
    let pdf = Pdf::open(&bytes).unwrap();
    assert!(pdf.page(1).is_err());
}

#[test]
fn hello_span_has_position_and_metrics() {
    let bytes = pdf_with_content(b"BT /F1 12 Tf 100 700 Td (Hello) Tj ET");
    let pdf = Pdf::open(&bytes).unwrap();
    let spans = pdf.page(0).unwrap().spans(&RenderOptions::default()).unwrap();

    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.text, "Hello");
    assert_eq!(span.font_name, "Helvetica");
    assert!((span.font_size - 12.0).abs() < 1e-9);
    assert!((span.rect.min_x - 100.0).abs() < 1e-9);
    // Baseline 700, default ascent 750/1000: top = 792 − (700 + 9) = 83
    assert!((span.rect.min_y - 83.0).abs() < 1e-9);
    // Helvetica "Hello" measures 2278/1000 em at 12pt
    assert!((span.rect.width() - 27.336).abs() < 1e-9);
}

#[test]
fn spans_follow_text_line_motion() {
    let bytes = pdf_with_content(
        b"BT /F1 10 Tf 72 700 Td (first) Tj 0 -14 Td (second) Tj 0 -14 Td (third) Tj ET",
    );
    let pdf = Pdf::open(&bytes).unwrap();
    let spans = pdf.page(0).unwrap().spans(&RenderOptions::default()).unwrap();

    assert_eq!(spans.len(), 3);
    assert!((spans[1].rect.min_y - spans[0].rect.min_y - 14.0).abs() < 1e-9);
    assert!((spans[2].rect.min_y - spans[1].rect.min_y - 14.0).abs() < 1e-9);
    // Each line restarts at the same left edge
    assert!((spans[2].rect.min_x - 72.0).abs() < 1e-9);
}

#[test]
fn text_operations_log_is_flat_and_ordered() {
    let bytes = pdf_with_content(b"BT /F1 10 Tf [(Hel) -20 (lo)] TJ ET");
    let pdf = Pdf::open(&bytes).unwrap();
    let ops = pdf
        .page(0)
        .unwrap()
        .text_operations(&RenderOptions::default())
        .unwrap();

    assert_eq!(ops.len(), 3);
    assert!(matches!(&ops[0], TextOp::ShowText { text, byte_len, .. }
        if text == "Hel" && *byte_len == 1));
    assert!(matches!(&ops[1], TextOp::Advance { .. }));
    assert!(matches!(&ops[2], TextOp::ShowText { text, .. } if text == "lo"));
}

#[test]
fn layout_clusters_lines_into_containers() {
    // Two tight lines then a distant block
    let bytes = pdf_with_content(
        b"BT /F1 10 Tf 72 700 Td (one) Tj 0 -12 Td (two) Tj ET \
          BT /F1 10 Tf 72 300 Td (far) Tj ET",
    );
    let pdf = Pdf::open(&bytes).unwrap();
    let layout = pdf
        .page(0)
        .unwrap()
        .layout(&RenderOptions::default(), &LayoutOptions::default())
        .unwrap();

    assert_eq!(layout.spans.len(), 3);
    assert_eq!(layout.containers.len(), 2);
    let bounds = layout.bounds.unwrap();
    assert!(bounds.min_x <= 72.0 + 1e-9);
    assert!(bounds.max_y > 480.0);
}

#[test]
fn empty_page_layout() {
    let bytes = pdf_with_content(b"");
    let pdf = Pdf::open(&bytes).unwrap();
    let layout = pdf
        .page(0)
        .unwrap()
        .layout(&RenderOptions::default(), &LayoutOptions::default())
        .unwrap();
    assert!(layout.spans.is_empty());
    assert!(layout.bounds.is_none());
    assert!(layout.containers.is_empty());
}

#[test]
fn paper_builds_sections_across_pages() {
    let page1: &[u8] = b"BT /F1 18 Tf 72 720 Td (Results) Tj ET \
          BT /F1 10 Tf 72 690 Td (Alpha beta gamma.) Tj \
          0 -12 Td (Delta epsilon zeta.) Tj \
          0 -12 Td (Eta theta iota.) Tj ET";
    let page2: &[u8] = b"BT /F1 10 Tf 72 720 Td (Kappa lambda mu.) Tj \
          0 -12 Td (Nu xi omicron.) Tj \
          0 -12 Td (Pi rho sigma.) Tj ET";
    let bytes = pdf_with_page_contents(&[page1, page2]);

    let pdf = Pdf::open(&bytes).unwrap();
    let paper = pdf
        .paper(&RenderOptions::default(), &LayoutOptions::default())
        .unwrap();

    assert_eq!(paper.sections.len(), 1);
    let section = &paper.sections[0];
    assert_eq!(section.title, "Results");
    let body = section.paragraphs.join(" ");
    assert!(body.contains("Alpha beta gamma."), "body: {body}");
    assert!(body.contains("Pi rho sigma."), "body: {body}");
}

#[test]
fn paper_resolves_line_break_hyphens() {
    let content: &[u8] = b"BT /F1 18 Tf 72 740 Td (Pipelines) Tj ET \
          BT /F1 10 Tf 72 700 Td (The pipeline runs fast and the pipeline scales.) Tj \
          0 -12 Td (Meanwhile a second pipe-) Tj \
          0 -12 Td (line stage follows behind.) Tj \
          0 -12 Td (Nothing else changes.) Tj ET";
    let bytes = pdf_with_content(content);

    let pdf = Pdf::open(&bytes).unwrap();
    let paper = pdf
        .paper(&RenderOptions::default(), &LayoutOptions::default())
        .unwrap();

    let body = paper.sections[0].paragraphs.join(" ");
    assert!(
        body.contains("pipeline stage follows"),
        "hyphen seam not resolved: {body}"
    );
    assert!(!body.contains("pipe-"), "stray hyphen left in: {body}");
}

#[test]
fn multi_page_spans_are_independent() {
    let bytes = pdf_with_page_contents(&[
        b"BT /F1 12 Tf 72 720 Td (page one) Tj ET" as &[u8],
        b"BT /F1 12 Tf 72 720 Td (page two) Tj ET",
    ]);
    let pdf = Pdf::open(&bytes).unwrap();
    assert_eq!(pdf.page_count(), 2);

    let mut texts = Vec::new();
    for page in pdf.pages() {
        let spans = page.unwrap().spans(&RenderOptions::default()).unwrap();
        texts.push(spans[0].text.clone());
    }
    assert_eq!(texts, ["page one", "page two"]);
}

#[test]
fn word_spacing_widens_spans() {
    let narrow = pdf_with_content(b"BT /F1 10 Tf 72 700 Td (a b) Tj ET");
    let wide = pdf_with_content(b"BT /F1 10 Tf 5 Tw 72 700 Td (a b) Tj ET");

    let narrow_span = &Pdf::open(&narrow).unwrap().page(0).unwrap().spans(&RenderOptions::default()).unwrap()[0];
    let wide_span = &Pdf::open(&wide).unwrap().page(0).unwrap().spans(&RenderOptions::default()).unwrap()[0];

    assert!((wide_span.rect.width() - narrow_span.rect.width() - 5.0).abs() < 1e-9);
}
