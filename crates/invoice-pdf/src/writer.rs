//! # PDF Serialization
//!
//! Turns a finished [`PageLayout`] into a complete PDF file with pdf-writer.
//!
//! ## Object Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1 Catalog ──► 2 Pages ──► 3 Page ──► 4 Content stream                  │
//! │                               │                                         │
//! │                               └─► Resources: F1 ► 5 Helvetica           │
//! │                                              F2 ► 6 Helvetica-Bold      │
//! │                                              F3 ► 7 Helvetica-Oblique   │
//! │  8 Info (Title, Producer)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The layout is in millimetres with y pointing down; PDF user space is in
//! points with y pointing up, so every coordinate is scaled and flipped here.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::canvas::{DrawOp, PageGeometry, PageLayout, TextRun, LINE_WIDTH_MM, PT_PER_MM};
use crate::font::FontStyle;

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
}

fn font_id(style: FontStyle) -> Ref {
    match style {
        FontStyle::Regular => Ref::new(5),
        FontStyle::Bold => Ref::new(6),
        FontStyle::Italic => Ref::new(7),
    }
}

/// Serializes a single page into PDF bytes.
pub fn write_pdf(layout: &PageLayout, info: &DocumentInfo) -> Vec<u8> {
    let geometry = &layout.geometry;
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let info_id = Ref::new(8);
    let mut pdf = Pdf::new();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(
        0.0,
        0.0,
        geometry.width * PT_PER_MM,
        geometry.height * PT_PER_MM,
    ));
    page.parent(page_tree_id);
    page.contents(content_id);
    {
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for style in FontStyle::ALL {
            fonts.pair(Name(style.resource_name()), font_id(style));
        }
    }
    page.finish();

    for style in FontStyle::ALL {
        pdf.type1_font(font_id(style))
            .base_font(Name(style.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let content = build_content(layout);
    pdf.stream(content_id, &content);

    pdf.document_info(info_id)
        .title(TextStr(&info.title))
        .producer(TextStr(&info.producer));

    pdf.finish()
}

fn build_content(layout: &PageLayout) -> Vec<u8> {
    let geometry = &layout.geometry;
    let mut content = Content::new();

    content.set_line_width(LINE_WIDTH_MM * PT_PER_MM);
    content.set_stroke_rgb(0.0, 0.0, 0.0);

    for op in &layout.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                if let Some(color) = fill {
                    let [r, g, b] = color.unit();
                    content.set_fill_rgb(r, g, b);
                }
                content.rect(
                    x * PT_PER_MM,
                    flip(geometry, y + height),
                    width * PT_PER_MM,
                    height * PT_PER_MM,
                );
                match (fill.is_some(), *stroke) {
                    (true, true) => content.fill_nonzero_and_stroke(),
                    (true, false) => content.fill_nonzero(),
                    _ => content.stroke(),
                };
            }
            DrawOp::Text(run) => write_text(&mut content, geometry, run),
        }
    }

    content.finish()
}

fn write_text(content: &mut Content, geometry: &PageGeometry, run: &TextRun) {
    let [r, g, b] = run.color.unit();

    content.save_state();
    content.set_fill_rgb(r, g, b);
    content.begin_text();
    content.set_font(Name(run.font.style.resource_name()), run.font.size_pt);
    if run.word_spacing != 0.0 {
        content.set_word_spacing(run.word_spacing * PT_PER_MM);
    }
    content.next_line(run.x * PT_PER_MM, flip(geometry, run.baseline));
    content.show(Str(&run.encoded));
    content.end_text();
    content.restore_state();
}

/// Converts a top-down millimetre y into bottom-up points.
#[inline]
fn flip(geometry: &PageGeometry, y: f32) -> f32 {
    (geometry.height - y) * PT_PER_MM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, CellStyle, Rgb};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn sample_layout() -> PageLayout {
        let mut canvas = Canvas::new(PageGeometry::a4());
        canvas.set_font(FontStyle::Bold, 16.0);
        canvas.cell(0.0, 10.0, "Acme", CellStyle::LINE).unwrap();
        canvas.set_fill_color(Rgb(245, 245, 245));
        canvas
            .cell(100.0, 10.0, "Description", CellStyle::INLINE.bordered().filled())
            .unwrap();
        canvas.finish()
    }

    #[test]
    fn test_writes_complete_file() {
        let bytes = write_pdf(
            &sample_layout(),
            &DocumentInfo {
                title: "Invoice INV-0001".into(),
                producer: "invoice-pdf".into(),
            },
        );

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"%%EOF"));
        assert!(contains(&bytes, b"/MediaBox"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/Helvetica-Oblique"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
    }

    #[test]
    fn test_flip_maps_top_to_page_height() {
        let geometry = PageGeometry::a4();
        assert!((flip(&geometry, 0.0) - 297.0 * PT_PER_MM).abs() < 1e-3);
        assert!(flip(&geometry, 297.0).abs() < 1e-3);
    }

    #[test]
    fn test_content_is_deterministic() {
        let layout = sample_layout();
        assert_eq!(build_content(&layout), build_content(&layout));
    }
}
