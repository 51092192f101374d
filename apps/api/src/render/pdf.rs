//! PDF renderer.
//!
//! Builds a block list (title, metadata, spacer, body), flows it onto A4 pages
//! and writes each placed line with printpdf's plain text primitive. Nothing
//! is interpreted as markup, so generated text containing `<`, `>` or `&`
//! renders literally.

use printpdf::{Mm, PdfDocument};

use crate::layout::{
    flow_blocks, Align, Block, Page, PageGeometry, TextStyle, A4_PORTRAIT, DEJAVU_SANS,
};
use crate::render::{FontAsset, RenderError, ReportDocument};

pub const TITLE_STYLE: TextStyle = TextStyle {
    font_size_pt: 16.0,
    leading_pt: 22.0,
    space_after_pt: 16.0,
    align: Align::Center,
};

pub const META_STYLE: TextStyle = TextStyle {
    font_size_pt: 10.0,
    leading_pt: 12.0,
    space_after_pt: 4.0,
    align: Align::Left,
};

pub const BODY_STYLE: TextStyle = TextStyle {
    font_size_pt: 11.0,
    leading_pt: 16.0,
    space_after_pt: 10.0,
    align: Align::Left,
};

const META_GAP_PT: f32 = 30.0;
const BLANK_LINE_GAP_PT: f32 = 10.0;

/// Title, metadata lines, a fixed gap, then one paragraph per non-blank body
/// line. Blank lines become spacers, never empty paragraphs.
pub fn report_blocks(document: &ReportDocument) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(document.meta_lines.len() + 8);

    blocks.push(Block::Paragraph {
        text: document.title.clone(),
        style: TITLE_STYLE,
    });
    for meta in &document.meta_lines {
        blocks.push(Block::Paragraph {
            text: meta.clone(),
            style: META_STYLE,
        });
    }
    blocks.push(Block::Spacer {
        height_pt: META_GAP_PT,
    });

    blocks.extend(body_blocks(document));
    blocks
}

fn body_blocks(document: &ReportDocument) -> impl Iterator<Item = Block> + '_ {
    document.body_lines().map(|line| {
        if line.trim().is_empty() {
            Block::Spacer {
                height_pt: BLANK_LINE_GAP_PT,
            }
        } else {
            Block::Paragraph {
                text: line.to_string(),
                style: BODY_STYLE,
            }
        }
    })
}

pub fn render_pdf(document: &ReportDocument, font: &FontAsset) -> Result<Vec<u8>, RenderError> {
    let pages = flow_blocks(&report_blocks(document), &A4_PORTRAIT, &DEJAVU_SANS);
    write_pages(&document.title, &pages, &A4_PORTRAIT, font)
}

fn write_pages(
    title: &str,
    pages: &[Page],
    geometry: &PageGeometry,
    font: &FontAsset,
) -> Result<Vec<u8>, RenderError> {
    let width = pt_to_mm(geometry.width_pt);
    let height = pt_to_mm(geometry.height_pt);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
    let font_ref = doc
        .add_external_font(font.bytes())
        .map_err(|e| RenderError::Pdf(format!("font embedding failed: {e:?}")))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };

        for line in &page.lines {
            layer.use_text(
                line.text.as_str(),
                line.font_size_pt,
                pt_to_mm(line.x_pt),
                pt_to_mm(line.baseline_pt),
                &font_ref,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(format!("serialization failed: {e:?}")))
}

/// Parses the face the same way `render_pdf` embeds it.
pub(crate) fn check_font(bytes: &[u8]) -> Result<(), RenderError> {
    PdfDocument::empty("font check")
        .add_external_font(bytes)
        .map(|_| ())
        .map_err(|e| RenderError::Pdf(format!("font embedding failed: {e:?}")))
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{sample_document, system_font};

    fn body_of(blocks: &[Block]) -> &[Block] {
        // title + 5 meta lines + gap
        &blocks[7..]
    }

    #[test]
    fn test_blank_line_becomes_spacer_not_paragraph() {
        let blocks = report_blocks(&sample_document("Line one\n\nLine two"));
        assert_eq!(
            body_of(&blocks),
            &[
                Block::Paragraph {
                    text: "Line one".to_string(),
                    style: BODY_STYLE,
                },
                Block::Spacer {
                    height_pt: BLANK_LINE_GAP_PT,
                },
                Block::Paragraph {
                    text: "Line two".to_string(),
                    style: BODY_STYLE,
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_only_line_is_a_spacer() {
        let blocks = report_blocks(&sample_document("a\n   \t\nb"));
        assert!(matches!(body_of(&blocks)[1], Block::Spacer { .. }));
    }

    #[test]
    fn test_header_blocks_in_order() {
        let doc = sample_document("x");
        let blocks = report_blocks(&doc);
        assert_eq!(
            blocks[0],
            Block::Paragraph {
                text: doc.title.clone(),
                style: TITLE_STYLE,
            }
        );
        for (i, meta) in doc.meta_lines.iter().enumerate() {
            assert_eq!(
                blocks[i + 1],
                Block::Paragraph {
                    text: meta.clone(),
                    style: META_STYLE,
                }
            );
        }
        assert_eq!(
            blocks[6],
            Block::Spacer {
                height_pt: META_GAP_PT
            }
        );
    }

    #[test]
    fn test_markup_characters_pass_through_unescaped() {
        let blocks = report_blocks(&sample_document("Fiyat <b>önemli</b> & net"));
        assert_eq!(
            body_of(&blocks)[0],
            Block::Paragraph {
                text: "Fiyat <b>önemli</b> & net".to_string(),
                style: BODY_STYLE,
            }
        );
    }

    #[test]
    fn test_body_text_survives_layout_line_for_line() {
        let body = "Sayın Yetkili,\n\nTEKLİF KAPSAMI\nDepo süreçleri incelenecektir.";
        let pages = flow_blocks(
            &report_blocks(&sample_document(body)),
            &A4_PORTRAIT,
            &DEJAVU_SANS,
        );
        let placed: Vec<&str> = pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .filter(|l| l.font_size_pt == BODY_STYLE.font_size_pt)
            .map(|l| l.text.as_str())
            .collect();
        let expected: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(placed, expected);
    }

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let Some(font) = system_font() else {
            eprintln!("skipping: DejaVu Sans not installed");
            return;
        };
        let bytes = render_pdf(&sample_document("Line one\n\nLine two <i>&</i>"), &font).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_long_body_spans_multiple_pages() {
        let Some(font) = system_font() else {
            eprintln!("skipping: DejaVu Sans not installed");
            return;
        };
        let body = "Uzun bir paragraf satırı.\n".repeat(120);
        let doc = sample_document(&body);
        let pages = flow_blocks(&report_blocks(&doc), &A4_PORTRAIT, &DEJAVU_SANS);
        assert!(pages.len() > 1);
        let bytes = render_pdf(&doc, &font).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
