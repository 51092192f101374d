//! Block flow — places paragraphs and spacers onto fixed-size pages.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner, so a
//! line's `baseline_pt` is its distance from the bottom edge. Each paragraph
//! line consumes `leading_pt` of vertical space; `space_after_pt` follows the
//! paragraph. A spacer that does not fit ends the page and is dropped, and
//! spacers at the top of a fresh page are skipped.

use crate::layout::font_metrics::FontMetricTable;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

/// A4 with 40pt margins on all sides.
pub const A4_PORTRAIT: PageGeometry = PageGeometry {
    width_pt: 595.28,
    height_pt: 841.89,
    margin_pt: 40.0,
};

impl PageGeometry {
    pub fn text_width_pt(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    fn top_pt(&self) -> f32 {
        self.height_pt - self.margin_pt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size_pt: f32,
    pub leading_pt: f32,
    pub space_after_pt: f32,
    pub align: Align,
}

/// One unit of vertical layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph { text: String, style: TextStyle },
    Spacer { height_pt: f32 },
}

/// A single wrapped line at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_pt: f32,
    pub baseline_pt: f32,
    pub font_size_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Flows `blocks` onto as many pages as needed. Always returns at least one page.
pub fn flow_blocks(
    blocks: &[Block],
    geometry: &PageGeometry,
    metrics: &FontMetricTable,
) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut cursor = geometry.top_pt();
    let bottom = geometry.margin_pt;
    let text_width = geometry.text_width_pt();

    for block in blocks {
        match block {
            Block::Spacer { height_pt } => {
                if cursor >= geometry.top_pt() {
                    continue;
                }
                if cursor - height_pt < bottom {
                    pages.push(Page::default());
                    cursor = geometry.top_pt();
                } else {
                    cursor -= height_pt;
                }
            }
            Block::Paragraph { text, style } => {
                let max_width_em = text_width / style.font_size_pt;
                for line in metrics.wrap(text, max_width_em) {
                    if cursor - style.leading_pt < bottom && cursor < geometry.top_pt() {
                        pages.push(Page::default());
                        cursor = geometry.top_pt();
                    }

                    let line_width = metrics.measure_str(&line) * style.font_size_pt;
                    let x_pt = match style.align {
                        Align::Left => geometry.margin_pt,
                        Align::Center => {
                            geometry.margin_pt + ((text_width - line_width) / 2.0).max(0.0)
                        }
                    };
                    // Baseline sits one font size below the top of the line box.
                    let baseline_pt = cursor - style.font_size_pt;

                    if let Some(page) = pages.last_mut() {
                        page.lines.push(PlacedLine {
                            text: line,
                            x_pt,
                            baseline_pt,
                            font_size_pt: style.font_size_pt,
                        });
                    }
                    cursor -= style.leading_pt;
                }
                cursor -= style.space_after_pt;
            }
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::DEJAVU_SANS;

    const BODY: TextStyle = TextStyle {
        font_size_pt: 11.0,
        leading_pt: 16.0,
        space_after_pt: 10.0,
        align: Align::Left,
    };

    fn para(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_string(),
            style: BODY,
        }
    }

    #[test]
    fn test_empty_input_yields_single_blank_page() {
        let pages = flow_blocks(&[], &A4_PORTRAIT, &DEJAVU_SANS);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_lines_descend_and_stay_inside_margins() {
        let blocks = vec![para("Birinci satır"), para("İkinci satır")];
        let pages = flow_blocks(&blocks, &A4_PORTRAIT, &DEJAVU_SANS);
        let lines = &pages[0].lines;
        assert_eq!(lines.len(), 2);
        assert!(lines[0].baseline_pt > lines[1].baseline_pt);
        // leading + space_after between consecutive single-line paragraphs
        assert!((lines[0].baseline_pt - lines[1].baseline_pt - 26.0).abs() < 1e-3);
        for line in lines {
            assert_eq!(line.x_pt, A4_PORTRAIT.margin_pt);
            assert!(line.baseline_pt < A4_PORTRAIT.height_pt - A4_PORTRAIT.margin_pt);
            assert!(line.baseline_pt > A4_PORTRAIT.margin_pt);
        }
    }

    #[test]
    fn test_spacer_adds_vertical_gap() {
        let with_spacer = vec![para("a"), Block::Spacer { height_pt: 10.0 }, para("b")];
        let without = vec![para("a"), para("b")];
        let a = flow_blocks(&with_spacer, &A4_PORTRAIT, &DEJAVU_SANS);
        let b = flow_blocks(&without, &A4_PORTRAIT, &DEJAVU_SANS);
        let gap_with = a[0].lines[0].baseline_pt - a[0].lines[1].baseline_pt;
        let gap_without = b[0].lines[0].baseline_pt - b[0].lines[1].baseline_pt;
        assert!((gap_with - gap_without - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_centered_line_is_offset_from_margin() {
        let blocks = vec![Block::Paragraph {
            text: "Başlık".to_string(),
            style: TextStyle {
                font_size_pt: 16.0,
                leading_pt: 22.0,
                space_after_pt: 16.0,
                align: Align::Center,
            },
        }];
        let pages = flow_blocks(&blocks, &A4_PORTRAIT, &DEJAVU_SANS);
        let line = &pages[0].lines[0];
        let width = DEJAVU_SANS.measure_str("Başlık") * 16.0;
        let expected = A4_PORTRAIT.margin_pt + (A4_PORTRAIT.text_width_pt() - width) / 2.0;
        assert!((line.x_pt - expected).abs() < 1e-3);
    }

    #[test]
    fn test_overflow_starts_new_page() {
        let blocks: Vec<Block> = (0..80).map(|i| para(&format!("Satır {i}"))).collect();
        let pages = flow_blocks(&blocks, &A4_PORTRAIT, &DEJAVU_SANS);
        assert!(pages.len() >= 2);
        let total: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(total, 80);
        for page in &pages {
            for line in &page.lines {
                assert!(line.baseline_pt >= A4_PORTRAIT.margin_pt - BODY.leading_pt);
            }
        }
        // Order is preserved across the page break.
        let texts: Vec<&str> = pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.text.as_str()))
            .collect();
        assert_eq!(texts[0], "Satır 0");
        assert_eq!(texts[79], "Satır 79");
    }

    #[test]
    fn test_leading_spacer_on_fresh_page_is_skipped() {
        let pages = flow_blocks(
            &[Block::Spacer { height_pt: 30.0 }, para("a")],
            &A4_PORTRAIT,
            &DEJAVU_SANS,
        );
        let top = A4_PORTRAIT.height_pt - A4_PORTRAIT.margin_pt;
        assert!((pages[0].lines[0].baseline_pt - (top - 11.0)).abs() < 1e-3);
    }
}
