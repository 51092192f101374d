//! Word (DOCX) renderer.
//!
//! Unlike the PDF renderer, every body line becomes a paragraph, blank lines
//! included: an empty line in the generated text is an empty paragraph here.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use crate::render::{RenderError, ReportDocument};

const HEADING_STYLE_ID: &str = "Heading1";
const TITLE_SIZE_PT: usize = 16;
const META_SIZE_PT: usize = 10;
const BODY_SIZE_PT: usize = 11;

/// A single planned Word paragraph with one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordParagraph {
    pub text: String,
    /// `None` for a separator paragraph carrying no run.
    pub size_pt: Option<usize>,
    pub heading: bool,
}

impl WordParagraph {
    fn run(text: &str, size_pt: usize) -> Self {
        Self {
            text: text.to_string(),
            size_pt: Some(size_pt),
            heading: false,
        }
    }
}

/// Heading, metadata paragraphs, one empty separator, then one paragraph per body line.
pub fn report_paragraphs(document: &ReportDocument) -> Vec<WordParagraph> {
    let mut paragraphs = Vec::with_capacity(document.meta_lines.len() + 8);

    paragraphs.push(WordParagraph {
        heading: true,
        ..WordParagraph::run(&document.title, TITLE_SIZE_PT)
    });
    for meta in &document.meta_lines {
        paragraphs.push(WordParagraph::run(meta, META_SIZE_PT));
    }
    paragraphs.push(WordParagraph {
        text: String::new(),
        size_pt: None,
        heading: false,
    });

    paragraphs.extend(
        document
            .body_lines()
            .map(|line| WordParagraph::run(line, BODY_SIZE_PT)),
    );
    paragraphs
}

pub fn render_docx(document: &ReportDocument) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new().add_style(
        Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
            .name("Heading 1")
            .bold(),
    );

    for planned in report_paragraphs(document) {
        let mut paragraph = Paragraph::new();
        if let Some(size_pt) = planned.size_pt {
            // docx sizes are half-points
            paragraph = paragraph.add_run(Run::new().add_text(planned.text).size(size_pt * 2));
        }
        if planned.heading {
            paragraph = paragraph.style(HEADING_STYLE_ID);
        }
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}
