//! Document rendering — turns a `ReportDocument` into PDF or DOCX bytes.
//!
//! Both renderers are synchronous and CPU-bound. Handlers call `render`
//! through `tokio::task::spawn_blocking`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use thiserror::Error;

use crate::proposal::models::ReportRequest;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX error: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Everything a renderer lays out: title, labelled metadata and generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    /// `"<label>: <value>"` lines in fixed order.
    pub meta_lines: Vec<String>,
    pub body: String,
}

impl ReportDocument {
    pub fn new(request: &ReportRequest, body: String) -> Self {
        let meta_lines = [
            ("Kurum / Şirket", &request.company_name),
            ("Hazırlayan", &request.prepared_by),
            ("Hitap Edilen Birim", &request.target_unit),
            ("Tarih", &request.report_date),
            ("Rapor No / Versiyon", &request.report_version),
        ]
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();

        Self {
            title: request.report_title.clone(),
            meta_lines,
            body,
        }
    }

    /// Body split on line breaks, with any trailing `\r` removed.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

/// TrueType font bytes loaded once at startup and embedded in every PDF.
#[derive(Debug, Clone)]
pub struct FontAsset {
    bytes: Arc<Vec<u8>>,
}

impl FontAsset {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("font file '{}' could not be read", path.display()))?;
        Self::from_bytes(bytes).with_context(|| format!("font file '{}'", path.display()))
    }

    /// Accepts the bytes only if the face parses, so a corrupt font fails at
    /// startup rather than on every PDF request.
    pub fn from_bytes(bytes: Vec<u8>) -> anyhow::Result<Self> {
        // TrueType (0x00010000 or 'true') and CFF-flavoured OpenType ('OTTO').
        match bytes.get(..4) {
            Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true") | Some(b"OTTO") => {}
            _ => bail!("not a TrueType/OpenType font"),
        }
        pdf::check_font(&bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
        })
    }

    /// Skips face parsing; for tests that never reach the PDF writer or that
    /// exercise its failure path.
    #[cfg(test)]
    pub(crate) fn unchecked(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Renders the document in the requested format.
pub fn render(
    format: DocumentFormat,
    document: &ReportDocument,
    font: &FontAsset,
) -> Result<Vec<u8>, RenderError> {
    match format {
        DocumentFormat::Pdf => pdf::render_pdf(document, font),
        DocumentFormat::Docx => docx::render_docx(document),
    }
}
