//! Axum route handlers for proposal generation.

use axum::{
    extract::{rejection::FormRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Form,
};
use tracing::info;

use crate::errors::AppError;
use crate::output::OutputFile;
use crate::proposal::models::ReportForm;
use crate::proposal::prompts::build_proposal_prompt;
use crate::render::{render, DocumentFormat, ReportDocument};
use crate::state::AppState;

/// POST /generate-pdf
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    form: Result<Form<ReportForm>, FormRejection>,
) -> Result<Response, AppError> {
    generate_document(&state, accept_form(form)?, DocumentFormat::Pdf).await
}

/// POST /generate-docx
pub async fn handle_generate_docx(
    State(state): State<AppState>,
    form: Result<Form<ReportForm>, FormRejection>,
) -> Result<Response, AppError> {
    generate_document(&state, accept_form(form)?, DocumentFormat::Docx).await
}

/// Unreadable bodies (wrong content type, bad encoding) get the same JSON
/// error envelope as a missing field instead of axum's plain-text rejection.
fn accept_form(form: Result<Form<ReportForm>, FormRejection>) -> Result<ReportForm, AppError> {
    form.map(|Form(form)| form)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Full pipeline: validate → prompt → generate → render → store → respond.
///
/// The output file is written only after rendering succeeds, so a failed
/// request never leaves a file behind.
async fn generate_document(
    state: &AppState,
    form: ReportForm,
    format: DocumentFormat,
) -> Result<Response, AppError> {
    let request = form.validate()?;

    let prompt = build_proposal_prompt(&request.brief());
    let text = state.generator.generate(&prompt).await?;

    let document = ReportDocument::new(&request, text);
    let font = state.font.clone();
    let bytes = tokio::task::spawn_blocking(move || render(format, &document, &font))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}"))
        })??;

    let output = OutputFile::write(&state.config.output_dir, format, &bytes).await?;
    info!(
        file = %output.file_name,
        format = format.extension(),
        bytes = bytes.len(),
        "Generated report"
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", output.file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}
