use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /ui
/// Serves the form page. The template is read per request so it can be edited in place.
pub async fn ui_handler(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.config.templates_dir.join("index.html");
    let page = tokio::fs::read_to_string(&path).await?;
    Ok(Html(page))
}
