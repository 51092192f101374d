pub mod health;
pub mod ui;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::proposal::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(health::status_handler))
        .route("/ui", get(ui::ui_handler))
        .route("/generate-pdf", post(handlers::handle_generate_pdf))
        .route("/generate-docx", post(handlers::handle_generate_docx))
        .nest_service("/static", static_files)
        .with_state(state)
}
