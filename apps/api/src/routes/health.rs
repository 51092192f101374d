use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Returns a simple status object.
pub async fn status_handler() -> Json<Value> {
    Json(json!({
        "status": "API çalışıyor 🚀"
    }))
}
