use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /health
/// Returns service status, crate version and the current UTC timestamp.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}
