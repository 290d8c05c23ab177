// ============================
// crates/backend-lib/src/handlers/health.rs
// ============================
//! Liveness probe.
use axum::Json;
use serde_json::{json, Value};

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": "suburbsight-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}
