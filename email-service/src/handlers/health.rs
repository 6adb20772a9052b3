use axum::Json;
use serde_json::json;

/// Liveness probe.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "email-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
