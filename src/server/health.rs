//! Health check endpoint for liveness probes.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// False when running without `NOTION_WEBHOOK_SECRET`.
    pub signature_verification: bool,
}

/// Health check handler.
///
/// # Example
///
/// ```ignore
/// GET /health HTTP/1.1
///
/// HTTP/1.1 200 OK
/// Content-Type: application/json
///
/// {"status": "ok", "version": "0.1.0", "signature_verification": true}
/// ```
pub async fn health_handler(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        signature_verification: app_state.ingestor().verifies_signatures(),
    })
}
