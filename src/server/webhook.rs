//! Webhook endpoint handler.
//!
//! Accepts Notion webhook deliveries and runs them through the
//! [`WebhookIngestor`](crate::ingest::WebhookIngestor) synchronously; the
//! response reports how the event was classified.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use super::{AppState, error_response};
use crate::ingest::{Acknowledgment, IngestError};

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = match &self {
            IngestError::InvalidSignature => StatusCode::UNAUTHORIZED,
            IngestError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            IngestError::Processing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error_response(status, self.to_string())
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Optional headers (required when a secret is configured):
///   - `notion-timestamp`: prefixed to the body in the signed message
///   - `notion-signature`: HMAC-SHA256 of `timestamp:body`
/// - Body: JSON webhook event
///
/// # Response
///
/// - 200 OK: event logged; body is an [`Acknowledgment`]
/// - 400 Bad Request: body is not a valid webhook event
/// - 401 Unauthorized: invalid signature
/// - 500 Internal Server Error: event logged as unprocessed
///
/// # Example
///
/// ```ignore
/// POST /webhooks/notion HTTP/1.1
/// Content-Type: application/json
///
/// {"type": "data_source.content_updated", "event_id": "evt_1", ...}
///
/// HTTP/1.1 200 OK
///
/// {"status": "success", "event_id": "evt_1", "event_type": "data_source.content_updated",
///  "data_source_id": "ds_multi_001", "is_data_source_event": true, "is_legacy_event": false}
/// ```
pub async fn notion_webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Acknowledgment>, IngestError> {
    app_state.ingestor().handle(&headers, &body).await.map(Json)
}
