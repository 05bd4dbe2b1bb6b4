//! Notion webhook payload parser.
//!
//! Parses a raw request body into a typed [`WebhookEvent`]. Shape problems
//! (invalid JSON, missing required fields, wrong field types) are reported as
//! [`ParseError`]. An unrecognized `type` is not a shape problem: it parses to
//! [`EventType::Other`](super::events::EventType::Other), and that includes
//! the empty string. Empty identifiers are likewise carried through as-is.
//!
//! Required fields: `type`, `event_id`, `created_at`, `workspace_id`,
//! `data.object`, `data.id`, and `data.parent.type` when `data.parent` is present.

use thiserror::Error;

use super::events::WebhookEvent;

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a webhook payload into a typed event.
///
/// # Examples
///
/// ```
/// use notion_webhooks::webhooks::{EventType, parse_event};
///
/// let payload = br#"{
///     "type": "page.created",
///     "event_id": "evt_1",
///     "created_at": "2025-09-03T10:00:00Z",
///     "workspace_id": "ws_1",
///     "data": { "object": "page", "id": "page_1" }
/// }"#;
///
/// let event = parse_event(payload).unwrap();
/// assert_eq!(event.event_type, EventType::PageCreated);
/// ```
pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent, ParseError> {
    Ok(serde_json::from_slice(payload)?)
}
