//! Read-side endpoints over the event log.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{AppState, error_response};
use crate::event_log::{EventQuery, EventRecord, EventStats};
use crate::webhooks::EventType;

/// Errors from the events endpoint.
#[derive(Debug, Error)]
pub enum EventsQueryError {
    /// Query string could not be parsed (e.g. a non-integer `limit`).
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(#[from] QueryRejection),
}

impl IntoResponse for EventsQueryError {
    fn into_response(self) -> Response {
        match &self {
            EventsQueryError::InvalidQuery(_) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
        }
    }
}

/// Query parameters for `GET /webhooks/events`.
#[derive(Debug, Default, Deserialize)]
pub struct EventsParams {
    /// Exact match against the event type wire string. Empty is treated as absent.
    pub event_type: Option<String>,
    pub limit: Option<usize>,
}

/// Response body for `GET /webhooks/events`.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    /// Number of records in `events`.
    pub total: usize,
    /// Most recent first.
    pub events: Vec<EventRecord>,
}

/// Lists logged events, most recent first.
///
/// # Query Parameters
///
/// - `event_type` - only return events of this type (empty means unfiltered)
/// - `limit` - maximum number of events (default 50, clamped to the configured maximum)
///
/// # Response
///
/// - 200 OK with `{"total": n, "events": [...]}`
/// - 400 Bad Request if `limit` is not a non-negative integer
pub async fn events_handler(
    State(app_state): State<AppState>,
    params: Result<Query<EventsParams>, QueryRejection>,
) -> Result<Json<EventsResponse>, EventsQueryError> {
    let Query(params) = params?;

    let mut query = EventQuery::new(
        params
            .event_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(EventType::parse),
        params.limit,
    );
    query.limit = query.limit.min(app_state.max_query_limit());

    let events = app_state.log().query(&query).await;
    debug!(
        event_type = ?query.event_type,
        limit = query.limit,
        returned = events.len(),
        "Listed webhook events"
    );

    Ok(Json(EventsResponse {
        total: events.len(),
        events,
    }))
}

/// Returns aggregate counts over the whole log.
///
/// # Example
///
/// ```ignore
/// GET /webhooks/stats HTTP/1.1
///
/// HTTP/1.1 200 OK
///
/// {"total_events": 5, "data_source_events": 3, "legacy_events": 2,
///  "events_with_data_source_id": 3,
///  "by_event_type": {"data_source.content_updated": 3, "database.updated": 2}}
/// ```
pub async fn stats_handler(State(app_state): State<AppState>) -> Json<EventStats> {
    Json(app_state.log().stats().await)
}
