//! HTTP server for the webhook ingestion service.
//!
//! # Endpoints
//!
//! - `POST /webhooks/notion` - Accepts Notion webhook deliveries (returns 200 with classification)
//! - `GET /webhooks/events` - Lists logged events, optionally filtered by type
//! - `GET /webhooks/stats` - Aggregate counts over the log
//! - `GET /health` - Returns 200 if the server is running
//!
//! Error responses carry a JSON body of the form `{"detail": "<message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::event_log::EventLog;
use crate::ingest::WebhookIngestor;

pub mod events;
pub mod health;
pub mod webhook;

pub use events::{events_handler, stats_handler};
pub use health::health_handler;
pub use webhook::notion_webhook_handler;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor. The ingestor
/// and the query handlers share one [`EventLog`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    ingestor: WebhookIngestor,

    /// Upper bound applied to `limit` on `/webhooks/events`.
    max_query_limit: usize,
}

impl AppState {
    /// Creates a new `AppState` around an ingestor.
    pub fn new(ingestor: WebhookIngestor, max_query_limit: usize) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                ingestor,
                max_query_limit,
            }),
        }
    }

    /// Creates state from configuration, appending to `log`.
    pub fn from_config(config: &Config, log: Arc<EventLog>) -> Self {
        let ingestor = WebhookIngestor::new(log, config.webhook_secret.clone());
        AppState::new(ingestor, config.max_query_limit)
    }

    pub fn ingestor(&self) -> &WebhookIngestor {
        &self.inner.ingestor
    }

    /// Returns the shared event log.
    pub fn log(&self) -> &EventLog {
        self.inner.ingestor.log()
    }

    pub fn max_query_limit(&self) -> usize {
        self.inner.max_query_limit
    }
}

/// Builds an error response with a `{"detail": ...}` body.
pub(crate) fn error_response(status: StatusCode, detail: String) -> Response {
    (status, Json(serde_json::json!({ "detail": detail }))).into_response()
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhooks/notion", post(notion_webhook_handler))
        .route("/webhooks/events", get(events_handler))
        .route("/webhooks/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
