//! Per-delivery ingestion pipeline.
//!
//! Each inbound delivery moves through:
//!
//! ```text
//! Received ─► signature check ─► shape validation ─► classified ─► logged ─► acknowledged
//!                  │                    │                 │
//!                  ▼                    ▼                 ▼
//!            401 (not logged)     400 (not logged)   500 (logged, processed=false)
//! ```
//!
//! Rejected deliveries are never logged: unauthenticated or malformed traffic
//! must not fill the log. Once a payload has passed validation a record is
//! always appended, even if classification fails afterwards.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::event_log::{EventLog, PendingRecord};
use crate::types::{DataSourceId, EventId};
use crate::webhooks::{
    Classifier, ClassifyError, EventClassifier, EventType, ParseError, WebhookSecret, parse_event,
    verify_signature,
};

/// Header carrying the HMAC-SHA256 signature.
pub const HEADER_SIGNATURE: &str = "notion-signature";
/// Header carrying the timestamp that prefixes the signed message.
pub const HEADER_TIMESTAMP: &str = "notion-timestamp";

/// Errors that end a delivery without an acknowledgment.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Signature missing or wrong while a secret is configured.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Body is not a well-formed webhook event.
    #[error("Invalid webhook payload: {0}")]
    MalformedPayload(#[from] ParseError),

    /// The event was valid and logged, but processing it failed.
    #[error("Failed to process webhook event {event_id}: {source}")]
    Processing {
        event_id: EventId,
        #[source]
        source: ClassifyError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Success,
}

/// Response body for an accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    pub status: AckStatus,
    pub event_id: EventId,
    pub event_type: EventType,
    pub data_source_id: Option<DataSourceId>,
    pub is_data_source_event: bool,
    pub is_legacy_event: bool,
}

/// Verifies, validates, classifies and logs webhook deliveries.
#[derive(Clone)]
pub struct WebhookIngestor {
    secret: Option<WebhookSecret>,
    classifier: Arc<dyn Classifier>,
    log: Arc<EventLog>,
}

impl WebhookIngestor {
    /// Creates an ingestor that appends to `log`.
    ///
    /// With `secret` set to `None`, signature verification is skipped.
    pub fn new(log: Arc<EventLog>, secret: Option<WebhookSecret>) -> Self {
        WebhookIngestor {
            secret,
            classifier: Arc::new(EventClassifier),
            log,
        }
    }

    /// Replaces the classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Returns the log this ingestor appends to.
    pub fn log(&self) -> &Arc<EventLog> {
        &self.log
    }

    /// Returns true if deliveries must carry a valid signature.
    pub fn verifies_signatures(&self) -> bool {
        self.secret.is_some()
    }

    /// Handles one delivery.
    ///
    /// `body` must be the raw request body: the signature covers its exact bytes.
    #[instrument(skip_all)]
    pub async fn handle(
        &self,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<Acknowledgment, IngestError> {
        let timestamp = headers.get(HEADER_TIMESTAMP).map(|v| v.as_bytes());
        let signature = headers
            .get(HEADER_SIGNATURE)
            .and_then(|v| v.to_str().ok());

        // Verify before parsing so unauthenticated bodies are never inspected.
        if !verify_signature(self.secret.as_ref(), timestamp, body, signature) {
            warn!(
                has_timestamp = timestamp.is_some(),
                has_signature = signature.is_some(),
                "Invalid webhook signature"
            );
            return Err(IngestError::InvalidSignature);
        }

        let event = parse_event(body).map_err(|e| {
            warn!(error = %e, "Invalid webhook payload");
            IngestError::MalformedPayload(e)
        })?;

        debug!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            workspace_id = %event.workspace_id,
            "Received webhook"
        );

        let pending = PendingRecord::from_event(&event);

        match self.classifier.classify(&event) {
            Ok(classification) => {
                let pending = pending.with_data_source_id(classification.data_source_id);
                let record = self.log.append(pending).await;
                info!(
                    seq = record.seq,
                    event_id = %record.event_id,
                    event_type = %record.event_type,
                    data_source_id = ?record.data_source_id,
                    is_data_source_event = classification.is_data_source_event,
                    is_legacy_event = classification.is_legacy_event,
                    "Webhook processed"
                );

                Ok(Acknowledgment {
                    status: AckStatus::Success,
                    event_id: event.event_id,
                    event_type: event.event_type,
                    data_source_id: record.data_source_id,
                    is_data_source_event: classification.is_data_source_event,
                    is_legacy_event: classification.is_legacy_event,
                })
            }
            Err(e) => {
                let record = self.log.append(pending.failed(e.to_string())).await;
                error!(
                    seq = record.seq,
                    event_id = %record.event_id,
                    error = %e,
                    "Webhook processing failed"
                );

                Err(IngestError::Processing {
                    event_id: event.event_id,
                    source: e,
                })
            }
        }
    }
}
