//! Event taxonomy classification.
//!
//! Classification answers two questions about a delivery:
//!
//! - which family its declared `type` belongs to (data source, legacy, or neither)
//! - whether it carries a data source id under `data.parent`
//!
//! The two are independent. A legacy-typed event from a workspace mid-migration
//! may already carry a `data_source_id`, and the id is surfaced regardless.
//! Classification is advisory: unknown types are classified as neither family,
//! never rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::DataSourceId;

use super::events::{EventFamily, EventType, WebhookEvent};

/// Result of classifying one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The declared type is one of the six `data_source.*` types.
    pub is_data_source_event: bool,

    /// The declared type is one of the four legacy types.
    pub is_legacy_event: bool,

    /// `data.parent.data_source_id`, when present and non-empty.
    pub data_source_id: Option<DataSourceId>,
}

/// A classification step failed.
#[derive(Debug, Clone, Error)]
#[error("classification failed: {0}")]
pub struct ClassifyError(pub String);

/// Classifies webhook events.
///
/// [`EventClassifier`] is the production implementation and never fails. The
/// trait lets the ingestor be driven with other classifiers.
pub trait Classifier: Send + Sync {
    fn classify(&self, event: &WebhookEvent) -> Result<Classification, ClassifyError>;
}

/// Classifies by declared type and `data.parent.data_source_id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventClassifier;

impl Classifier for EventClassifier {
    fn classify(&self, event: &WebhookEvent) -> Result<Classification, ClassifyError> {
        Ok(classify_event(event))
    }
}

/// Returns true if the type belongs to the data source family.
pub fn is_data_source_event(event_type: &EventType) -> bool {
    event_type.family() == EventFamily::DataSource
}

/// Returns true if the type belongs to the legacy family.
pub fn is_legacy_event(event_type: &EventType) -> bool {
    event_type.family() == EventFamily::Legacy
}

/// Classifies an event.
///
/// # Examples
///
/// ```
/// use notion_webhooks::webhooks::{classify_event, parse_event};
///
/// let event = parse_event(br#"{
///     "type": "database.updated",
///     "event_id": "evt_1",
///     "created_at": "2025-09-03T10:00:00Z",
///     "workspace_id": "ws_1",
///     "data": {
///         "object": "database",
///         "id": "db_1",
///         "parent": {"type": "workspace", "workspace": true, "data_source_id": "ds_x"}
///     }
/// }"#).unwrap();
///
/// let c = classify_event(&event);
/// assert!(c.is_legacy_event);
/// assert!(!c.is_data_source_event);
/// assert_eq!(c.data_source_id.unwrap().as_str(), "ds_x");
/// ```
pub fn classify_event(event: &WebhookEvent) -> Classification {
    Classification {
        is_data_source_event: is_data_source_event(&event.event_type),
        is_legacy_event: is_legacy_event(&event.event_type),
        data_source_id: event.data_source_id().cloned(),
    }
}
