//! Stored representation of a processed delivery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DataSourceId, EventId, ObjectId, WorkspaceId};
use crate::webhooks::{EventType, WebhookEvent};

/// A processed webhook delivery, as stored in the [`EventLog`](super::EventLog).
///
/// Records are created once, at append time, and never mutated.
///
/// Example JSON:
/// ```json
/// {"seq":0,"event_id":"evt_1","event_type":"page.created","workspace_id":"ws_1",
///  "data_source_id":null,"object_id":"page_1","received_at":"2025-09-03T10:00:00.123Z",
///  "processed":true,"error":null}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 0. Assigned at append time.
    pub seq: u64,

    pub event_id: EventId,

    pub event_type: EventType,

    pub workspace_id: WorkspaceId,

    /// Copied from `data.parent.data_source_id`; present only if that was non-empty.
    pub data_source_id: Option<DataSourceId>,

    /// Copied from `data.id`.
    pub object_id: ObjectId,

    /// Server-assigned; non-decreasing in `seq` order.
    pub received_at: DateTime<Utc>,

    pub processed: bool,

    pub error: Option<String>,
}

/// A record waiting to be appended.
///
/// The log assigns `seq` and `received_at` when it appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    pub event_id: EventId,
    pub event_type: EventType,
    pub workspace_id: WorkspaceId,
    pub data_source_id: Option<DataSourceId>,
    pub object_id: ObjectId,
    pub processed: bool,
    pub error: Option<String>,
}

impl PendingRecord {
    /// Builds a successfully processed record from an event.
    pub fn from_event(event: &WebhookEvent) -> Self {
        PendingRecord {
            event_id: event.event_id.clone(),
            event_type: event.event_type.clone(),
            workspace_id: event.workspace_id.clone(),
            data_source_id: event.data_source_id().cloned(),
            object_id: event.data.id.clone(),
            processed: true,
            error: None,
        }
    }

    /// Replaces the data source id, e.g. with the one a classifier settled on.
    pub fn with_data_source_id(mut self, data_source_id: Option<DataSourceId>) -> Self {
        self.data_source_id = data_source_id;
        self
    }

    /// Marks the record as failed with the given error message.
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.processed = false;
        self.error = Some(error.into());
        self
    }

    pub(super) fn into_record(self, seq: u64, received_at: DateTime<Utc>) -> EventRecord {
        EventRecord {
            seq,
            event_id: self.event_id,
            event_type: self.event_type,
            workspace_id: self.workspace_id,
            data_source_id: self.data_source_id,
            object_id: self.object_id,
            received_at,
            processed: self.processed,
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::event_with;

    #[test]
    fn from_event_copies_identifiers() {
        let event = event_with(EventType::DataSourceSchemaUpdated, Some("ds_multi_002"));
        let pending = PendingRecord::from_event(&event);

        assert_eq!(pending.event_id, event.event_id);
        assert_eq!(pending.event_type, EventType::DataSourceSchemaUpdated);
        assert_eq!(pending.workspace_id, event.workspace_id);
        assert_eq!(pending.object_id, event.data.id);
        assert_eq!(
            pending.data_source_id,
            Some(DataSourceId::new("ds_multi_002"))
        );
        assert!(pending.processed);
        assert_eq!(pending.error, None);
    }

    #[test]
    fn failed_clears_processed_flag() {
        let event = event_with(EventType::PageUpdated, None);
        let pending = PendingRecord::from_event(&event).failed("boom");

        assert!(!pending.processed);
        assert_eq!(pending.error.as_deref(), Some("boom"));
    }

    #[test]
    fn serializes_null_optionals() {
        let event = event_with(EventType::DatabaseUpdated, None);
        let record = PendingRecord::from_event(&event).into_record(3, Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["seq"], 3);
        assert_eq!(json["event_type"], "database.updated");
        assert!(json["data_source_id"].is_null());
        assert!(json["error"].is_null());
        assert_eq!(json["processed"], true);
    }
}
