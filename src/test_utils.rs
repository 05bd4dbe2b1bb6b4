//! Shared test fixtures and arbitrary generators for property-based testing.

use crate::event_log::PendingRecord;
use crate::types::{DataSourceId, EventId, ObjectId, WorkspaceId};
use crate::webhooks::{EventData, EventType, ParentRef, WebhookEvent};
use proptest::prelude::*;

/// Builds a minimal event of the given type, optionally carrying a data source id.
pub fn event_with(event_type: EventType, data_source_id: Option<&str>) -> WebhookEvent {
    WebhookEvent {
        event_type,
        event_id: EventId::new("evt_test"),
        created_at: "2025-09-03T10:00:00Z".to_string(),
        workspace_id: WorkspaceId::new("ws_test"),
        data: EventData {
            object: "database".to_string(),
            id: ObjectId::new("db_test"),
            parent: Some(ParentRef {
                kind: "workspace".to_string(),
                workspace: Some(true),
                database_id: None,
                page_id: None,
                data_source_id: data_source_id.map(DataSourceId::new),
            }),
            created_time: None,
            last_edited_time: None,
            properties: None,
        },
    }
}

pub fn arb_event_type() -> impl Strategy<Value = EventType> {
    prop_oneof![
        prop::sample::select(EventType::DATA_SOURCE.to_vec()),
        prop::sample::select(EventType::LEGACY.to_vec()),
        "(comment|file_upload|view)\\.[a-z_]{1,12}".prop_map(|s| EventType::parse(&s)),
    ]
}

/// `None`, an empty string, or a real id.
fn arb_data_source_id() -> impl Strategy<Value = Option<DataSourceId>> {
    prop_oneof![
        Just(None),
        Just(Some(DataSourceId::new(""))),
        "ds_[a-z0-9]{1,12}".prop_map(|s| Some(DataSourceId::new(s))),
    ]
}

pub fn arb_parent() -> impl Strategy<Value = Option<ParentRef>> {
    prop::option::of(
        (
            prop::sample::select(vec!["workspace", "page", "database"]),
            prop::option::of(any::<bool>()),
            arb_data_source_id(),
        )
            .prop_map(|(kind, workspace, data_source_id)| ParentRef {
                kind: kind.to_string(),
                workspace,
                database_id: None,
                page_id: None,
                data_source_id,
            }),
    )
}

pub fn arb_webhook_event() -> impl Strategy<Value = WebhookEvent> {
    (
        arb_event_type(),
        "evt_[a-z0-9]{1,12}",
        "ws_[a-z0-9]{1,8}",
        "(db|page)_[a-z0-9]{1,12}",
        arb_parent(),
    )
        .prop_map(|(event_type, event_id, workspace_id, object_id, parent)| {
            WebhookEvent {
                event_type,
                event_id: EventId::new(event_id),
                created_at: "2025-09-03T10:00:00Z".to_string(),
                workspace_id: WorkspaceId::new(workspace_id),
                data: EventData {
                    object: "database".to_string(),
                    id: ObjectId::new(object_id),
                    parent,
                    created_time: None,
                    last_edited_time: None,
                    properties: None,
                },
            }
        })
}

pub fn arb_pending_record() -> impl Strategy<Value = PendingRecord> {
    (arb_webhook_event(), prop::option::of("[a-z ]{1,20}")).prop_map(|(event, error)| {
        let pending = PendingRecord::from_event(&event);
        match error {
            Some(message) => pending.failed(message),
            None => pending,
        }
    })
}
