//! Notion webhook event types.
//!
//! Notion delivers events from two overlapping taxonomies:
//!
//! - the legacy schema (`database.updated`, `page.*`), and
//! - the multi-source database schema (`data_source.*`), introduced with API
//!   version 2025-09-03.
//!
//! A workspace migrating between the two can send both. Event types outside
//! either family are still accepted and carried as [`EventType::Other`], so a new
//! event type added by Notion never causes deliveries to bounce.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::types::{DataSourceId, EventId, ObjectId, WorkspaceId};

/// Which taxonomy an event type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFamily {
    /// `data_source.*` events.
    DataSource,
    /// `database.updated` and `page.*` events.
    Legacy,
    /// Anything else.
    Unknown,
}

/// The declared `type` of a webhook event.
///
/// Serialized as the wire string, e.g. `"data_source.content_updated"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    DataSourceContentUpdated,
    DataSourceSchemaUpdated,
    DataSourceCreated,
    DataSourceMoved,
    DataSourceDeleted,
    DataSourceUndeleted,
    DatabaseUpdated,
    PageCreated,
    PageUpdated,
    PageDeleted,
    /// A type string this service does not know about, kept verbatim.
    Other(String),
}

impl EventType {
    /// All event types of the data source family.
    pub const DATA_SOURCE: [EventType; 6] = [
        EventType::DataSourceContentUpdated,
        EventType::DataSourceSchemaUpdated,
        EventType::DataSourceCreated,
        EventType::DataSourceMoved,
        EventType::DataSourceDeleted,
        EventType::DataSourceUndeleted,
    ];

    /// All event types of the legacy family.
    pub const LEGACY: [EventType; 4] = [
        EventType::DatabaseUpdated,
        EventType::PageCreated,
        EventType::PageUpdated,
        EventType::PageDeleted,
    ];

    /// Parses a wire string. Never fails; unrecognized strings become `Other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "data_source.content_updated" => EventType::DataSourceContentUpdated,
            "data_source.schema_updated" => EventType::DataSourceSchemaUpdated,
            "data_source.created" => EventType::DataSourceCreated,
            "data_source.moved" => EventType::DataSourceMoved,
            "data_source.deleted" => EventType::DataSourceDeleted,
            "data_source.undeleted" => EventType::DataSourceUndeleted,
            "database.updated" => EventType::DatabaseUpdated,
            "page.created" => EventType::PageCreated,
            "page.updated" => EventType::PageUpdated,
            "page.deleted" => EventType::PageDeleted,
            other => EventType::Other(other.to_string()),
        }
    }

    /// Returns the wire string for this type.
    pub fn as_str(&self) -> &str {
        match self {
            EventType::DataSourceContentUpdated => "data_source.content_updated",
            EventType::DataSourceSchemaUpdated => "data_source.schema_updated",
            EventType::DataSourceCreated => "data_source.created",
            EventType::DataSourceMoved => "data_source.moved",
            EventType::DataSourceDeleted => "data_source.deleted",
            EventType::DataSourceUndeleted => "data_source.undeleted",
            EventType::DatabaseUpdated => "database.updated",
            EventType::PageCreated => "page.created",
            EventType::PageUpdated => "page.updated",
            EventType::PageDeleted => "page.deleted",
            EventType::Other(s) => s,
        }
    }

    /// Returns the taxonomy this type belongs to.
    pub fn family(&self) -> EventFamily {
        match self {
            EventType::DataSourceContentUpdated
            | EventType::DataSourceSchemaUpdated
            | EventType::DataSourceCreated
            | EventType::DataSourceMoved
            | EventType::DataSourceDeleted
            | EventType::DataSourceUndeleted => EventFamily::DataSource,
            EventType::DatabaseUpdated
            | EventType::PageCreated
            | EventType::PageUpdated
            | EventType::PageDeleted => EventFamily::Legacy,
            EventType::Other(_) => EventFamily::Unknown,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        EventType::parse(s)
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EventType::parse(&s))
    }
}

/// The parent of the object an event refers to (`data.parent`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    /// Parent kind, e.g. `"workspace"`, `"page"`, `"database"`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub workspace: Option<bool>,

    #[serde(default)]
    pub database_id: Option<String>,

    #[serde(default)]
    pub page_id: Option<String>,

    /// Only present on payloads from the multi-source schema.
    #[serde(default)]
    pub data_source_id: Option<DataSourceId>,
}

/// The `data` object of a webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    /// Object kind, e.g. `"database"` or `"page"`.
    pub object: String,

    pub id: ObjectId,

    #[serde(default)]
    pub parent: Option<ParentRef>,

    #[serde(default)]
    pub created_time: Option<String>,

    #[serde(default)]
    pub last_edited_time: Option<String>,

    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A webhook event as received from Notion.
///
/// Example JSON:
/// ```json
/// {
///   "type": "data_source.content_updated",
///   "event_id": "evt_123",
///   "created_at": "2025-09-03T10:00:00Z",
///   "workspace_id": "ws_abc",
///   "data": {
///     "object": "database",
///     "id": "db_789",
///     "parent": {"type": "workspace", "workspace": true, "data_source_id": "ds_001"}
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,

    pub event_id: EventId,

    /// Sender timestamp, kept verbatim.
    pub created_at: String,

    pub workspace_id: WorkspaceId,

    pub data: EventData,
}

impl WebhookEvent {
    /// Returns `data.parent.data_source_id`, treating an empty string as absent.
    pub fn data_source_id(&self) -> Option<&DataSourceId> {
        self.data
            .parent
            .as_ref()
            .and_then(|p| p.data_source_id.as_ref())
            .filter(|id| !id.as_str().is_empty())
    }
}
