//! In-memory, append-only log of processed webhook deliveries.
//!
//! The log is the only shared mutable state in the service. One instance is
//! created at startup and shared by reference between the ingestor and the
//! query handlers.
//!
//! # Ordering
//!
//! Each append takes the write lock, assigns the next sequence number and a
//! `received_at` no earlier than the previous record's, and pushes the record.
//! Readers take the read lock, so they always see a complete prefix of the log
//! and never a half-written record.
//!
//! Queries return records most-recent-first.
//!
//! # Retention
//!
//! Records live for the lifetime of the process. Nothing is persisted, and
//! repeated deliveries of the same event id are stored as separate records.

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::trace;

use crate::webhooks::EventType;

pub mod record;
pub mod stats;

pub use record::{EventRecord, PendingRecord};
pub use stats::EventStats;

/// Number of records returned when a query does not specify a limit.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Filter and limit for [`EventLog::query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// Only return records of exactly this type.
    pub event_type: Option<EventType>,

    /// Maximum number of records to return.
    pub limit: usize,
}

impl Default for EventQuery {
    fn default() -> Self {
        EventQuery {
            event_type: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl EventQuery {
    pub fn new(event_type: Option<EventType>, limit: Option<usize>) -> Self {
        EventQuery {
            event_type,
            limit: limit.unwrap_or(DEFAULT_QUERY_LIMIT),
        }
    }

    /// A query returning every record.
    pub fn all() -> Self {
        EventQuery {
            event_type: None,
            limit: usize::MAX,
        }
    }

    fn matches(&self, record: &EventRecord) -> bool {
        self.event_type
            .as_ref()
            .is_none_or(|t| *t == record.event_type)
    }
}

#[derive(Default)]
struct LogState {
    records: Vec<EventRecord>,
    /// Maintained on append so `stats()` does not scan the log.
    stats: EventStats,
}

/// Concurrency-safe, insertion-ordered store of [`EventRecord`]s.
#[derive(Default)]
pub struct EventLog {
    state: RwLock<LogState>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, assigning its sequence number and `received_at`.
    ///
    /// Returns the stored record.
    pub async fn append(&self, pending: PendingRecord) -> EventRecord {
        let mut state = self.state.write().await;

        let seq = state.records.len() as u64;
        let now = Utc::now();
        // Clamp so a wall-clock step backwards cannot reorder records.
        let received_at = match state.records.last() {
            Some(last) if last.received_at > now => last.received_at,
            _ => now,
        };

        let record = pending.into_record(seq, received_at);
        state
            .stats
            .observe(&record.event_type, record.data_source_id.is_some());
        state.records.push(record.clone());

        trace!(seq, event_id = %record.event_id, "Appended event record");
        record
    }

    /// Returns matching records, most recent first, up to `query.limit`.
    pub async fn query(&self, query: &EventQuery) -> Vec<EventRecord> {
        let state = self.state.read().await;
        state
            .records
            .iter()
            .rev()
            .filter(|r| query.matches(r))
            .take(query.limit)
            .cloned()
            .collect()
    }

    /// Returns aggregate counts over the whole log.
    pub async fn stats(&self) -> EventStats {
        self.state.read().await.stats.clone()
    }

    /// Returns the number of records in the log.
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
