//! Aggregate statistics over the event log.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::webhooks::{EventFamily, EventType};

use super::record::EventRecord;

/// Counts over every record in the log.
///
/// Invariants:
/// - `data_source_events + legacy_events <= total_events` (unknown types count
///   toward neither)
/// - the values of `by_event_type` sum to `total_events`
/// - `events_with_data_source_id` counts records carrying an id, whatever their type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    pub total_events: usize,
    pub data_source_events: usize,
    pub legacy_events: usize,
    pub events_with_data_source_id: usize,
    /// Keyed by the wire string of the event type.
    pub by_event_type: BTreeMap<String, usize>,
}

impl EventStats {
    /// Computes stats over a sequence of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a EventRecord>) -> Self {
        let mut stats = EventStats::default();
        for record in records {
            stats.observe(&record.event_type, record.data_source_id.is_some());
        }
        stats
    }

    /// Folds one record into the counts.
    pub(super) fn observe(&mut self, event_type: &EventType, has_data_source_id: bool) {
        self.total_events += 1;
        match event_type.family() {
            EventFamily::DataSource => self.data_source_events += 1,
            EventFamily::Legacy => self.legacy_events += 1,
            EventFamily::Unknown => {}
        }
        if has_data_source_id {
            self.events_with_data_source_id += 1;
        }
        *self
            .by_event_type
            .entry(event_type.as_str().to_string())
            .or_insert(0) += 1;
    }
}
