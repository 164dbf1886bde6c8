//! Session grouping: stable partition of a flat event collection.
//!
//! Grouping is a partition, not a sort: events keep their relative input
//! order within each bucket, and session keys are remembered in the order
//! they were first encountered. Discovery order is what keeps session
//! markers in a stable left-to-right position across repeated runs on the
//! same input.

use std::collections::HashMap;

use flowline_contracts::LogEvent;

/// Per-session buckets of log events, iterable in key-discovery order.
///
/// A plain `HashMap` alone would not do — its iteration order is
/// unspecified, and the assembler's output order must be reproducible.
/// The key list carries discovery order; the map carries the buckets.
#[derive(Debug, Default)]
pub struct SessionBuckets {
    keys: Vec<String>,
    buckets: HashMap<String, Vec<LogEvent>>,
}

impl SessionBuckets {
    fn push(&mut self, key: &str, event: LogEvent) {
        if !self.buckets.contains_key(key) {
            self.keys.push(key.to_string());
        }
        self.buckets.entry(key.to_string()).or_default().push(event);
    }

    /// Iterate `(session key, bucket)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LogEvent])> {
        self.keys.iter().map(|key| {
            (
                key.as_str(),
                self.buckets[key].as_slice(),
            )
        })
    }

    /// Number of distinct sessions seen.
    pub fn session_count(&self) -> usize {
        self.keys.len()
    }

    /// Total number of events across all buckets.
    pub fn event_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Partition `events` into per-session buckets.
///
/// Every event lands in exactly one bucket — under its `sessionId` when
/// present and non-empty, otherwise under the default session key. No
/// event is dropped or duplicated.
pub fn group_by_session(events: &[LogEvent]) -> SessionBuckets {
    let mut buckets = SessionBuckets::default();
    for event in events {
        buckets.push(event.session_key(), event.clone());
    }
    buckets
}
