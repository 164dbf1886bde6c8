//! Render-ready timeline entries.
//!
//! The reconstruction engine's output is a flat sequence of `TimelineEntry`
//! values: protocol messages augmented with a stable identity, plus
//! synthetic session-boundary markers inserted solely for rendering. A
//! renderer keys its rows by `EntryId`, so identities must survive
//! recomputation from equivalent input unchanged.

use serde::{Deserialize, Serialize};

use crate::event::LogEvent;

/// Stable identity of one timeline entry.
///
/// For a message entry this is the event's original `seq` when present,
/// otherwise the event's position within its session bucket *before*
/// sorting — assigned pre-sort so the identity survives re-ordering and
/// appends. For a marker it is derived from the session key alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    /// `seq`-or-pre-sort-index identity of a message entry.
    Message(u64),
    /// Session key the marker was derived from.
    Marker(String),
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryId::Message(n) => write!(f, "{}", n),
            EntryId::Marker(key) => write!(f, "sess-{}", key),
        }
    }
}

/// Synthetic session-boundary row.
///
/// Emitted before the first event of every explicitly keyed session, never
/// for the default session. Carries display data only — markers are never
/// fed back into the engine as domain events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMarker {
    pub id: EntryId,
    /// The session key, verbatim.
    pub session: String,
    /// Timestamp of the session's first (lowest-ranked) event, if any.
    pub ts: Option<f64>,
}

/// A protocol message row: the original event plus its assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub id: EntryId,
    pub event: LogEvent,
}

/// One renderable timeline row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TimelineEntry {
    /// Session-boundary marker.
    Session(SessionMarker),
    /// Protocol message.
    Message(MessageEntry),
}

impl TimelineEntry {
    pub fn id(&self) -> &EntryId {
        match self {
            TimelineEntry::Session(marker) => &marker.id,
            TimelineEntry::Message(entry) => &entry.id,
        }
    }

    /// Display timestamp of this row, if it has one.
    pub fn ts(&self) -> Option<f64> {
        match self {
            TimelineEntry::Session(marker) => marker.ts,
            TimelineEntry::Message(entry) => entry.event.ts,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, TimelineEntry::Session(_))
    }
}
