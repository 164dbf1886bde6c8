//! Log event and protocol phase types.
//!
//! A `LogEvent` is one observed protocol message, in the exact shape the
//! source system emits over its JSON log feed (camelCase keys, every field
//! optional except the phase tag). The reconstruction engine consumes flat
//! collections of these and nothing else.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The synthetic session key shared by every event that carries no
/// (or an empty) `sessionId`. Such events are legacy/ungrouped and are
/// rendered without a session marker.
pub const DEFAULT_SESSION: &str = "default";

/// The logical step of a protocol message.
///
/// The observed protocol tags its messages M1 through M4. Declaration order
/// defines the rank used as the primary sort key during reconstruction; any
/// tag outside the fixed vocabulary lands in `Other` and sorts after all
/// known phases. Unknown tags are ordered last, never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    M1,
    M2,
    M3,
    M4,
    /// Catch-all for tags outside the M1–M4 vocabulary, including the
    /// empty tag produced when a record carries no `type` at all.
    Other(String),
}

impl Phase {
    /// Rank assigned to every `Other` tag. Larger than any known rank, so
    /// unclassified events always sort after the protocol phases.
    pub const OTHER_RANK: u8 = u8::MAX;

    /// The fixed phase-tag → rank mapping (first phase lowest).
    pub fn rank(&self) -> u8 {
        match self {
            Phase::M1 => 0,
            Phase::M2 => 1,
            Phase::M3 => 2,
            Phase::M4 => 3,
            Phase::Other(_) => Self::OTHER_RANK,
        }
    }

    /// The wire tag for this phase, e.g. `"M1"`.
    pub fn tag(&self) -> &str {
        match self {
            Phase::M1 => "M1",
            Phase::M2 => "M2",
            Phase::M3 => "M3",
            Phase::M4 => "M4",
            Phase::Other(tag) => tag,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Other(String::new())
    }
}

impl From<String> for Phase {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "M1" => Phase::M1,
            "M2" => Phase::M2,
            "M3" => Phase::M3,
            "M4" => Phase::M4,
            _ => Phase::Other(tag),
        }
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        phase.tag().to_string()
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One observed protocol message as delivered by the source system's log
/// feed.
///
/// Every field is optional on the wire. Missing fields decode to safe
/// defaults rather than failing the record: an absent phase tag becomes
/// `Phase::Other("")`, absent endpoint labels become empty strings, and
/// absent `seq`/`ts` are treated as zero wherever ordering needs a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogEvent {
    /// Protocol-phase tag (`"type"` on the wire).
    #[serde(rename = "type")]
    pub phase: Phase,

    /// Correlates events belonging to one authentication attempt. Absent
    /// (or empty) means ungrouped/legacy — see [`DEFAULT_SESSION`].
    pub session_id: Option<String>,

    /// Emission order within a session, as assigned by the source system.
    pub seq: Option<u64>,

    /// Seconds since epoch, fractional allowed. Ordering tie-breaker and
    /// display timestamp.
    pub ts: Option<f64>,

    /// Opaque label of the sending protocol party.
    pub src: String,

    /// Opaque label of the receiving protocol party.
    pub dst: String,

    /// Auxiliary diagnostic fields, displayed verbatim.
    pub details: Option<BTreeMap<String, serde_json::Value>>,
}

impl LogEvent {
    /// The session key this event groups under: the explicit `sessionId`
    /// when present and non-empty, otherwise [`DEFAULT_SESSION`].
    pub fn session_key(&self) -> &str {
        match &self.session_id {
            Some(sid) if !sid.is_empty() => sid,
            _ => DEFAULT_SESSION,
        }
    }
}
