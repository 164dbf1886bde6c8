//! # flowline-engine
//!
//! The timeline reconstruction core: turns an unordered snapshot of
//! protocol log events into a causally- and session-coherent timeline
//! suitable for a human auditing a security protocol.
//!
//! ## Pipeline
//!
//! ```text
//! raw snapshot → group (by session, discovery-ordered)
//!              → order (phase rank, then seq, then ts; stable)
//!              → assemble (markers + flat sequence, pre-sort identities)
//! ```
//!
//! The whole pipeline is exposed as one pure function:
//!
//! ```rust,ignore
//! use flowline_engine::reconstruct;
//!
//! let timeline = reconstruct(&snapshot);
//! ```
//!
//! Synchronous, single-threaded, no state between calls. The polling layer
//! re-invokes it with each fresh snapshot; stale results are simply
//! replaced by the caller.

pub mod assemble;
pub mod group;
pub mod order;
pub mod reconstruct;

pub use group::{group_by_session, SessionBuckets};
pub use reconstruct::reconstruct;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use flowline_contracts::{LogEvent, Phase, TimelineEntry};

    use super::reconstruct;

    /// Build an event the way the wire delivers it, including details.
    fn wire_event(value: serde_json::Value) -> LogEvent {
        serde_json::from_value(value).unwrap()
    }

    /// A realistic two-session poll snapshot, scrambled the way concurrent
    /// handling scrambles it.
    fn interleaved_snapshot() -> Vec<LogEvent> {
        vec![
            wire_event(json!({
                "type": "M2", "sessionId": "s-b", "seq": 2, "ts": 100.4,
                "src": "gateway", "dst": "sensor:c2Vuc29yLTI=",
                "details": { "nonce": "9f31" }
            })),
            wire_event(json!({
                "type": "M1", "sessionId": "s-a", "seq": 1, "ts": 100.1,
                "src": "did:web:alice", "dst": "gateway"
            })),
            wire_event(json!({
                "type": "M1", "sessionId": "s-b", "seq": 1, "ts": 100.5,
                "src": "did:web:bob", "dst": "gateway"
            })),
            wire_event(json!({
                "type": "M2", "sessionId": "s-a", "seq": 2, "ts": 100.2,
                "src": "gateway", "dst": "sensor:c2Vuc29yLTE="
            })),
        ]
    }

    #[test]
    fn markers_follow_first_seen_order_not_timestamp_order() {
        let timeline = reconstruct(&interleaved_snapshot());

        let sessions: Vec<&str> = timeline
            .iter()
            .filter_map(|entry| match entry {
                TimelineEntry::Session(m) => Some(m.session.as_str()),
                _ => None,
            })
            .collect();
        // s-b's M2 arrives first in the snapshot, so s-b is discovered first.
        assert_eq!(sessions, vec!["s-b", "s-a"]);
    }

    #[test]
    fn each_session_block_is_phase_ordered() {
        let timeline = reconstruct(&interleaved_snapshot());

        // Walk the flat sequence: after each marker, phases must be
        // non-decreasing until the next marker.
        let mut last_rank: Option<u8> = None;
        for entry in &timeline {
            match entry {
                TimelineEntry::Session(_) => last_rank = None,
                TimelineEntry::Message(m) => {
                    let rank = m.event.phase.rank();
                    if let Some(prev) = last_rank {
                        assert!(prev <= rank, "phase order regressed within a session");
                    }
                    last_rank = Some(rank);
                }
            }
        }
    }

    #[test]
    fn degraded_events_are_rendered_not_dropped() {
        // A record that decoded to all-defaults still flows through the
        // pipeline and lands in the default session, ranked last.
        let mut snapshot = interleaved_snapshot();
        snapshot.push(LogEvent::default());

        let timeline = reconstruct(&snapshot);

        let message_count = timeline.iter().filter(|e| !e.is_marker()).count();
        assert_eq!(message_count, snapshot.len());

        let last = timeline
            .iter()
            .filter_map(|entry| match entry {
                TimelineEntry::Message(m) => Some(m),
                _ => None,
            })
            .find(|m| m.event.session_key() == flowline_contracts::DEFAULT_SESSION)
            .unwrap();
        assert_eq!(last.event.phase, Phase::Other(String::new()));
    }
}
