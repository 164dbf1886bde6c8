//! # flowline-contracts
//!
//! Shared types and contracts for the flowline timeline reconstruction
//! engine.
//!
//! All crates in the workspace import from here. No reconstruction logic
//! lives in this crate — only data definitions and error types.

pub mod error;
pub mod event;
pub mod timeline;

pub use error::{FlowlineError, FlowlineResult};
pub use event::{LogEvent, Phase, DEFAULT_SESSION};
pub use timeline::{EntryId, MessageEntry, SessionMarker, TimelineEntry};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // ── Phase ────────────────────────────────────────────────────────────────

    #[test]
    fn phase_ranks_follow_declaration_order() {
        assert!(Phase::M1.rank() < Phase::M2.rank());
        assert!(Phase::M2.rank() < Phase::M3.rank());
        assert!(Phase::M3.rank() < Phase::M4.rank());
    }

    #[test]
    fn unknown_phase_ranks_after_every_known_phase() {
        let unknown = Phase::Other("M9".to_string());
        for known in [Phase::M1, Phase::M2, Phase::M3, Phase::M4] {
            assert!(
                known.rank() < unknown.rank(),
                "{} must rank before unknown tags",
                known
            );
        }
    }

    #[test]
    fn phase_round_trips_through_its_wire_tag() {
        for tag in ["M1", "M2", "M3", "M4", "M9", "SESSION", ""] {
            let phase = Phase::from(tag.to_string());
            assert_eq!(phase.tag(), tag);
            assert_eq!(String::from(phase), tag);
        }
    }

    #[test]
    fn phase_deserializes_from_plain_string() {
        let phase: Phase = serde_json::from_value(json!("M3")).unwrap();
        assert_eq!(phase, Phase::M3);

        let phase: Phase = serde_json::from_value(json!("HELLO")).unwrap();
        assert_eq!(phase, Phase::Other("HELLO".to_string()));
    }

    // ── LogEvent ─────────────────────────────────────────────────────────────

    #[test]
    fn log_event_decodes_the_source_wire_shape() {
        let event: LogEvent = serde_json::from_value(json!({
            "type": "M2",
            "sessionId": "s1",
            "seq": 2,
            "ts": 10.5,
            "src": "gateway",
            "dst": "sensor:c2Vuc29yLTE=",
            "details": { "nonce": "abc123" }
        }))
        .unwrap();

        assert_eq!(event.phase, Phase::M2);
        assert_eq!(event.session_id.as_deref(), Some("s1"));
        assert_eq!(event.seq, Some(2));
        assert_eq!(event.ts, Some(10.5));
        assert_eq!(event.src, "gateway");
        assert_eq!(event.dst, "sensor:c2Vuc29yLTE=");
        assert_eq!(
            event.details.unwrap().get("nonce"),
            Some(&json!("abc123"))
        );
    }

    #[test]
    fn log_event_missing_fields_decode_to_defaults() {
        // The source system omits fields freely; none of them are required.
        let event: LogEvent = serde_json::from_value(json!({})).unwrap();

        assert_eq!(event.phase, Phase::Other(String::new()));
        assert_eq!(event.session_id, None);
        assert_eq!(event.seq, None);
        assert_eq!(event.ts, None);
        assert!(event.src.is_empty());
        assert!(event.dst.is_empty());
        assert!(event.details.is_none());
    }

    #[test]
    fn session_key_falls_back_to_default() {
        let explicit = LogEvent {
            session_id: Some("s1".to_string()),
            ..LogEvent::default()
        };
        assert_eq!(explicit.session_key(), "s1");

        let absent = LogEvent::default();
        assert_eq!(absent.session_key(), DEFAULT_SESSION);

        // An empty sessionId is treated the same as an absent one.
        let empty = LogEvent {
            session_id: Some(String::new()),
            ..LogEvent::default()
        };
        assert_eq!(empty.session_key(), DEFAULT_SESSION);
    }

    // ── EntryId / TimelineEntry ──────────────────────────────────────────────

    #[test]
    fn entry_id_display_matches_render_keys() {
        assert_eq!(EntryId::Message(7).to_string(), "7");
        assert_eq!(EntryId::Marker("s1".to_string()).to_string(), "sess-s1");
    }

    #[test]
    fn timeline_entry_serializes_with_a_kind_discriminant() {
        let marker = TimelineEntry::Session(SessionMarker {
            id: EntryId::Marker("s1".to_string()),
            session: "s1".to_string(),
            ts: Some(12.0),
        });
        let value = serde_json::to_value(&marker).unwrap();
        assert_eq!(value["kind"], "session");
        assert_eq!(value["session"], "s1");

        let message = TimelineEntry::Message(MessageEntry {
            id: EntryId::Message(1),
            event: LogEvent {
                phase: Phase::M1,
                ..LogEvent::default()
            },
        });
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["kind"], "message");
        assert_eq!(value["id"], 1);
        assert_eq!(value["event"]["type"], "M1");
    }

    #[test]
    fn timeline_entry_accessors() {
        let marker = TimelineEntry::Session(SessionMarker {
            id: EntryId::Marker("s2".to_string()),
            session: "s2".to_string(),
            ts: None,
        });
        assert!(marker.is_marker());
        assert_eq!(marker.ts(), None);
        assert_eq!(marker.id(), &EntryId::Marker("s2".to_string()));

        let message = TimelineEntry::Message(MessageEntry {
            id: EntryId::Message(0),
            event: LogEvent {
                ts: Some(3.5),
                ..LogEvent::default()
            },
        });
        assert!(!message.is_marker());
        assert_eq!(message.ts(), Some(3.5));
    }
}
