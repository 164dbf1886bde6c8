//! Lenient decoding of raw log snapshots.
//!
//! The source system delivers the full log set as one JSON array on every
//! poll. Decoding is tolerant at the record level: a malformed record
//! (wrong-shaped field, non-object entry) degrades to a placeholder event
//! that flags the problem in its `details`, and the rest of the batch is
//! unaffected. Only a document that is not a JSON array at all is an error.

use serde_json::Value;
use tracing::{debug, warn};

use flowline_contracts::{FlowlineError, FlowlineResult, LogEvent};

/// Detail key under which a degraded record carries its decode error.
const ERROR_KEY: &str = "error";

/// Decode one raw snapshot document into log events.
///
/// Returns `FlowlineError::Decode` only when `raw` is not a JSON array.
/// Individual records never fail the batch.
pub fn decode_snapshot(raw: &str) -> FlowlineResult<Vec<LogEvent>> {
    let doc: Value = serde_json::from_str(raw).map_err(|e| FlowlineError::Decode {
        reason: format!("snapshot is not valid JSON: {}", e),
    })?;

    let Value::Array(items) = doc else {
        return Err(FlowlineError::Decode {
            reason: "snapshot root must be a JSON array of log records".to_string(),
        });
    };

    let events: Vec<LogEvent> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_record(index, item))
        .collect();

    debug!(count = events.len(), "snapshot decoded");
    Ok(events)
}

/// Decode a single record, substituting a flagged placeholder on failure.
fn decode_record(index: usize, value: Value) -> LogEvent {
    match serde_json::from_value::<LogEvent>(value) {
        Ok(event) => event,
        Err(e) => {
            warn!(index, error = %e, "malformed log record, degrading to placeholder");
            degraded_record(&e.to_string())
        }
    }
}

/// A displayable-but-flagged stand-in for a record that failed to decode:
/// rank-last phase, empty labels, zero timestamp, and the decode error in
/// its details.
fn degraded_record(reason: &str) -> LogEvent {
    let mut details = std::collections::BTreeMap::new();
    details.insert(ERROR_KEY.to_string(), Value::String(reason.to_string()));
    LogEvent {
        details: Some(details),
        ..LogEvent::default()
    }
}

#[cfg(test)]
mod tests {
    use flowline_contracts::{FlowlineError, Phase};

    use super::{decode_snapshot, ERROR_KEY};

    #[test]
    fn well_formed_snapshot_decodes_every_record() {
        let raw = r#"[
            { "type": "M1", "sessionId": "s1", "seq": 1, "ts": 10.0,
              "src": "did:web:alice", "dst": "gateway" },
            { "type": "M2", "sessionId": "s1", "seq": 2, "ts": 10.1,
              "src": "gateway", "dst": "sensor:c2Vuc29yLTE=" }
        ]"#;

        let events = decode_snapshot(raw).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].phase, Phase::M1);
        assert_eq!(events[1].session_id.as_deref(), Some("s1"));
    }

    #[test]
    fn empty_array_is_a_valid_empty_snapshot() {
        assert!(decode_snapshot("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_record_degrades_without_aborting_the_batch() {
        // The middle record's seq has the wrong shape.
        let raw = r#"[
            { "type": "M1", "seq": 1 },
            { "type": "M2", "seq": "not-a-number" },
            { "type": "M3", "seq": 3 }
        ]"#;

        let events = decode_snapshot(raw).unwrap();
        assert_eq!(events.len(), 3, "degradation never drops records");

        assert_eq!(events[0].phase, Phase::M1);
        assert_eq!(events[2].phase, Phase::M3);

        let degraded = &events[1];
        assert_eq!(degraded.phase, Phase::Other(String::new()));
        assert!(degraded.src.is_empty());
        assert!(
            degraded.details.as_ref().unwrap().contains_key(ERROR_KEY),
            "degraded record must carry its decode error"
        );
    }

    #[test]
    fn non_array_document_is_a_decode_error() {
        let err = decode_snapshot(r#"{ "logs": [] }"#).unwrap_err();
        assert!(matches!(err, FlowlineError::Decode { .. }));
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = decode_snapshot("not json").unwrap_err();
        assert!(matches!(err, FlowlineError::Decode { .. }));
    }
}
