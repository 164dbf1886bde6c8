//! Replay scripts: pre-recorded polling windows.
//!
//! A `ReplayScript` is the sequence of snapshots a poller would have seen
//! during one run of the source system — full replacement sets, one per
//! poll tick, each superseding the previous. Scripts are what the demo
//! viewers feed into a `ReplaySource`.

use std::collections::BTreeMap;

use serde_json::Value;

use flowline_contracts::{LogEvent, Phase};

/// The successive snapshots of one recorded polling window.
#[derive(Debug, Clone)]
pub struct ReplayScript {
    /// One full-replacement snapshot per poll tick, oldest first.
    pub polls: Vec<Vec<LogEvent>>,
}

impl ReplayScript {
    /// The last snapshot of the window — the complete log set.
    pub fn final_snapshot(&self) -> &[LogEvent] {
        self.polls.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn poll_count(&self) -> usize {
        self.polls.len()
    }
}

/// Build one protocol message the way the source system logs it.
pub(crate) fn message(
    phase: &str,
    session: Option<&str>,
    seq: u64,
    ts: f64,
    src: &str,
    dst: &str,
    details: &[(&str, Value)],
) -> LogEvent {
    let details: BTreeMap<String, Value> = details
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();

    LogEvent {
        phase: Phase::from(phase.to_string()),
        session_id: session.map(str::to_string),
        seq: Some(seq),
        ts: Some(ts),
        src: src.to_string(),
        dst: dst.to_string(),
        details: if details.is_empty() {
            None
        } else {
            Some(details)
        },
    }
}

/// Wall-clock anchor for generated scripts, in fractional epoch seconds.
pub(crate) fn now_epoch() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
