//! Snapshot sources: the seam between the excluded transport and the core.
//!
//! A `SnapshotSource` is polled at the viewer's cadence. Each successful
//! poll yields either a fresh full-replacement snapshot or `None` ("no new
//! snapshot available"), in which case the caller keeps displaying its
//! previous reconstruction. Errors are per-tick: the caller skips the tick
//! and tries again on the next one.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::debug;

use flowline_contracts::{FlowlineError, FlowlineResult, LogEvent};

use crate::snapshot::decode_snapshot;

/// Anything that can be polled for a full-replacement log snapshot.
pub trait SnapshotSource {
    /// Fetch the next snapshot, if one is available.
    ///
    /// `Ok(None)` means nothing new this tick — not an error, and not an
    /// empty snapshot (an empty snapshot is `Ok(Some(vec![]))` and clears
    /// the timeline).
    fn poll(&mut self) -> FlowlineResult<Option<Vec<LogEvent>>>;
}

/// Re-reads a JSON capture file on every poll.
///
/// Reports a snapshot only when the file's contents changed since the last
/// successful read, so an idle file costs nothing downstream.
pub struct JsonFileSource {
    path: PathBuf,
    last_raw: Option<String>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_raw: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn poll(&mut self) -> FlowlineResult<Option<Vec<LogEvent>>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| FlowlineError::Source {
            reason: format!("failed to read '{}': {}", self.path.display(), e),
        })?;

        if self.last_raw.as_deref() == Some(raw.as_str()) {
            return Ok(None);
        }

        let events = decode_snapshot(&raw)?;
        debug!(path = %self.path.display(), count = events.len(), "capture file changed");
        self.last_raw = Some(raw);
        Ok(Some(events))
    }
}

/// Steps through a pre-scripted sequence of snapshots, one per poll.
///
/// Used by the demo binaries and tests to reproduce a live polling window
/// without any transport. Exhaustion is permanent `Ok(None)`.
pub struct ReplaySource {
    polls: VecDeque<Vec<LogEvent>>,
}

impl ReplaySource {
    pub fn new(polls: Vec<Vec<LogEvent>>) -> Self {
        Self {
            polls: polls.into(),
        }
    }

    /// Snapshots not yet delivered.
    pub fn remaining(&self) -> usize {
        self.polls.len()
    }
}

impl SnapshotSource for ReplaySource {
    fn poll(&mut self) -> FlowlineResult<Option<Vec<LogEvent>>> {
        Ok(self.polls.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use flowline_contracts::{FlowlineError, LogEvent, Phase};

    use super::{JsonFileSource, ReplaySource, SnapshotSource};

    #[test]
    fn replay_source_delivers_each_snapshot_once_then_dries_up() {
        let first = vec![LogEvent {
            phase: Phase::M1,
            ..LogEvent::default()
        }];
        let second = vec![
            LogEvent {
                phase: Phase::M1,
                ..LogEvent::default()
            },
            LogEvent {
                phase: Phase::M2,
                ..LogEvent::default()
            },
        ];

        let mut source = ReplaySource::new(vec![first, second]);
        assert_eq!(source.remaining(), 2);

        assert_eq!(source.poll().unwrap().unwrap().len(), 1);
        assert_eq!(source.poll().unwrap().unwrap().len(), 2);
        assert!(source.poll().unwrap().is_none());
        assert!(source.poll().unwrap().is_none(), "exhaustion is permanent");
    }

    #[test]
    fn file_source_reports_only_changed_contents() {
        let path = std::env::temp_dir().join("flowline-file-source-test.json");
        std::fs::write(&path, r#"[{ "type": "M1" }]"#).unwrap();

        let mut source = JsonFileSource::new(&path);

        let snapshot = source.poll().unwrap().expect("first poll sees the file");
        assert_eq!(snapshot.len(), 1);

        // Unchanged file → no new snapshot.
        assert!(source.poll().unwrap().is_none());

        std::fs::write(&path, r#"[{ "type": "M1" }, { "type": "M2" }]"#).unwrap();
        let snapshot = source.poll().unwrap().expect("changed file is a new snapshot");
        assert_eq!(snapshot.len(), 2);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let mut source = JsonFileSource::new("/nonexistent/flowline-capture.json");
        assert!(matches!(
            source.poll().unwrap_err(),
            FlowlineError::Source { .. }
        ));
    }
}
