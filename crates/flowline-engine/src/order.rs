//! Protocol-aware ordering within one session.
//!
//! The comparison is three-level, in strict precedence:
//!
//!   1. phase rank  — the semantic protocol step (M1 < M2 < M3 < M4 < other)
//!   2. `seq`       — source-assigned emission order, absent treated as 0
//!   3. `ts`        — wall-clock tie-break, absent treated as 0
//!
//! Phase rank deliberately beats wall-clock time: two messages handled
//! concurrently can be logged out of wall-clock order relative to each
//! other, and the protocol step is the primary axis a human reviewer needs.
//! The sort is stable, so events that compare equal on all three keys keep
//! their relative input order.

use std::cmp::Ordering;

use flowline_contracts::{LogEvent, MessageEntry};

/// Compare two events of the same session.
///
/// `seq` values are only meaningful within one session; this function is
/// never applied across session boundaries.
pub fn compare(a: &LogEvent, b: &LogEvent) -> Ordering {
    a.phase
        .rank()
        .cmp(&b.phase.rank())
        .then_with(|| a.seq.unwrap_or(0).cmp(&b.seq.unwrap_or(0)))
        .then_with(|| a.ts.unwrap_or(0.0).total_cmp(&b.ts.unwrap_or(0.0)))
}

/// Stable-sort one session's message entries in place.
///
/// Entries must already carry their identities — identity assignment
/// happens before sorting, never after.
pub fn sort_session(entries: &mut [MessageEntry]) {
    entries.sort_by(|a, b| compare(&a.event, &b.event));
}
