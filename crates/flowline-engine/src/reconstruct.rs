//! The live-view entry point: snapshot in, timeline out.
//!
//! `reconstruct` is the single operation the polling layer drives. It is
//! pure and total — a function of nothing but its input snapshot — so it
//! may be invoked on every poll tick without guarding: identical input
//! yields an identical timeline (identities, order, and content), and the
//! caller simply replaces its displayed timeline with the newest result
//! (last snapshot wins). There is no state to share or protect between
//! invocations.

use flowline_contracts::{LogEvent, TimelineEntry};

use crate::assemble::assemble;
use crate::group::group_by_session;

/// Rebuild the full timeline from one snapshot of log events.
///
/// The snapshot is a complete replacement set, not a delta: grouping,
/// ordering, and assembly are recomputed from scratch, but identities are
/// derived from `seq`/pre-sort position, so unchanged events keep their
/// identity across recomputations and across appends.
///
/// Never fails. Malformed events were already degraded to safe defaults by
/// the feed layer; here they group, order (rank-last), and render like any
/// other event.
pub fn reconstruct(logs: &[LogEvent]) -> Vec<TimelineEntry> {
    assemble(&group_by_session(logs))
}
