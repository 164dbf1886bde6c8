//! Timeline assembly: buckets → one flat, render-ready sequence.
//!
//! Sessions are emitted in the grouper's discovery order. The default
//! (unkeyed) session contributes its ordered events directly; every
//! explicitly keyed session is preceded by a synthetic marker row whose
//! display timestamp is the first ordered event's timestamp.
//!
//! Identity assignment happens *before* sorting: a message entry's id is
//! its original `seq` when present, otherwise its pre-sort position within
//! the bucket. Computing ids after the sort would make them shift whenever
//! a re-poll reorders the bucket, breaking identity stability under append.

use flowline_contracts::{
    EntryId, LogEvent, MessageEntry, SessionMarker, TimelineEntry, DEFAULT_SESSION,
};

use crate::group::SessionBuckets;
use crate::order;

/// Flatten grouped, ordered sessions into the final timeline.
pub fn assemble(buckets: &SessionBuckets) -> Vec<TimelineEntry> {
    let mut out = Vec::with_capacity(buckets.event_count() + buckets.session_count());

    for (key, bucket) in buckets.iter() {
        let mut entries = identify(bucket);
        order::sort_session(&mut entries);

        if key != DEFAULT_SESSION {
            out.push(TimelineEntry::Session(SessionMarker {
                id: EntryId::Marker(key.to_string()),
                session: key.to_string(),
                ts: entries.first().and_then(|entry| entry.event.ts),
            }));
        }

        out.extend(entries.into_iter().map(TimelineEntry::Message));
    }

    out
}

/// Attach pre-sort identities to one bucket's events.
fn identify(bucket: &[LogEvent]) -> Vec<MessageEntry> {
    bucket
        .iter()
        .enumerate()
        .map(|(index, event)| MessageEntry {
            id: EntryId::Message(event.seq.unwrap_or(index as u64)),
            event: event.clone(),
        })
        .collect()
}
