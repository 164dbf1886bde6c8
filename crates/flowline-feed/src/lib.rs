//! # flowline-feed
//!
//! Everything between the excluded transport and the reconstruction core:
//! lenient snapshot decoding, pollable snapshot sources, endpoint label
//! decoding, and viewer configuration.
//!
//! The feed layer owns all the tolerance: malformed records degrade here,
//! transport hiccups become "no new snapshot this tick" here, so the core
//! only ever sees well-formed `LogEvent` collections.

pub mod config;
pub mod label;
pub mod snapshot;
pub mod source;

pub use config::ViewerConfig;
pub use label::decode_endpoint_label;
pub use snapshot::decode_snapshot;
pub use source::{JsonFileSource, ReplaySource, SnapshotSource};
