//! # flowline-replay
//!
//! Scripted authentication-protocol runs: pre-recorded polling windows the
//! demo CLI, the TUI, and the tests feed through the reconstruction engine
//! without any transport.
//!
//! Each scenario yields a [`ReplayScript`] — a sequence of full-replacement
//! snapshots, one per poll tick, reproducing what the original client's
//! 500 ms polling loop would have observed.

pub mod scenarios;
pub mod script;

pub use scenarios::Scenario;
pub use script::ReplayScript;
