//! Error types for the flowline feed and viewer layers.
//!
//! Fallible operations outside the reconstruction core return
//! `FlowlineResult<T>`. The core itself has no fatal error class: malformed
//! upstream data degrades into displayable entries instead of propagating,
//! so `reconstruct()` is total and returns no `Result`.

use thiserror::Error;

/// The unified error type for the flowline crates.
#[derive(Debug, Error)]
pub enum FlowlineError {
    /// A log snapshot could not be decoded at the document level.
    ///
    /// Per-record problems never produce this — individual malformed
    /// records degrade to placeholder events and the batch continues.
    #[error("snapshot decode failed: {reason}")]
    Decode { reason: String },

    /// A snapshot source could not be read (missing file, I/O failure).
    ///
    /// Callers treat this as "no new snapshot available" for the tick and
    /// keep displaying the previous reconstruction.
    #[error("snapshot source error: {reason}")]
    Source { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the flowline crates.
pub type FlowlineResult<T> = Result<T, FlowlineError>;
