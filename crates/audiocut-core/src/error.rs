// crates/audiocut-core/src/error.rs
//
// Error types for segment editing, range validation, JSON import and the
// MP3 encode jobs whose events cross into hosts.

use thiserror::Error;

/// Why a `[start, end)` range was rejected. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("time cannot be negative")]
    Negative,
    #[error("start time must be before end time")]
    StartNotBeforeEnd,
    #[error("end time exceeds audio length")]
    ExceedsDuration,
}

/// Rejected segment edits. A rejected edit leaves the manager untouched and
/// fires no change notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no segment with id '{0}'")]
    NotFound(String),
    #[error("no parent segment with id '{0}'")]
    ParentNotFound(String),
    #[error("index {index} out of bounds for {len} segments")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("segment '{0}' is already at the maximum nesting depth")]
    TooDeep(String),
    #[error("cannot split into {0} segments")]
    InvalidSplitCount(usize),
    #[error("split point {at_ms} ms is not inside [{start_ms}, {end_ms})")]
    InvalidSplitPoint { at_ms: i64, start_ms: i64, end_ms: i64 },
}

/// Why a segment JSON document could not be imported.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid JSON format: 'segments' must be an array")]
    MissingSegments,
    #[error("invalid segment entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Failures of an MP3 encode, synchronous or on the worker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("MP3 encoding is not available in this build")]
    Unavailable,
    #[error("unsupported MP3 bitrate {0} kbps")]
    UnsupportedBitrate(u32),
    #[error("MP3 encoder error: {0}")]
    Backend(String),
    #[error("cancelled")]
    Cancelled,
    #[error("encode worker has shut down")]
    WorkerGone,
}
