// crates/audiocut-media/src/error.rs
//
// Error types for decoding, editing, encoding and packaging audio.

use thiserror::Error;

pub use audiocut_core::error::EncodeError;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode audio: {0}")]
    Decode(String),
    #[error("no audio track found")]
    NoAudioTrack,
    #[error("no audio samples decoded")]
    EmptyStream,
    #[error("no audio loaded")]
    NotLoaded,
    #[error("range {start_ms}..{end_ms} ms contains no samples")]
    EmptyRange { start_ms: i64, end_ms: i64 },
    #[error("audio too large for a WAV file ({bytes} bytes of samples)")]
    TooLarge { bytes: u64 },
    #[error("nothing to merge")]
    NothingToMerge,
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("playback unavailable: {0}")]
    Playback(String),
    #[error("could not write archive: {0}")]
    Package(#[from] zip::result::ZipError),
}
