// crates/audiocut-media/src/lib.rs
//
// Decoding, editing, encoding and packaging of audio for audiocut.
// Depends on audiocut-core for segment and media types; knows nothing about
// how a host presents anything.
//
// To add a new media capability:
//   1. Create a new module file here
//   2. Add `pub mod mymodule;` below
//   3. Expose it through AudioEngine (engine.rs) if hosts need it

pub mod buffer;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod error;
pub mod package;
pub mod playback;
pub mod probe;
pub mod splice;
pub mod waveform;
pub mod wav;
pub mod worker;

// Re-export the main public API so hosts can import from the crate root.
pub use buffer::SampleBuffer;
pub use engine::{AudioEngine, EncodedAudio, EngineConfig, ExportResult};
pub use error::{EncodeError, MediaError};
pub use worker::{EncodeTicket, EncodeWorker};
pub use audiocut_core::media_types::{AudioInfo, EncodeEvent, ExportFormat};
