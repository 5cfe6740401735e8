// crates/audiocut-core/src/lib.rs
//
// Plain data and editing logic for audiocut. No decoder, no encoder, no I/O:
// audiocut-media and the CLI build on top of this crate.

pub mod commands;
pub mod error;
pub mod helpers;
pub mod manager;
pub mod media_types;
pub mod project;
pub mod segment;

pub use commands::SegmentCommand;
pub use error::{EditError, EncodeError, ImportError, RangeError};
pub use manager::{ChangeListener, SegmentManager, ValidationReport};
pub use media_types::{AudioInfo, EncodeEvent, ExportFormat};
pub use project::{ImportOutcome, ProjectFile, SegmentRecord};
pub use segment::{NewSegment, Segment, SegmentId, SegmentKey, SegmentPatch, MAX_DEPTH};
