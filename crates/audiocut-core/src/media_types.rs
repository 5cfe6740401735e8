// crates/audiocut-core/src/media_types.rs
//
// Types that flow between audiocut-media and its callers.
// No decoder, no encoder: just plain data.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::EncodeError;

/// Output container for exported audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Wav,
    Mp3,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Wav => "wav",
            ExportFormat::Mp3 => "mp3",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Wav => "audio/wav",
            ExportFormat::Mp3 => "audio/mpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wav" => Ok(ExportFormat::Wav),
            "mp3" => Ok(ExportFormat::Mp3),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Facts about the currently loaded source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioInfo {
    pub duration_ms:        i64,
    pub sample_rate:        u32,
    pub number_of_channels: usize,
    pub length:             usize, // frames per channel
}

impl AudioInfo {
    /// Exact duration in seconds; `duration_ms` is this value floored.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.length as f64 / self.sample_rate as f64
    }
}

/// Messages sent from a background MP3 encode to whoever submitted it.
/// Exactly one of `Done`, `Failed` or `Cancelled` ends every job.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeEvent {
    Progress  { job_id: Uuid, percent: u8 },
    Done      { job_id: Uuid, data: Vec<u8> },
    Failed    { job_id: Uuid, error: EncodeError },
    Cancelled { job_id: Uuid },
}

impl EncodeEvent {
    pub fn job_id(&self) -> Uuid {
        match self {
            EncodeEvent::Progress { job_id, .. }
            | EncodeEvent::Done { job_id, .. }
            | EncodeEvent::Failed { job_id, .. }
            | EncodeEvent::Cancelled { job_id } => *job_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, EncodeEvent::Progress { .. })
    }
}
