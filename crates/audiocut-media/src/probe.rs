// crates/audiocut-media/src/probe.rs
//
// Lightweight duration probe for files that are not the engine's current
// buffer (e.g. the pending list of a merge). Never touches engine state.

use std::fs::File;
use std::path::Path;

use tracing::{debug, warn};

use crate::decode::{decode_file, extension_of, open_source};
use crate::error::MediaError;

/// Duration of the audio in `path`, in seconds. Returns 0.0 when the file
/// cannot be read or decoded; the failure is logged, not returned.
pub fn probe_duration(path: &Path) -> f64 {
    match try_probe(path) {
        Ok(secs) => {
            debug!(secs, path = %path.display(), "probed duration");
            secs
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "duration probe failed");
            0.0
        }
    }
}

fn try_probe(path: &Path) -> Result<f64, MediaError> {
    let ext = extension_of(path);

    // Container header first: frame count and rate are enough when present.
    let opened = open_source(Box::new(File::open(path)?), ext)?;
    if let (Some(frames), Some(rate)) = (opened.params.n_frames, opened.params.sample_rate) {
        if frames > 0 && rate > 0 {
            return Ok(frames as f64 / rate as f64);
        }
    }

    // Fall back to a full decode (e.g. VBR MP3 without a Xing header).
    Ok(decode_file(path)?.duration_secs())
}
