// crates/audiocut-media/src/encode.rs
//
// MP3 encode pipeline.
//
// Design:
//   • `Mp3Backend`   : opens a codec for (channels, rate, kbps). The default is
//     `LameBackend` (feature "mp3"); tests plug in fakes.
//   • `FrameEncoder` : one open codec: takes int16 blocks, returns MP3 bytes.
//   • `Mp3Job`       : the complete input of an encode: int16 PCM already
//     converted on the caller's side, so a job can move to another thread
//     without sharing the source buffer.
//   • `encode_mp3()` : blocking loop; runs inline for `AudioEngine::to_mp3` and
//     on a worker thread for `EncodeWorker`.
//
// Blocks:
//   PCM is fed in blocks of `BLOCK_SIZE` (1152) samples per channel, the MPEG
//   layer III frame size. The last block may be shorter. Mono sources pass
//   the left channel again as the right one.
//
// Progress:
//   After each block, percent = floor(encoded * 100 / total). A progress call
//   is made only when percent has grown by at least `PROGRESS_STEP` since the
//   last call, so a long file produces at most ~20 calls. A non-empty job
//   always ends with a call for 100.
//
// Cancellation:
//   An optional AtomicBool is checked before every block. When set, the loop
//   stops and returns `EncodeError::Cancelled`; no partial output is returned.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::EncodeError;
use crate::wav::channel_to_pcm16;

pub const BLOCK_SIZE:    usize = 1152;
pub const PROGRESS_STEP: u8    = 5;
pub const DEFAULT_KBPS:  u32   = 128;

/// Constant bitrates an MPEG-1/2 layer III stream can carry.
pub const SUPPORTED_KBPS: [u32; 16] = [8, 16, 24, 32, 40, 48, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];

// ── Backend traits ────────────────────────────────────────────────────────────

/// An open MP3 codec.
pub trait FrameEncoder {
    /// Encode one block and append any produced bytes to `out`.
    /// `left` and `right` always have the same length.
    fn encode(&mut self, left: &[i16], right: &[i16], out: &mut Vec<u8>) -> Result<(), EncodeError>;

    /// Drain buffered frames into `out`. Called once, after the last block.
    fn flush(&mut self, out: &mut Vec<u8>) -> Result<(), EncodeError>;
}

/// Factory for `FrameEncoder`s. Shared between threads by the engine and the
/// encode worker.
pub trait Mp3Backend: Send + Sync {
    fn open(&self, channels: u8, sample_rate: u32, kbps: u32) -> Result<Box<dyn FrameEncoder>, EncodeError>;
}

// ── Job ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Mp3Job {
    pub sample_rate: u32,
    pub kbps:        u32,
    pub left:        Vec<i16>,
    /// `None` for mono sources.
    pub right:       Option<Vec<i16>>,
}

impl Mp3Job {
    /// Convert `buf` with the same clamp/scale rule as the WAV writer.
    /// Channels beyond the second are not encoded.
    pub fn from_buffer(buf: &SampleBuffer, kbps: u32) -> Self {
        let left = buf.channels().first().map(|c| channel_to_pcm16(c)).unwrap_or_default();
        let right = buf.channels().get(1).map(|c| channel_to_pcm16(c));
        Self { sample_rate: buf.sample_rate(), kbps, left, right }
    }

    pub fn channels(&self) -> u8 {
        if self.right.is_some() { 2 } else { 1 }
    }

    pub fn total_samples(&self) -> usize {
        self.left.len()
    }
}

// ── Encode loop ───────────────────────────────────────────────────────────────

/// Encode `job` to a complete MP3 byte stream.
pub fn encode_mp3(
    backend:     &dyn Mp3Backend,
    job:         &Mp3Job,
    cancel:      Option<&AtomicBool>,
    on_progress: &mut dyn FnMut(u8),
) -> Result<Vec<u8>, EncodeError> {
    let mut codec = backend.open(job.channels(), job.sample_rate, job.kbps)?;
    let total = job.total_samples();
    let right = job.right.as_deref().unwrap_or(&job.left);

    let mut out = Vec::new();
    let mut last_reported: u8 = 0;
    let mut start = 0;

    while start < total {
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            debug!(encoded = start, total, "mp3 encode cancelled");
            return Err(EncodeError::Cancelled);
        }

        let end = (start + BLOCK_SIZE).min(total);
        codec.encode(&job.left[start..end], &right[start..end], &mut out)?;
        start = end;

        let percent = (start * 100 / total) as u8;
        if percent >= last_reported + PROGRESS_STEP {
            last_reported = percent;
            on_progress(percent);
        }
    }

    // Throttling can skip the final step (e.g. 96 → 100), so finish at 100.
    if total > 0 && last_reported < 100 {
        on_progress(100);
    }

    codec.flush(&mut out)?;
    debug!(samples = total, bytes = out.len(), kbps = job.kbps, "mp3 encoded");
    Ok(out)
}

// ── LAME backend ──────────────────────────────────────────────────────────────

#[cfg(feature = "mp3")]
pub use lame::LameBackend;

#[cfg(feature = "mp3")]
mod lame {
    use mp3lame_encoder::{Bitrate, Builder, DualPcm, Encoder, FlushNoGap};

    use super::{FrameEncoder, Mp3Backend};
    use crate::error::EncodeError;

    /// libmp3lame through `mp3lame-encoder`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LameBackend;

    struct LameFrames {
        enc: Encoder,
    }

    fn backend_err(e: impl std::fmt::Debug) -> EncodeError {
        EncodeError::Backend(format!("{e:?}"))
    }

    fn bitrate(kbps: u32) -> Option<Bitrate> {
        Some(match kbps {
            8   => Bitrate::Kbps8,
            16  => Bitrate::Kbps16,
            24  => Bitrate::Kbps24,
            32  => Bitrate::Kbps32,
            40  => Bitrate::Kbps40,
            48  => Bitrate::Kbps48,
            64  => Bitrate::Kbps64,
            80  => Bitrate::Kbps80,
            96  => Bitrate::Kbps96,
            112 => Bitrate::Kbps112,
            128 => Bitrate::Kbps128,
            160 => Bitrate::Kbps160,
            192 => Bitrate::Kbps192,
            224 => Bitrate::Kbps224,
            256 => Bitrate::Kbps256,
            320 => Bitrate::Kbps320,
            _   => return None,
        })
    }

    impl Mp3Backend for LameBackend {
        fn open(&self, channels: u8, sample_rate: u32, kbps: u32) -> Result<Box<dyn FrameEncoder>, EncodeError> {
            let brate = bitrate(kbps).ok_or(EncodeError::UnsupportedBitrate(kbps))?;
            let mut builder = Builder::new()
                .ok_or_else(|| EncodeError::Backend("could not allocate LAME encoder".into()))?;
            builder.set_num_channels(channels).map_err(backend_err)?;
            builder.set_sample_rate(sample_rate).map_err(backend_err)?;
            builder.set_brate(brate).map_err(backend_err)?;
            let enc = builder.build().map_err(backend_err)?;
            Ok(Box::new(LameFrames { enc }))
        }
    }

    impl FrameEncoder for LameFrames {
        fn encode(&mut self, left: &[i16], right: &[i16], out: &mut Vec<u8>) -> Result<(), EncodeError> {
            out.reserve(mp3lame_encoder::max_required_buffer_size(left.len()));
            self.enc
                .encode_to_vec(DualPcm { left, right }, out)
                .map_err(backend_err)?;
            Ok(())
        }

        fn flush(&mut self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
            out.reserve(7200);
            self.enc.flush_to_vec::<FlushNoGap>(out).map_err(backend_err)?;
            Ok(())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
