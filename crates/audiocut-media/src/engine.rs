// crates/audiocut-media/src/engine.rs
//
// AudioEngine: the one object a host talks to for audio work.
//
// Owns at most one current `SampleBuffer` (shared as `Arc` so merge flows can
// hold several at once), the MP3 backend and its lazily started worker, and
// the lazily opened playback output. Strategies are picked at construction
// (`with_mp3_backend`, `with_playback_factory`); nothing is probed at call
// time.
//
// Failure policy mirrors what a UI needs:
//   • load_*       Err, and the previous buffer stays loaded.
//   • get_duration 0.0 on failure (display-only path).
//   • process_*    never aborts; each segment carries its own outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use audiocut_core::media_types::{AudioInfo, ExportFormat};
use audiocut_core::segment::Segment;

use crate::buffer::SampleBuffer;
use crate::decode::{decode_bytes, decode_file};
use crate::encode::{encode_mp3, Mp3Backend, Mp3Job, DEFAULT_KBPS};
use crate::error::{EncodeError, MediaError};
use crate::playback::{default_factory, PlaybackBackend, PlaybackFactory, PlaybackState};
use crate::probe::probe_duration;
use crate::splice::{merge_buffers, trim_buffer};
use crate::waveform::waveform_overview;
use crate::wav::encode_wav;
use crate::worker::{EncodeTicket, EncodeWorker};

// ── Public types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bitrate used when a call does not name one.
    pub mp3_kbps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { mp3_kbps: DEFAULT_KBPS }
    }
}

/// Encoded file contents and the format they actually ended up in.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAudio {
    pub data:   Vec<u8>,
    pub format: ExportFormat,
}

impl EncodedAudio {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Outcome of exporting one segment in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    pub segment: Segment,
    pub outcome: Result<EncodedAudio, String>,
}

impl ExportResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

// ── AudioEngine ───────────────────────────────────────────────────────────────

pub struct AudioEngine {
    config:           EngineConfig,
    buffer:           Option<Arc<SampleBuffer>>,
    mp3:              Option<Arc<dyn Mp3Backend>>,
    worker:           Option<EncodeWorker>,
    playback_factory: PlaybackFactory,
    playback:         Option<Box<dyn PlaybackBackend>>,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            buffer:           None,
            mp3:              default_mp3_backend(),
            worker:           None,
            playback_factory: default_factory(),
            playback:         None,
        }
    }

    /// Replace the MP3 backend. `None` disables MP3; requests then fall back
    /// to WAV where the contract allows it.
    pub fn with_mp3_backend(mut self, backend: Option<Arc<dyn Mp3Backend>>) -> Self {
        self.mp3 = backend;
        self.worker = None;
        self
    }

    pub fn with_playback_factory(mut self, factory: PlaybackFactory) -> Self {
        self.playback_factory = factory;
        self.playback = None;
        self
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn mp3_available(&self) -> bool {
        self.mp3.is_some()
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    /// Decode `path` and make it the current buffer.
    pub fn load_file(&mut self, path: &Path) -> Result<AudioInfo, MediaError> {
        let decoded = decode_file(path);
        self.install(decoded, &path.display().to_string())
    }

    /// Decode in-memory file contents and make them the current buffer.
    pub fn load_bytes(&mut self, bytes: Vec<u8>, extension: Option<&str>) -> Result<AudioInfo, MediaError> {
        let decoded = decode_bytes(bytes, extension);
        self.install(decoded, "<memory>")
    }

    fn install(&mut self, decoded: Result<SampleBuffer, MediaError>, source: &str) -> Result<AudioInfo, MediaError> {
        match decoded {
            Ok(buf) => {
                self.stop();
                let info = buf.info();
                info!(
                    source,
                    sample_rate = info.sample_rate,
                    channels = info.number_of_channels,
                    duration_ms = info.duration_ms,
                    "audio loaded"
                );
                self.buffer = Some(Arc::new(buf));
                Ok(info)
            }
            Err(e) => {
                warn!(source, error = %e, "audio load failed");
                Err(e)
            }
        }
    }

    /// `None` until something is loaded.
    pub fn get_info(&self) -> Option<AudioInfo> {
        self.buffer.as_ref().map(|b| b.info())
    }

    /// Seconds of audio in `path` without touching the current buffer.
    pub fn get_duration(&self, path: &Path) -> f64 {
        probe_duration(path)
    }

    pub fn buffer(&self) -> Option<Arc<SampleBuffer>> {
        self.buffer.clone()
    }

    /// Make an externally produced buffer (e.g. a merge result) current.
    pub fn set_buffer(&mut self, buffer: Arc<SampleBuffer>) {
        self.stop();
        self.buffer = Some(buffer);
    }

    /// Stop playback, close the output and drop the current buffer.
    /// Calling it again is harmless.
    pub fn release(&mut self) {
        self.stop();
        self.playback = None;
        if self.buffer.take().is_some() {
            debug!("audio buffer released");
        }
    }

    // ── Editing ──────────────────────────────────────────────────────────────

    /// Copy `[start_ms, end_ms)` of the current buffer.
    pub fn trim_segment(&self, start_ms: i64, end_ms: i64) -> Result<SampleBuffer, MediaError> {
        let buf = self.buffer.as_ref().ok_or(MediaError::NotLoaded)?;
        trim_buffer(buf, start_ms, end_ms)
    }

    pub fn merge(&self, buffers: &[Arc<SampleBuffer>]) -> Option<Arc<SampleBuffer>> {
        merge_buffers(buffers)
    }

    /// Load each file in turn, keep its buffer, release, then merge them in
    /// order. The merged buffer becomes current; on failure the buffer that
    /// was current before the call is restored.
    pub fn merge_files(&mut self, paths: &[PathBuf]) -> Result<Arc<SampleBuffer>, MediaError> {
        let prior = self.buffer.clone();
        let mut buffers = Vec::with_capacity(paths.len());
        for path in paths {
            if let Err(e) = self.load_file(path) {
                self.buffer = prior;
                return Err(e);
            }
            buffers.extend(self.buffer());
            self.release();
        }

        let merged = merge_buffers(&buffers).ok_or(MediaError::NothingToMerge)?;
        info!(files = paths.len(), duration_ms = merged.duration_ms(), "files merged");
        self.set_buffer(Arc::clone(&merged));
        Ok(merged)
    }

    // ── Encoding ─────────────────────────────────────────────────────────────

    pub fn to_wav(&self, buf: &SampleBuffer) -> Result<Vec<u8>, MediaError> {
        encode_wav(buf)
    }

    /// Encode on the calling thread. `kbps` defaults to the configured rate.
    pub fn to_mp3(&self, buf: &SampleBuffer, kbps: Option<u32>) -> Result<Vec<u8>, EncodeError> {
        let backend = self.mp3.as_ref().ok_or(EncodeError::Unavailable)?;
        let job = Mp3Job::from_buffer(buf, kbps.unwrap_or(self.config.mp3_kbps));
        encode_mp3(backend.as_ref(), &job, None, &mut |_| {})
    }

    /// Encode on the background worker; progress and the result arrive
    /// through the returned ticket.
    pub fn to_mp3_async(&mut self, buf: &SampleBuffer, kbps: Option<u32>) -> Result<EncodeTicket, EncodeError> {
        let backend = self.mp3.as_ref().ok_or(EncodeError::Unavailable)?;
        let worker = self
            .worker
            .get_or_insert_with(|| EncodeWorker::new(Arc::clone(backend)));
        let job = Mp3Job::from_buffer(buf, kbps.unwrap_or(self.config.mp3_kbps));
        Ok(worker.submit(job))
    }

    /// Encode to `format`. MP3 goes through the worker and reports percent
    /// progress; without an MP3 backend the result is WAV instead.
    pub fn encode(
        &mut self,
        buf:         &SampleBuffer,
        format:      ExportFormat,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<EncodedAudio, MediaError> {
        if format == ExportFormat::Mp3 {
            match self.to_mp3_async(buf, None) {
                Ok(ticket) => {
                    let data = ticket.wait(|p| on_progress(p))?;
                    return Ok(EncodedAudio { data, format: ExportFormat::Mp3 });
                }
                Err(EncodeError::Unavailable) => {
                    warn!("MP3 encoder unavailable, exporting WAV instead");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(EncodedAudio { data: encode_wav(buf)?, format: ExportFormat::Wav })
    }

    /// Trim and encode every segment in order.
    ///
    /// `on_progress(i + 1, total, status)` is called before segment `i` is
    /// processed (and again with a percentage while an MP3 encodes). A
    /// failing segment is recorded and the batch moves on.
    pub fn process_segments(
        &mut self,
        segments:    &[Segment],
        on_progress: &mut dyn FnMut(usize, usize, &str),
        format:      ExportFormat,
    ) -> Vec<ExportResult> {
        let total = segments.len();
        let mut results = Vec::with_capacity(total);

        for (i, segment) in segments.iter().enumerate() {
            on_progress(i + 1, total, &format!("Processing segment {}...", segment.id));

            let outcome = self
                .trim_segment(segment.start_ms, segment.end_ms)
                .and_then(|clip| {
                    self.encode(&clip, format, &mut |p| {
                        on_progress(
                            i + 1,
                            total,
                            &format!("Processing segment {} (MP3 compression: {p}%)...", segment.id),
                        )
                    })
                })
                .map_err(|e| {
                    warn!(segment = %segment.id, error = %e, "segment export failed");
                    e.to_string()
                });

            results.push(ExportResult { segment: segment.clone(), outcome });
        }

        let ok = results.iter().filter(|r| r.is_success()).count();
        info!(ok, failed = total - ok, %format, "segments processed");
        results
    }

    // ── Playback ─────────────────────────────────────────────────────────────

    /// Play `[start_ms, end_ms)` of the current buffer once, replacing any
    /// clip already playing. Opens the output on first use.
    pub fn play_segment(&mut self, start_ms: i64, end_ms: i64) -> Result<(), MediaError> {
        let clip = self.trim_segment(start_ms, end_ms)?;

        if self.playback.is_none() {
            self.playback = Some((self.playback_factory)()?);
        }
        let Some(output) = self.playback.as_mut() else {
            return Err(MediaError::Playback("output not available".into()));
        };

        if output.state() == PlaybackState::Suspended {
            output.resume()?;
        }
        output.stop();
        output.start(clip)?;
        debug!(start_ms, end_ms, "segment playback started");
        Ok(())
    }

    /// Stop playback. Safe to call when nothing is playing.
    pub fn stop(&mut self) {
        if let Some(output) = self.playback.as_mut() {
            output.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback.as_ref().is_some_and(|p| p.is_playing())
    }

    // ── Display ──────────────────────────────────────────────────────────────

    /// Overview amplitudes of the current buffer, `None` when nothing is loaded.
    pub fn waveform(&self, width: usize) -> Option<Vec<f32>> {
        self.buffer.as_ref().map(|b| waveform_overview(b, width))
    }
}

fn default_mp3_backend() -> Option<Arc<dyn Mp3Backend>> {
    #[cfg(feature = "mp3")]
    {
        Some(Arc::new(crate::encode::LameBackend))
    }
    #[cfg(not(feature = "mp3"))]
    {
        None
    }
}
