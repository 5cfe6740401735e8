// crates/audiocut-media/src/playback.rs
//
// One-shot preview playback.
//
// The engine never talks to an audio device directly. It holds an optional
// `PlaybackBackend`, created on first use by the `PlaybackFactory` chosen at
// construction. Before scheduling a clip the engine makes sure the backend is
// `Running`, resuming it if it was suspended.
//
// With the "playback" feature the default factory opens the system output
// through rodio. Without it the default factory reports
// `MediaError::Playback`, and `play_segment` surfaces that to the caller.

use crate::buffer::SampleBuffer;
use crate::error::MediaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    Suspended,
}

pub trait PlaybackBackend {
    fn state(&self) -> PlaybackState;

    /// Bring a suspended output back to `Running`.
    fn resume(&mut self) -> Result<(), MediaError>;

    /// Play `clip` once from its first sample. Replaces anything playing.
    fn start(&mut self, clip: SampleBuffer) -> Result<(), MediaError>;

    /// Stop playback. Stopping an idle backend does nothing.
    fn stop(&mut self);

    fn is_playing(&self) -> bool;
}

/// Opens a backend on demand.
pub type PlaybackFactory = Box<dyn Fn() -> Result<Box<dyn PlaybackBackend>, MediaError> + Send + Sync>;

/// The factory for this build: rodio output with the "playback" feature,
/// otherwise one that always fails.
pub fn default_factory() -> PlaybackFactory {
    #[cfg(feature = "playback")]
    {
        Box::new(|| Ok(Box::new(rodio_out::RodioBackend::open()?) as Box<dyn PlaybackBackend>))
    }
    #[cfg(not(feature = "playback"))]
    {
        Box::new(|| Err(MediaError::Playback("built without the \"playback\" feature".into())))
    }
}

#[cfg(feature = "playback")]
pub use rodio_out::RodioBackend;

#[cfg(feature = "playback")]
mod rodio_out {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamBuilder, Sink};
    use tracing::debug;

    use super::{PlaybackBackend, PlaybackState};
    use crate::buffer::SampleBuffer;
    use crate::error::MediaError;

    /// Default system output. The stream must outlive every sink connected
    /// to its mixer, so both live here.
    pub struct RodioBackend {
        stream: OutputStream,
        sink:   Option<Sink>,
    }

    impl RodioBackend {
        pub fn open() -> Result<Self, MediaError> {
            let stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| MediaError::Playback(e.to_string()))?;
            debug!("audio output opened");
            Ok(Self { stream, sink: None })
        }
    }

    impl PlaybackBackend for RodioBackend {
        fn state(&self) -> PlaybackState {
            match &self.sink {
                Some(sink) if sink.is_paused() => PlaybackState::Suspended,
                _ => PlaybackState::Running,
            }
        }

        fn resume(&mut self) -> Result<(), MediaError> {
            if let Some(sink) = &self.sink {
                sink.play();
            }
            Ok(())
        }

        fn start(&mut self, clip: SampleBuffer) -> Result<(), MediaError> {
            self.stop();

            let channels = clip.number_of_channels().max(1) as u16;
            let mut interleaved = Vec::with_capacity(clip.length() * channels as usize);
            for frame in 0..clip.length() {
                for ch in clip.channels() {
                    interleaved.push(ch[frame]);
                }
            }

            let sink = Sink::connect_new(self.stream.mixer());
            sink.append(SamplesBuffer::new(channels, clip.sample_rate(), interleaved));
            sink.play();
            self.sink = Some(sink);
            Ok(())
        }

        fn stop(&mut self) {
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
        }

        fn is_playing(&self) -> bool {
            self.sink.as_ref().is_some_and(|s| !s.is_paused() && !s.empty())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    /// Shared record of what a `FakeOutput` was asked to do.
    #[derive(Debug, Default)]
    pub(crate) struct OutputLog {
        pub resumed: usize,
        pub started: Vec<(u32, usize, usize)>, // rate, channels, frames
        pub stops:   usize,
        pub playing: bool,
    }

    pub(crate) struct FakeOutput {
        pub log:   Arc<Mutex<OutputLog>>,
        pub state: PlaybackState,
    }

    impl PlaybackBackend for FakeOutput {
        fn state(&self) -> PlaybackState {
            self.state
        }

        fn resume(&mut self) -> Result<(), MediaError> {
            self.log.lock().resumed += 1;
            self.state = PlaybackState::Running;
            Ok(())
        }

        fn start(&mut self, clip: SampleBuffer) -> Result<(), MediaError> {
            let mut log = self.log.lock();
            log.started.push((clip.sample_rate(), clip.number_of_channels(), clip.length()));
            log.playing = true;
            Ok(())
        }

        fn stop(&mut self) {
            let mut log = self.log.lock();
            log.stops += 1;
            log.playing = false;
        }

        fn is_playing(&self) -> bool {
            self.log.lock().playing
        }
    }

    /// Factory producing a suspended `FakeOutput` that writes to `log`.
    pub(crate) fn fake_factory(log: Arc<Mutex<OutputLog>>) -> PlaybackFactory {
        Box::new(move || {
            Ok(Box::new(FakeOutput { log: Arc::clone(&log), state: PlaybackState::Suspended })
                as Box<dyn PlaybackBackend>)
        })
    }

    #[cfg(not(feature = "playback"))]
    #[test]
    fn default_factory_without_feature_fails() {
        assert!(matches!(default_factory()(), Err(MediaError::Playback(_))));
    }
}
