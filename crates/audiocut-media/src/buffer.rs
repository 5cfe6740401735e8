// crates/audiocut-media/src/buffer.rs
//
// SampleBuffer: decoded, planar f32 PCM. Immutable once built; the engine and
// its callers share it through `Arc<SampleBuffer>`.

use audiocut_core::media_types::AudioInfo;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    channels:    Vec<Vec<f32>>, // one Vec per channel, all the same length
}

impl SampleBuffer {
    /// Build from planar channel data. Shorter channels are padded with
    /// silence so every channel has the same length.
    pub fn from_channels(sample_rate: u32, mut channels: Vec<Vec<f32>>) -> Self {
        let length = channels.iter().map(Vec::len).max().unwrap_or(0);
        for ch in &mut channels {
            ch.resize(length, 0.0);
        }
        Self { sample_rate, channels }
    }

    /// `channels` channels of `length` zero samples.
    pub fn silent(sample_rate: u32, channels: usize, length: usize) -> Self {
        Self { sample_rate, channels: vec![vec![0.0; length]; channels] }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    /// Frames per channel.
    pub fn length(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.length() as f64 / self.sample_rate as f64
    }

    /// Whole milliseconds, rounded down.
    pub fn duration_ms(&self) -> i64 {
        (self.duration_secs() * 1000.0).floor() as i64
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub(crate) fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    pub fn info(&self) -> AudioInfo {
        AudioInfo {
            duration_ms:        self.duration_ms(),
            sample_rate:        self.sample_rate,
            number_of_channels: self.number_of_channels(),
            length:             self.length(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_ragged_channels() {
        let buf = SampleBuffer::from_channels(8_000, vec![vec![0.5; 4], vec![0.25; 2]]);
        assert_eq!(buf.length(), 4);
        assert_eq!(buf.channel(1), &[0.25, 0.25, 0.0, 0.0]);
    }

    #[test]
    fn duration_is_floored() {
        let buf = SampleBuffer::silent(44_100, 2, 44_100 + 44);
        assert_eq!(buf.duration_ms(), 1_000);
        let info = buf.info();
        assert_eq!((info.sample_rate, info.number_of_channels, info.length), (44_100, 2, 44_144));
    }
}
