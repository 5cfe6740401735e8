// crates/audiocut-media/src/waveform.rs
//
// Overview amplitude for drawing a waveform strip.
// Mean absolute value of channel 0, one value per column.

use crate::buffer::SampleBuffer;

pub const DEFAULT_COLUMNS: usize = 1000;

/// One value per column, at most `width` columns (fewer when the buffer has
/// fewer samples than `width`). Each column averages `len / width` samples.
pub fn waveform_overview(buf: &SampleBuffer, width: usize) -> Vec<f32> {
    if buf.number_of_channels() == 0 || width == 0 {
        return Vec::new();
    }
    let samples = buf.channel(0);
    let block = (samples.len() / width).max(1);

    samples
        .chunks(block)
        .take(width.min(samples.len()))
        .map(|chunk| chunk.iter().map(|s| s.abs()).sum::<f32>() / chunk.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_each_block() {
        let ch = vec![1.0, -1.0, 0.5, -0.5, 0.0, 0.0];
        let buf = SampleBuffer::from_channels(8_000, vec![ch]);
        assert_eq!(waveform_overview(&buf, 3), [1.0, 0.5, 0.0]);
    }

    #[test]
    fn short_buffers_give_fewer_columns() {
        let buf = SampleBuffer::from_channels(8_000, vec![vec![0.25; 4]]);
        assert_eq!(waveform_overview(&buf, DEFAULT_COLUMNS).len(), 4);
        assert!(waveform_overview(&SampleBuffer::silent(8_000, 0, 0), 10).is_empty());
    }

    #[test]
    fn uses_first_channel_only() {
        let buf = SampleBuffer::from_channels(8_000, vec![vec![0.0; 10], vec![1.0; 10]]);
        assert!(waveform_overview(&buf, 5).iter().all(|&v| v == 0.0));
    }
}
