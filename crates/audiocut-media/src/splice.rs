// crates/audiocut-media/src/splice.rs
//
// Sample-accurate trim and concatenation of SampleBuffers. Samples are
// copied verbatim: no resampling, no fades, no dithering.

use std::sync::Arc;

use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::MediaError;

/// Sample index for a millisecond position: `floor(ms / 1000 * rate)`,
/// clamped to `[0, len]`.
fn sample_index(ms: i64, sample_rate: u32, len: usize) -> usize {
    let idx = (ms as f64 / 1000.0 * sample_rate as f64).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(len)
    }
}

/// Copy `[start_ms, end_ms)` of every channel into a new buffer.
///
/// Indices are clamped to the buffer, so a range that runs past the end is
/// shortened rather than reading out of bounds. A range with no samples left
/// after clamping is `MediaError::EmptyRange`.
pub fn trim_buffer(buf: &SampleBuffer, start_ms: i64, end_ms: i64) -> Result<SampleBuffer, MediaError> {
    let len = buf.length();
    let start = sample_index(start_ms, buf.sample_rate(), len);
    let end = sample_index(end_ms, buf.sample_rate(), len);
    if end <= start {
        return Err(MediaError::EmptyRange { start_ms, end_ms });
    }

    let channels = buf.channels().iter().map(|ch| ch[start..end].to_vec()).collect();
    Ok(SampleBuffer::from_channels(buf.sample_rate(), channels))
}

/// Concatenate buffers in order.
///
/// * empty input → `None`
/// * one input → that same buffer, not a copy
/// * otherwise the output has the first buffer's sample rate (no resampling),
///   the largest channel count of any input, and the summed length. Inputs
///   with fewer channels fill the missing ones with their channel 0.
pub fn merge_buffers(buffers: &[Arc<SampleBuffer>]) -> Option<Arc<SampleBuffer>> {
    let first = buffers.first()?;
    if buffers.len() == 1 {
        return Some(Arc::clone(first));
    }

    let channels = buffers.iter().map(|b| b.number_of_channels()).max().unwrap_or(0);
    let total: usize = buffers.iter().map(|b| b.length()).sum();
    let mut out = SampleBuffer::silent(first.sample_rate(), channels, total);

    let mut offset = 0;
    for buf in buffers {
        let n = buf.length();
        if buf.number_of_channels() > 0 {
            for ch in 0..channels {
                let src = if ch < buf.number_of_channels() { buf.channel(ch) } else { buf.channel(0) };
                out.channel_mut(ch)[offset..offset + n].copy_from_slice(src);
            }
        }
        offset += n;
    }

    debug!(inputs = buffers.len(), channels, frames = total, "merged buffers");
    Some(Arc::new(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(rate: u32, len: usize) -> SampleBuffer {
        let ch: Vec<f32> = (0..len).map(|i| i as f32 / len as f32).collect();
        SampleBuffer::from_channels(rate, vec![ch.clone(), ch])
    }

    #[test]
    fn trim_whole_range_keeps_length() {
        let buf = ramp(44_100, 44_100 * 3);
        let out = trim_buffer(&buf, 0, buf.duration_ms()).unwrap();
        assert_eq!(out.length(), buf.length());
        assert_eq!(out.number_of_channels(), 2);
    }

    #[test]
    fn trim_copies_exact_samples() {
        let buf = ramp(1_000, 1_000);
        let out = trim_buffer(&buf, 250, 500).unwrap();
        assert_eq!(out.length(), 250);
        assert_eq!(out.channel(0)[0], buf.channel(0)[250]);
        assert_eq!(out.channel(1)[249], buf.channel(1)[499]);
    }

    #[test]
    fn trim_clamps_past_the_end() {
        let buf = ramp(1_000, 1_000);
        assert_eq!(trim_buffer(&buf, 900, 5_000).unwrap().length(), 100);
        assert!(matches!(trim_buffer(&buf, 2_000, 3_000), Err(MediaError::EmptyRange { .. })));
        assert!(trim_buffer(&buf, 500, 500).is_err());
    }

    #[test]
    fn merge_upmixes_mono_into_both_channels() {
        let mono = Arc::new(SampleBuffer::from_channels(8_000, vec![vec![0.25; 4]]));
        let stereo = Arc::new(SampleBuffer::from_channels(8_000, vec![vec![0.5; 2], vec![-0.5; 2]]));
        let merged = merge_buffers(&[mono, stereo]).unwrap();

        assert_eq!(merged.number_of_channels(), 2);
        assert_eq!(merged.length(), 6);
        assert_eq!(merged.channel(0), &[0.25, 0.25, 0.25, 0.25, 0.5, 0.5]);
        assert_eq!(merged.channel(1), &[0.25, 0.25, 0.25, 0.25, -0.5, -0.5]);
    }

    #[test]
    fn merge_edge_cases() {
        assert!(merge_buffers(&[]).is_none());
        let one = Arc::new(ramp(8_000, 10));
        let same = merge_buffers(&[Arc::clone(&one)]).unwrap();
        assert!(Arc::ptr_eq(&one, &same));

        // rate of the first input wins
        let a = Arc::new(SampleBuffer::silent(22_050, 1, 5));
        let b = Arc::new(SampleBuffer::silent(48_000, 1, 5));
        assert_eq!(merge_buffers(&[a, b]).unwrap().sample_rate(), 22_050);
    }
}
