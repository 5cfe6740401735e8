// crates/audiocut-media/src/wav.rs
//
// 16-bit PCM WAV writer.
//
// Layout (44-byte header, all little-endian):
//   RIFF  <file_size - 8>  WAVE
//   fmt   16  <format=1 PCM>  <channels>  <rate>
//             <byte_rate = rate * 2 * channels>  <block_align = channels * 2>  <bits=16>
//   data  <length * channels * 2>  <interleaved samples…>
//
// Float → int16 conversion is asymmetric: clamp to [-1, 1], then scale
// negatives by 0x8000 and everything else by 0x7FFF, truncating. -1.0 maps to
// -32768 and 1.0 to 32767 exactly. The MP3 path uses the same conversion.

use crate::buffer::SampleBuffer;
use crate::error::MediaError;

pub const HEADER_LEN: usize = 44;

const FORMAT_PCM:      u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Convert one float sample to signed 16-bit PCM.
#[inline]
pub fn to_pcm16(s: f32) -> i16 {
    let s = s.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}

/// Convert a whole channel.
pub fn channel_to_pcm16(samples: &[f32]) -> Vec<i16> {
    samples.iter().copied().map(to_pcm16).collect()
}

/// Size of the data chunk for `frames` frames of `channels` 16-bit samples.
/// RIFF stores sizes as u32, so anything that would not fit (with the 36
/// header bytes the RIFF size adds) is rejected.
pub fn data_chunk_size(frames: usize, channels: usize) -> Result<u32, MediaError> {
    let bytes = (frames as u64)
        .saturating_mul(channels as u64)
        .saturating_mul(u64::from(BITS_PER_SAMPLE / 8));
    u32::try_from(bytes)
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or(MediaError::TooLarge { bytes })
}

/// Serialise `buf` as a complete WAV file.
pub fn encode_wav(buf: &SampleBuffer) -> Result<Vec<u8>, MediaError> {
    let data_size = data_chunk_size(buf.length(), buf.number_of_channels())?;
    let block_align = buf
        .number_of_channels()
        .checked_mul(usize::from(BITS_PER_SAMPLE / 8))
        .and_then(|n| u16::try_from(n).ok())
        .ok_or(MediaError::TooLarge { bytes: u64::from(data_size) })?;
    let channels = block_align / (BITS_PER_SAMPLE / 8);
    let rate = buf.sample_rate();
    let byte_rate = rate.saturating_mul(u32::from(block_align));

    let mut out = Vec::with_capacity(HEADER_LEN + data_size as usize);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt  chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    for frame in 0..buf.length() {
        for ch in buf.channels() {
            out.extend_from_slice(&to_pcm16(ch[frame]).to_le_bytes());
        }
    }

    Ok(out)
}
