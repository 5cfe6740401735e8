// crates/audiocut-media/src/decode.rs
//
// Whole-file decode into a planar `SampleBuffer` via symphonia.
//
// Everything is decoded up front: segment trimming needs random access to
// any sample, and the files this tool handles (talks, recordings, songs)
// fit comfortably in memory as f32.
//
// Packet loop:
//   • end of stream is an `IoError(UnexpectedEof)`, or `ResetRequired` for
//     chained streams; both end the loop normally.
//   • packets from other tracks (e.g. the video track of an .mp4) are skipped.
//   • a corrupt packet (`DecodeError`) is skipped with a warning; the rest
//     of the file is still usable.

use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer as InterleavedSamples;
use symphonia::core::codecs::{CodecParameters, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::buffer::SampleBuffer;
use crate::error::MediaError;

/// An opened container positioned at the first audio track.
pub(crate) struct OpenedTrack {
    pub reader:   Box<dyn FormatReader>,
    pub track_id: u32,
    pub params:   CodecParameters,
}

/// Probe `bytes` and select the first track that carries a decodable codec.
pub(crate) fn open_track(bytes: Vec<u8>, extension: Option<&str>) -> Result<OpenedTrack, MediaError> {
    open_source(Box::new(Cursor::new(bytes)), extension)
}

/// Like `open_track`, reading from any seekable source (e.g. a `File`) so
/// only the container header has to be read.
pub(crate) fn open_source(source: Box<dyn MediaSource>, extension: Option<&str>) -> Result<OpenedTrack, MediaError> {
    let mss = MediaSourceStream::new(source, Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| MediaError::Decode(e.to_string()))?;

    let reader = probed.format;
    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(MediaError::NoAudioTrack)?;

    Ok(OpenedTrack { track_id: track.id, params: track.codec_params.clone(), reader })
}

/// Decode an in-memory file. `extension` (without the dot) helps the prober
/// pick a demuxer but is not required.
pub fn decode_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<SampleBuffer, MediaError> {
    let OpenedTrack { mut reader, track_id, params } = open_track(bytes, extension)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| MediaError::Decode(e.to_string()))?;

    let mut sample_rate = params.sample_rate.unwrap_or(0);
    let mut planes: Vec<Vec<f32>> = Vec::new();

    loop {
        let packet = match reader.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(MediaError::Decode(e.to_string())),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(msg)) => {
                warn!(error = %msg, "skipping corrupt audio packet");
                continue;
            }
            Err(e) => return Err(MediaError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        let n_ch = spec.channels.count();
        sample_rate = spec.rate;
        if planes.len() < n_ch {
            let len = planes.first().map_or(0, Vec::len);
            planes.resize_with(n_ch, || vec![0.0; len]);
        }

        let mut interleaved = InterleavedSamples::<f32>::new(frames as u64, spec);
        interleaved.copy_interleaved_ref(decoded);
        for frame in interleaved.samples().chunks_exact(n_ch) {
            for (plane, &s) in planes.iter_mut().zip(frame) {
                plane.push(s);
            }
        }
    }

    if planes.first().map_or(true, Vec::is_empty) || sample_rate == 0 {
        return Err(MediaError::EmptyStream);
    }

    let buffer = SampleBuffer::from_channels(sample_rate, planes);
    debug!(
        sample_rate,
        channels = buffer.number_of_channels(),
        frames = buffer.length(),
        "decoded audio"
    );
    Ok(buffer)
}

/// Read and decode a file from disk, using its extension as the probe hint.
pub fn decode_file(path: &Path) -> Result<SampleBuffer, MediaError> {
    let bytes = std::fs::read(path)?;
    decode_bytes(bytes, extension_of(path))
}

pub(crate) fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
