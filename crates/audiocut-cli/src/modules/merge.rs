// crates/audiocut-cli/src/modules/merge.rs
//
// `audiocut merge a b [c ...]`: concatenate files in the given order.
// The first file decides the sample rate; see splice::merge_buffers.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use audiocut_core::media_types::ExportFormat;
use audiocut_media::package::merged_file_name;

use crate::context::AppContext;

pub fn run(ctx: &mut AppContext, files: &[PathBuf], format: ExportFormat, out: Option<&Path>) -> Result<()> {
    if files.len() < 2 {
        bail!("merging needs at least two files");
    }

    let merged = ctx.engine.merge_files(files).context("merge failed")?;

    let mut stderr = std::io::stderr();
    let encoded = ctx.engine.encode(&merged, format, &mut |p| {
        let _ = write!(stderr, "\r\x1b[2KMP3 compression: {p}%");
        let _ = stderr.flush();
    })?;
    if format == ExportFormat::Mp3 {
        eprintln!();
    }

    // The default name follows the format actually produced, which is WAV
    // when MP3 was asked for but no encoder is available.
    let target = out.map_or_else(|| PathBuf::from(merged_file_name(encoded.format)), Path::to_path_buf);
    fs::write(&target, &encoded.data).with_context(|| format!("could not write {}", target.display()))?;

    info!(path = %target.display(), duration_ms = merged.duration_ms(), "merged file written");
    println!("Wrote {}", target.display());
    ctx.engine.release();
    Ok(())
}

#[cfg(test)]
mod tests {
    use audiocut_media::buffer::SampleBuffer;
    use audiocut_media::engine::EngineConfig;
    use audiocut_media::wav::encode_wav;

    use super::*;

    #[test]
    fn two_files_concatenate() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        fs::write(&a, encode_wav(&SampleBuffer::silent(8000, 1, 8000)).unwrap()).unwrap();
        fs::write(&b, encode_wav(&SampleBuffer::silent(8000, 1, 4000)).unwrap()).unwrap();
        let out = dir.path().join("joined.wav");

        let mut ctx = AppContext::new(EngineConfig::default());
        run(&mut ctx, &[a, b], ExportFormat::Wav, Some(&out)).unwrap();

        assert_eq!(fs::read(&out).unwrap().len(), 44 + 12_000 * 2);
    }

    #[test]
    fn single_file_is_refused() {
        let mut ctx = AppContext::new(EngineConfig::default());
        let err = run(&mut ctx, &[PathBuf::from("only.wav")], ExportFormat::Wav, None).unwrap_err();
        assert!(err.to_string().contains("at least two"));
    }
}
