// crates/audiocut-cli/src/modules/plan.rs
//
// `audiocut plan <file> --parts N`: split the file's duration into N equal
// segments and save the list as a project JSON the `split` command (or any
// compatible tool) can import later.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::context::AppContext;
use crate::helpers::format::segment_table;
use crate::paths;

pub fn run(ctx: &mut AppContext, file: &Path, parts: usize, out: Option<&Path>) -> Result<()> {
    // Only the duration is needed, so skip keeping the samples around.
    let duration_ms = (ctx.engine.get_duration(file) * 1000.0).floor() as i64;
    if duration_ms <= 0 {
        anyhow::bail!("could not read a duration from {}", file.display());
    }

    ctx.manager.auto_split(duration_ms, parts)?;
    print!("{}", segment_table(ctx.manager.segments()));

    let source_name = paths::file_name(file).unwrap_or_default();
    let project = ctx.manager.export_json(&source_name);
    let json = project.to_json_with_bom()?;

    let target = out.map_or_else(|| paths::default_segments_json(file), Path::to_path_buf);
    fs::write(&target, json).with_context(|| format!("could not write {}", target.display()))?;

    info!(path = %target.display(), segments = ctx.manager.len(), "segment list saved");
    println!("Saved {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use audiocut_core::project::BOM;
    use audiocut_media::buffer::SampleBuffer;
    use audiocut_media::engine::EngineConfig;
    use audiocut_media::wav::encode_wav;

    use super::*;

    #[test]
    fn writes_project_json_next_to_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("talk.wav");
        // 3 s of 8 kHz mono silence.
        fs::write(&source, encode_wav(&SampleBuffer::silent(8000, 1, 24_000)).unwrap()).unwrap();

        let mut ctx = AppContext::new(EngineConfig::default());
        run(&mut ctx, &source, 3, None).unwrap();

        let written = fs::read_to_string(dir.path().join("talk_segments.json")).unwrap();
        assert!(written.starts_with(BOM));
        let value: serde_json::Value = serde_json::from_str(written.trim_start_matches(BOM)).unwrap();
        assert_eq!(value["source_file"], "talk.wav");
        assert_eq!(value["segments"].as_array().unwrap().len(), 3);
        assert_eq!(value["segments"][2]["end_ms"], 3000);
    }
}
