// crates/audiocut-cli/src/modules/split.rs
//
// `audiocut split`: build the segment list (equal parts or an imported
// JSON), validate it against the loaded duration, encode every segment and
// write the results either as individual files or as one zip.
//
// A segment that fails to encode is reported and skipped; the command only
// fails outright when nothing can be exported at all.

use std::fs;
use std::io::Write;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use audiocut_media::package::{build_zip, write_individual, zip_file_name};

use crate::cli::SplitArgs;
use crate::context::AppContext;
use crate::helpers::format::{progress_line, segment_table};
use crate::paths;

pub fn run(ctx: &mut AppContext, args: &SplitArgs) -> Result<()> {
    let info = ctx.load(&args.file)?;

    if let Some(parts) = args.parts {
        ctx.manager.auto_split(info.duration_ms, parts)?;
    } else if let Some(json_path) = &args.segments {
        let text = fs::read_to_string(json_path)
            .with_context(|| format!("could not read {}", json_path.display()))?;
        let outcome = ctx.manager.import_json(&text);
        if !outcome.success {
            bail!("{}", outcome.message);
        }
        info!(count = outcome.count, "{}", outcome.message);
    }

    if ctx.manager.is_empty() {
        bail!("no segments to export");
    }

    let report = ctx.manager.validate_all(info.duration_ms);
    if !report.valid {
        bail!("segment list is invalid:\n  {}", report.errors.join("\n  "));
    }
    print!("{}", segment_table(ctx.manager.segments()));

    let segments = ctx.manager.segments().to_vec();
    let mut stderr = std::io::stderr();
    let results = ctx.engine.process_segments(
        &segments,
        &mut |current, total, status| {
            // Progress is cosmetic; a closed stderr must not abort the export.
            let _ = write!(stderr, "\r\x1b[2K{}", progress_line(current, total, status));
            let _ = stderr.flush();
        },
        args.encoding.format,
    );
    eprintln!();

    for failed in results.iter().filter(|r| !r.is_success()) {
        if let Err(msg) = &failed.outcome {
            warn!(segment = %failed.segment.id, "{msg}");
            eprintln!("Segment {} ({}) failed: {msg}", failed.segment.id, failed.segment.name);
        }
    }

    let ok = results.iter().filter(|r| r.is_success()).count();
    if ok == 0 {
        bail!("every segment failed to export");
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("could not create {}", args.out_dir.display()))?;
    let base = ctx.base_name();

    if args.zip {
        let original = match (args.keep_original, ctx.source()) {
            (true, Some(path)) => {
                let bytes = fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
                Some((paths::file_name(path).unwrap_or_default(), bytes))
            }
            _ => None,
        };
        let archive = build_zip(
            &results,
            original.as_ref().map(|(name, bytes)| (name.as_str(), bytes.as_slice())),
        )?;
        let target = args.out_dir.join(zip_file_name(&base));
        fs::write(&target, archive).with_context(|| format!("could not write {}", target.display()))?;
        println!("Wrote {}", target.display());
    } else {
        for path in write_individual(&args.out_dir, &base, &results)? {
            println!("Wrote {}", path.display());
        }
    }

    println!("{ok} of {} segments exported", results.len());
    ctx.engine.release();
    Ok(())
}
