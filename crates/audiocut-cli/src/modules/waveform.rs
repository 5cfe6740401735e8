// crates/audiocut-cli/src/modules/waveform.rs
//
// `audiocut waveform <file>`: one mean-amplitude value per column, one per
// line, for whatever draws the overview.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::context::AppContext;

pub fn run(ctx: &mut AppContext, file: &Path, width: usize) -> Result<()> {
    ctx.load(file)?;
    let columns = ctx.engine.waveform(width).context("no audio loaded")?;

    let mut out = BufWriter::new(io::stdout().lock());
    for value in &columns {
        writeln!(out, "{value:.6}")?;
    }
    out.flush()?;

    ctx.engine.release();
    Ok(())
}
