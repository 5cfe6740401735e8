// crates/audiocut-cli/src/modules/info.rs
//
// `audiocut info <file>`: decode once and report what the engine sees.

use std::path::Path;

use anyhow::Result;

use audiocut_core::helpers::time::{format_duration, format_time};

use crate::context::AppContext;

pub fn run(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let info = ctx.load(file)?;
    let name = ctx.source_name().unwrap_or_default();

    println!("{name}");
    println!("  duration     {} ({})", format_time(info.duration_ms), format_duration(info.duration_ms));
    println!("  sample rate  {} Hz", info.sample_rate);
    println!("  channels     {}", info.number_of_channels);
    println!("  frames       {}", info.length);
    println!("  seconds      {:.3}", info.duration_secs());

    ctx.engine.release();
    Ok(())
}
