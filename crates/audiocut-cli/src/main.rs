// crates/audiocut-cli/src/main.rs
//
// Entry point of the `audiocut` binary: parse arguments, set up logging,
// build one AppContext and hand it to the command module.

mod cli;
mod context;
mod helpers;
mod modules;
mod paths;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use audiocut_media::engine::EngineConfig;
use cli::{Cli, Commands};
use context::AppContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins when set; otherwise --verbose picks debug for our crates.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "audiocut=debug,audiocut_core=debug,audiocut_media=debug".to_string()
        } else {
            "audiocut=info,audiocut_core=info,audiocut_media=info".to_string()
        }
    });

    // Logs go to stderr so stdout stays clean for command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { file } => {
            let mut ctx = AppContext::new(EngineConfig::default());
            modules::info::run(&mut ctx, &file)
        }
        Commands::Plan { file, parts, out } => {
            let mut ctx = AppContext::new(EngineConfig::default());
            modules::plan::run(&mut ctx, &file, parts, out.as_deref())
        }
        Commands::Split(args) => {
            let mut ctx = AppContext::new(EngineConfig { mp3_kbps: args.encoding.kbps });
            modules::split::run(&mut ctx, &args)
        }
        Commands::Merge { files, encoding, out } => {
            let mut ctx = AppContext::new(EngineConfig { mp3_kbps: encoding.kbps });
            modules::merge::run(&mut ctx, &files, encoding.format, out.as_deref())
        }
        Commands::Waveform { file, width } => {
            let mut ctx = AppContext::new(EngineConfig::default());
            modules::waveform::run(&mut ctx, &file, width)
        }
    }
}
