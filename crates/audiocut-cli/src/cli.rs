// crates/audiocut-cli/src/cli.rs
//
// Command-line surface of `audiocut`.

use std::path::PathBuf;

use audiocut_core::media_types::ExportFormat;
use audiocut_media::encode::SUPPORTED_KBPS;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "audiocut")]
#[command(author, version, about = "Cut audio files into named segments and export them")]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show sample rate, channel count and duration of a file
    Info {
        file: PathBuf,
    },

    /// Split a file into equal parts and write the segment list as JSON
    Plan {
        file: PathBuf,

        /// Number of equal parts
        #[arg(short, long)]
        parts: usize,

        /// Output JSON path (default: <stem>_segments.json next to the file)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Export segments of a file as individual files or one zip
    Split(SplitArgs),

    /// Concatenate files in order into one
    Merge {
        /// Files to merge, in order (at least two)
        #[arg(required = true, num_args = 2..)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Output path (default: merged_audio.<ext> in the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print overview amplitudes for drawing a waveform
    Waveform {
        file: PathBuf,

        /// Number of columns
        #[arg(short, long, default_value_t = 1000)]
        width: usize,
    },
}

#[derive(Args)]
pub struct SplitArgs {
    pub file: PathBuf,

    /// Split into this many equal parts
    #[arg(short, long, conflicts_with = "segments", required_unless_present = "segments")]
    pub parts: Option<usize>,

    /// Segment list previously written by `plan` (or any compatible JSON)
    #[arg(short, long)]
    pub segments: Option<PathBuf>,

    #[command(flatten)]
    pub encoding: EncodingArgs,

    /// Pack all segments into <stem>_segments.zip
    #[arg(long)]
    pub zip: bool,

    /// Add the untouched source to the zip as full_original.<ext>
    #[arg(long, requires = "zip")]
    pub keep_original: bool,

    /// Directory for the exported files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Args)]
pub struct EncodingArgs {
    /// Output format: wav or mp3
    #[arg(short, long, default_value = "wav")]
    pub format: ExportFormat,

    /// MP3 bitrate in kbps (8-320, standard MP3 rates only)
    #[arg(long, default_value_t = 128, value_parser = parse_kbps)]
    pub kbps: u32,
}

fn parse_kbps(text: &str) -> Result<u32, String> {
    let kbps: u32 = text.parse().map_err(|_| format!("'{text}' is not a number"))?;
    if SUPPORTED_KBPS.contains(&kbps) {
        Ok(kbps)
    } else {
        let list: Vec<String> = SUPPORTED_KBPS.iter().map(u32::to_string).collect();
        Err(format!("unsupported MP3 bitrate {kbps}; use one of {}", list.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_bitrate_is_rejected_at_parse_time() {
        let err = Cli::try_parse_from(["audiocut", "merge", "a.wav", "b.wav", "--kbps", "100"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("unsupported MP3 bitrate 100"));
        assert!(Cli::try_parse_from(["audiocut", "merge", "a.wav", "b.wav", "--kbps", "192"]).is_ok());
    }
}
