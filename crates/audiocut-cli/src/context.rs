// crates/audiocut-cli/src/context.rs
//
// AppContext owns the runtime objects one command works with: the segment
// list, the audio engine and the path of the loaded source. main.rs builds
// exactly one per run and hands it to the command module; nothing is global.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use audiocut_core::manager::SegmentManager;
use audiocut_core::media_types::AudioInfo;
use audiocut_media::engine::{AudioEngine, EngineConfig};

use crate::paths;

pub struct AppContext {
    pub manager: SegmentManager,
    pub engine:  AudioEngine,
    source:      Option<PathBuf>,
}

impl AppContext {
    pub fn new(config: EngineConfig) -> Self {
        let mut manager = SegmentManager::new();
        manager.set_on_change(|segments| debug!(count = segments.len(), "segment list changed"));
        Self { manager, engine: AudioEngine::with_config(config), source: None }
    }

    /// Decode `path` into the engine and remember it as the source.
    pub fn load(&mut self, path: &Path) -> Result<AudioInfo> {
        let info = self
            .engine
            .load_file(path)
            .with_context(|| format!("could not load {}", path.display()))?;
        self.source = Some(path.to_path_buf());
        Ok(info)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// File name of the source, e.g. `"talk.mp3"`.
    pub fn source_name(&self) -> Option<String> {
        self.source.as_deref().and_then(paths::file_name)
    }

    /// Source name without its extension, used to name exports.
    pub fn base_name(&self) -> String {
        self.source.as_deref().map_or_else(|| "audio".to_string(), paths::stem)
    }
}
