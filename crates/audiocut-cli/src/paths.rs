// crates/audiocut-cli/src/paths.rs
// Single source of truth for where audiocut reads and writes files.

use std::path::{Path, PathBuf};

use audiocut_core::project::{export_file_name, strip_extension};

/// Final path component as UTF-8 (lossy).
pub fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// File name without its last extension: `/a/talk.final.mp3` → `talk.final`.
pub fn stem(path: &Path) -> String {
    file_name(path).map_or_else(String::new, |n| strip_extension(&n).to_string())
}

/// `<dir of source>/<stem>_segments.json`.
pub fn default_segments_json(source: &Path) -> PathBuf {
    let name = export_file_name(file_name(source).as_deref());
    source.parent().map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lands_next_to_source() {
        assert_eq!(
            default_segments_json(Path::new("/rec/talk.mp3")),
            PathBuf::from("/rec/talk_segments.json")
        );
        assert_eq!(stem(Path::new("/rec/talk.final.mp3")), "talk.final");
    }
}
