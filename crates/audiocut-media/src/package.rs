// crates/audiocut-media/src/package.rs
//
// Naming and bundling of exported segments.
//
//   individual file   {base}_{segment name}.{ext}
//   zip archive       {base}_segments.zip
//     entries         {segment name}.{ext}, plus full_original.{ext} on request
//   merge output      merged_audio.{ext}
//
// Segment names are user text. Path separators become `_` so a name can
// never escape the output directory or create zip subfolders. Failed
// results are skipped.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use audiocut_core::media_types::ExportFormat;

use crate::engine::ExportResult;
use crate::error::MediaError;

pub const MERGED_STEM:   &str = "merged_audio";
pub const ORIGINAL_STEM: &str = "full_original";

/// Make `name` safe to use as a single path component.
pub fn safe_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    match cleaned.trim() {
        "" | "." | ".." => "untitled".to_string(),
        _ => cleaned,
    }
}

pub fn individual_file_name(base: &str, segment_name: &str, format: ExportFormat) -> String {
    format!("{}_{}.{}", safe_component(base), safe_component(segment_name), format.extension())
}

pub fn zip_file_name(base: &str) -> String {
    format!("{}_segments.zip", safe_component(base))
}

pub fn merged_file_name(format: ExportFormat) -> String {
    format!("{MERGED_STEM}.{}", format.extension())
}

/// Extension of an original file name, the text after the last dot (the
/// whole name when there is none).
pub fn original_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// Hands out `stem.ext`, then `stem_2.ext`, `stem_3.ext`, ... for repeats.
#[derive(Default)]
struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    fn claim(&mut self, stem: &str, ext: &str) -> String {
        let mut name = format!("{stem}.{ext}");
        let mut n = 2;
        while !self.taken.insert(name.clone()) {
            name = format!("{stem}_{n}.{ext}");
            n += 1;
        }
        name
    }
}

/// Bundle every successful result into one zip archive, in result order.
/// `original` is `(file name, bytes)` of the untouched source.
pub fn build_zip(results: &[ExportResult], original: Option<(&str, &[u8])>) -> Result<Vec<u8>, MediaError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut names = UniqueNames::default();

    for result in results {
        let Ok(audio) = &result.outcome else { continue };
        let entry = names.claim(&safe_component(&result.segment.name), audio.format.extension());
        zip.start_file(entry.as_str(), options)?;
        zip.write_all(&audio.data)?;
        debug!(entry, bytes = audio.data.len(), "zip entry");
    }

    if let Some((file_name, bytes)) = original {
        let entry = names.claim(ORIGINAL_STEM, &safe_component(original_extension(file_name)));
        zip.start_file(entry.as_str(), options)?;
        zip.write_all(bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Write every successful result to `dir` as an individual file.
pub fn write_individual(dir: &Path, base: &str, results: &[ExportResult]) -> Result<Vec<PathBuf>, MediaError> {
    std::fs::create_dir_all(dir)?;
    let mut names = UniqueNames::default();
    let mut written = Vec::new();

    for result in results {
        let Ok(audio) = &result.outcome else { continue };
        let stem = format!("{}_{}", safe_component(base), safe_component(&result.segment.name));
        let path = dir.join(names.claim(&stem, audio.format.extension()));
        std::fs::write(&path, &audio.data)?;
        written.push(path);
    }

    info!(files = written.len(), dir = %dir.display(), "wrote segment files");
    Ok(written)
}
