// crates/audiocut-core/src/project.rs
//
// The segment JSON document: the only persisted form of a segment list.
//
//   { "version": "1.1", "source_file": "...",
//     "segments": [ { "id", "name", "start_ms", "end_ms" }, ... ] }
//
// Export always writes this flat shape, whatever the hierarchy; the hierarchy
// lives in the id strings. Exported text starts with a UTF-8 BOM so editors
// render non-ASCII names correctly; import strips it again.
//
// Import is a boundary: every failure becomes an `ImportOutcome` with
// `success = false`, and a failed import leaves the manager untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ImportError;
use crate::manager::SegmentManager;
use crate::segment::{NewSegment, SegmentId};

pub const FORMAT_VERSION: &str = "1.1";

/// Byte-order mark prepended to exported JSON text.
pub const BOM: char = '\u{feff}';

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version:     String,
    pub source_file: String,
    pub segments:    Vec<SegmentRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub id:       String,
    pub name:     String,
    pub start_ms: i64,
    pub end_ms:   i64,
}

impl ProjectFile {
    /// Pretty-printed JSON prefixed with the BOM, ready to write to disk.
    pub fn to_json_with_bom(&self) -> Result<String, serde_json::Error> {
        let body = serde_json::to_string_pretty(self)?;
        let mut out = String::with_capacity(body.len() + BOM.len_utf8());
        out.push(BOM);
        out.push_str(&body);
        Ok(out)
    }
}

/// Result of an import, shaped for direct display to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
    pub count:   usize,
}

impl ImportOutcome {
    fn from_result(result: Result<usize, ImportError>) -> Self {
        match result {
            Ok(count) => Self { success: true, message: format!("Imported {count} segments"), count },
            Err(e) => Self { success: false, message: format!("Import failed: {e}"), count: 0 },
        }
    }
}

/// `"talk.mp3"` → `"talk_segments.json"`; no source → `"segments_segments.json"`.
pub fn export_file_name(source_file: Option<&str>) -> String {
    let stem = source_file.map(strip_extension).unwrap_or("segments");
    format!("{stem}_segments.json")
}

/// Drop the last `.ext` from a file name (`"a.b.wav"` → `"a.b"`).
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => stem,
        _ => name,
    }
}

impl SegmentManager {
    /// Order-preserving snapshot of the current list.
    pub fn export_json(&self, source_file: &str) -> ProjectFile {
        ProjectFile {
            version:     FORMAT_VERSION.to_string(),
            source_file: source_file.to_string(),
            segments:    self
                .segments()
                .iter()
                .map(|s| SegmentRecord {
                    id:       s.id.to_string(),
                    name:     s.name.clone(),
                    start_ms: s.start_ms,
                    end_ms:   s.end_ms,
                })
                .collect(),
        }
    }

    /// Parse `text` and, if it is a valid document, replace the current list
    /// with its segments (supplied ids are kept).
    pub fn import_json(&mut self, text: &str) -> ImportOutcome {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let result = serde_json::from_str::<Value>(text)
            .map_err(ImportError::from)
            .and_then(|value| self.import_parsed(&value));
        self.log_import(result)
    }

    /// Same as `import_json` for an already-parsed document.
    pub fn import_value(&mut self, value: &Value) -> ImportOutcome {
        let result = self.import_parsed(value);
        self.log_import(result)
    }

    fn import_parsed(&mut self, value: &Value) -> Result<usize, ImportError> {
        let entries = parse_document(value)?;
        let count = entries.len();
        self.reset();
        for entry in entries {
            self.push_silent(entry);
        }
        self.notify();
        Ok(count)
    }

    fn log_import(&self, result: Result<usize, ImportError>) -> ImportOutcome {
        match &result {
            Ok(count) => info!(count, "imported segments"),
            Err(e) => warn!(error = %e, "segment import rejected"),
        }
        ImportOutcome::from_result(result)
    }
}

fn parse_document(value: &Value) -> Result<Vec<NewSegment>, ImportError> {
    let entries = value
        .get("segments")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingSegments)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: &Value) -> Result<NewSegment, ImportError> {
    let invalid = |reason: &str| ImportError::InvalidEntry { index, reason: reason.to_string() };

    let obj = entry.as_object().ok_or_else(|| invalid("not an object"))?;

    let id = match obj.get("id") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(SegmentId::new(s.as_str())),
        Some(Value::Number(n)) => Some(SegmentId::new(n.to_string())),
        Some(_) => return Err(invalid("'id' must be a string or number")),
    };

    let name = match obj.get("name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(invalid("'name' must be a string")),
    };

    let time = |key: &str| -> Result<i64, ImportError> {
        let v = obj.get(key).ok_or_else(|| invalid(&format!("missing '{key}'")))?;
        v.as_i64()
            .or_else(|| v.as_f64().map(|f| f.floor() as i64))
            .ok_or_else(|| invalid(&format!("'{key}' must be a number")))
    };

    Ok(NewSegment { id, name, start_ms: time("start_ms")?, end_ms: time("end_ms")? })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::segment::NewSegment;

    fn content(m: &SegmentManager) -> Vec<(String, String, i64, i64)> {
        m.segments()
            .iter()
            .map(|s| (s.id.to_string(), s.name.clone(), s.start_ms, s.end_ms))
            .collect()
    }

    #[test]
    fn export_then_import_reproduces_the_list() {
        let mut m = SegmentManager::new();
        m.add_segment(NewSegment::new("Intro", 0, 1500));
        m.add_segment(NewSegment::new("Kapitel ü", 1500, 9000));
        m.add_sub_segment(&"2".into(), NewSegment::new("detail", 2000, 3000)).unwrap();
        let before = content(&m);

        let text = m.export_json("talk.mp3").to_json_with_bom().unwrap();
        assert!(text.starts_with(BOM));
        assert!(text.contains("\"start_ms\""));

        let mut other = SegmentManager::new();
        let outcome = other.import_json(&text);
        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(outcome.count, 3);
        assert_eq!(outcome.message, "Imported 3 segments");
        assert_eq!(content(&other), before);
    }

    #[test]
    fn scenario_round_trip_is_identical() {
        let mut m = SegmentManager::new();
        m.auto_split(30_000, 3).unwrap();
        let exported = m.export_json("clip.wav");
        let value = serde_json::to_value(&exported).unwrap();

        let mut again = SegmentManager::new();
        assert!(again.import_value(&value).success);
        assert_eq!(again.export_json("clip.wav"), exported);
    }

    #[test]
    fn export_shape_is_snake_case() {
        let mut m = SegmentManager::new();
        m.add_segment(NewSegment::new("a", 1, 2));
        let value = serde_json::to_value(m.export_json("x.wav")).unwrap();
        assert_eq!(
            value,
            json!({
                "version": "1.1",
                "source_file": "x.wav",
                "segments": [{ "id": "1", "name": "a", "start_ms": 1, "end_ms": 2 }]
            })
        );
    }

    #[test]
    fn missing_segments_array_fails_without_touching_state() {
        let mut m = SegmentManager::new();
        m.add_segment(NewSegment::new("keep", 0, 10));

        let outcome = m.import_json(r#"{ "segments": "nope" }"#);
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Import failed:"));

        assert!(!m.import_json("{ not json").success);
        assert!(!m.import_json(r#"{ "segments": [ { "name": "x" } ] }"#).success);
        assert_eq!(m.len(), 1);
        assert_eq!(m.segments()[0].name, "keep");
    }

    #[test]
    fn import_tolerates_numeric_ids_and_extra_fields() {
        let mut m = SegmentManager::new();
        let outcome = m.import_json(
            r#"{ "segments": [
                { "id": 4, "name": "n", "start_ms": 0, "end_ms": 10, "color": "red" },
                { "name": "auto", "start_ms": 10, "end_ms": 20 }
            ], "extra": true }"#,
        );
        assert!(outcome.success);
        assert_eq!(m.segments()[0].id.as_str(), "4");
        assert_eq!(m.segments()[1].id.as_str(), "1");
    }

    #[test]
    fn extreme_imported_times_do_not_break_later_edits() {
        let mut m = SegmentManager::new();
        let outcome = m.import_json(
            r#"{ "segments": [
                { "id": "1", "name": "huge", "start_ms": -9223372036854775808, "end_ms": 9223372036854775807 }
            ] }"#,
        );
        assert!(outcome.success);
        assert_eq!(m.segments()[0].duration_ms(), i64::MAX);

        let added = m.append_default_segment(1000);
        assert_eq!((added.start_ms, added.end_ms), (i64::MAX, 1000));
        assert!(!m.validate_all(1000).valid);
    }

    #[test]
    fn file_names() {
        assert_eq!(export_file_name(Some("talk.final.mp3")), "talk.final_segments.json");
        assert_eq!(export_file_name(None), "segments_segments.json");
        assert_eq!(strip_extension("noext"), "noext");
    }
}
