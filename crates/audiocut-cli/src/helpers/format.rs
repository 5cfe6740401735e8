// crates/audiocut-cli/src/helpers/format.rs
//
// Terminal string utilities that don't belong in audiocut-core.
//
// Time and duration formatting lives in audiocut_core::helpers::time; use
// those for anything involving milliseconds. This module only lays text out
// for a terminal.

use audiocut_core::helpers::time::{format_duration, format_time};
use audiocut_core::segment::Segment;

const NAME_COLUMN: usize = 28;

/// Truncates `text` to at most `max_chars` characters, ending in "…" when
/// something was cut.
pub fn fit_label(text: &str, max_chars: usize) -> String {
    const ELLIPSIS: &str = "…";
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    // Reserve one slot for the ellipsis character itself.
    let keep = max_chars - 1;
    text.chars().take(keep).collect::<String>() + ELLIPSIS
}

/// One line per segment: id, name, start, end, length. Sub-segments are
/// indented by depth.
pub fn segment_table(segments: &[Segment]) -> String {
    let mut out = String::new();
    for seg in segments {
        let indent = "  ".repeat(seg.id.depth().saturating_sub(1));
        let id = format!("{indent}{}", seg.id);
        out.push_str(&format!(
            "{id:<10} {name:<width$} {start} → {end}  ({len})\n",
            name  = fit_label(&seg.name, NAME_COLUMN),
            width = NAME_COLUMN,
            start = format_time(seg.start_ms),
            end   = format_time(seg.end_ms),
            len   = format_duration(seg.duration_ms()),
        ));
    }
    out
}

/// `[current/total] status`
pub fn progress_line(current: usize, total: usize, status: &str) -> String {
    format!("[{current}/{total}] {status}")
}

#[cfg(test)]
mod tests {
    use audiocut_core::segment::SegmentKey;

    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(fit_label("hello", 10), "hello");
    }

    #[test]
    fn zero_budget_returns_empty() {
        assert_eq!(fit_label("hello", 0), "");
    }

    #[test]
    fn truncated_text_has_ellipsis() {
        let result = fit_label("hello world long name", 6);
        assert_eq!(result, "hello…");
        assert_eq!(result.chars().count(), 6);
    }

    #[test]
    fn table_indents_children() {
        let seg = |id: &str, name: &str| Segment {
            key:      SegmentKey::new(),
            id:       id.into(),
            name:     name.into(),
            start_ms: 0,
            end_ms:   61_500,
        };
        let table = segment_table(&[seg("1", "Intro"), seg("1-1", "Detail")]);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("1 "));
        assert!(lines[1].starts_with("  1-1"));
        assert!(lines[0].contains("00:00.000 → 01:01.500  (1:01)"));
    }

    #[test]
    fn progress_prefix() {
        assert_eq!(progress_line(2, 5, "Processing segment 2..."), "[2/5] Processing segment 2...");
    }
}
