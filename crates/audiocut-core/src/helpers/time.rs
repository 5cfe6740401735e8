// crates/audiocut-core/src/helpers/time.rs
//
// Millisecond <-> text conversion and range checks shared by the segment
// manager, the media engine and the CLI.
//
// Every function here is total: parsing is best-effort and never fails,
// formatting clamps negative input. Only `validate_range` reports a problem,
// and it does so through a `RangeError` value rather than a panic.

use crate::error::RangeError;

/// Parse `"HH:MM:SS.mmm"`, `"MM:SS.mmm"` or `"SS.mmm"` into milliseconds.
///
/// Each component is read the way an integer prefix parser would: leading
/// whitespace and a sign are accepted, anything after the digits is ignored,
/// and a component without digits counts as 0. The part after the dot is an
/// integer count of milliseconds, so `"1.5"` is 1005 ms, not 1500 ms.
///
/// ```
/// use audiocut_core::helpers::time::parse_to_ms;
/// assert_eq!(parse_to_ms("01:02.003"),     62_003);
/// assert_eq!(parse_to_ms("1:00:00.000"), 3_600_000);
/// assert_eq!(parse_to_ms("  "),                  0);
/// assert_eq!(parse_to_ms("ab:cd"),               0);
/// ```
pub fn parse_to_ms(text: &str) -> i64 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }

    let parts: Vec<&str> = text.split(':').collect();
    let (hours, minutes, sec_part) = match parts.as_slice() {
        [h, m, s] => (int_prefix(h), int_prefix(m), *s),
        [m, s]    => (0, int_prefix(m), *s),
        // Four or more components: only the first one is read, as seconds.
        [s, ..]   => (0, 0, *s),
        []        => return 0,
    };

    let mut sec_split = sec_part.split('.');
    let seconds = sec_split.next().map(int_prefix).unwrap_or(0);
    let millis  = sec_split.next().map(int_prefix).unwrap_or(0);

    hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds)
        .saturating_mul(1000)
        .saturating_add(millis)
}

/// Integer-prefix parse: `" 12abc"` → 12, `"-3"` → -3, `"x"` → 0.
fn int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _          => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative { -value } else { value }
}

/// Format milliseconds as `MM:SS.mmm`. Negative input is treated as 0.
/// Minutes are not wrapped into hours.
///
/// ```
/// use audiocut_core::helpers::time::format_time;
/// assert_eq!(format_time(0),         "00:00.000");
/// assert_eq!(format_time(62_003),    "01:02.003");
/// assert_eq!(format_time(-5),        "00:00.000");
/// assert_eq!(format_time(6_000_000), "100:00.000");
/// ```
pub fn format_time(ms: i64) -> String {
    let ms = ms.max(0);
    let total_secs = ms / 1000;
    format!("{:02}:{:02}.{:03}", total_secs / 60, total_secs % 60, ms % 1000)
}

/// Format milliseconds as `MM:SS` for compact display.
///
/// ```
/// use audiocut_core::helpers::time::format_time_seconds;
/// assert_eq!(format_time_seconds(62_999), "01:02");
/// ```
pub fn format_time_seconds(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Human-readable duration: `H:MM:SS` when at least an hour, else `M:SS`.
///
/// | Range      | Format    | Example   |
/// |------------|-----------|-----------|
/// | ≥ 1 h      | `H:MM:SS` | `1:04:35` |
/// | < 1 h      | `M:SS`    | `3:07`    |
///
/// ```
/// use audiocut_core::helpers::time::format_duration;
/// assert_eq!(format_duration(187_000),   "3:07");
/// assert_eq!(format_duration(3_875_000), "1:04:35");
/// ```
pub fn format_duration(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let hours   = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Check a `[start_ms, end_ms)` range against an optional upper bound.
///
/// Rules are applied in order and the first failure is returned: negative
/// bounds, then `start >= end`, then `end > max_ms`.
pub fn validate_range(start_ms: i64, end_ms: i64, max_ms: Option<i64>) -> Result<(), RangeError> {
    if start_ms < 0 || end_ms < 0 {
        return Err(RangeError::Negative);
    }
    if start_ms >= end_ms {
        return Err(RangeError::StartNotBeforeEnd);
    }
    if let Some(max) = max_ms {
        if end_ms > max {
            return Err(RangeError::ExceedsDuration);
        }
    }
    Ok(())
}
