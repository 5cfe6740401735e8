// crates/audiocut-core/src/segment.rs
//
// Segment data model.
//
// Hierarchy is carried by the id itself: "2" is a top-level segment, "2-1"
// its first child, "2-1-3" a grandchild. `SegmentId` wraps the string and
// answers hierarchy questions component-wise, so nothing else in the crate
// does raw prefix matching.
//
// Ids are labels, not identity: they are rewritten by renumbering and may be
// edited by the user. `SegmentKey` is the stable handle a host should keep
// when it needs to find "the same segment" again after an edit.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum nesting depth accepted by `SegmentManager::add_sub_segment`.
pub const MAX_DEPTH: usize = 3;

// ── SegmentKey ────────────────────────────────────────────────────────────────

/// Opaque handle that survives renumbering, updates and reordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentKey(Uuid);

impl SegmentKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SegmentKey {
    fn default() -> Self {
        Self::new()
    }
}

// ── SegmentId ─────────────────────────────────────────────────────────────────

/// Dash-delimited hierarchical id such as `"3"` or `"3-1-2"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(String);

impl SegmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for the `n`-th top-level segment.
    pub fn top_level(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Id for the `k`-th child of `self`.
    pub fn child(&self, k: u64) -> Self {
        Self(format!("{}-{k}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of dash-separated components.
    pub fn depth(&self) -> usize {
        self.0.split('-').count()
    }

    /// True for any id below the top level.
    pub fn is_sub(&self) -> bool {
        self.0.contains('-')
    }

    /// Id of the direct parent, if this is a sub-segment id.
    pub fn parent(&self) -> Option<SegmentId> {
        self.0.rsplit_once('-').map(|(parent, _)| SegmentId(parent.to_string()))
    }

    /// Last path component parsed as a number (`"2-7"` → 7).
    pub fn ordinal(&self) -> Option<u64> {
        self.0.rsplit('-').next().and_then(|last| last.parse().ok())
    }

    /// True when `self` lies anywhere in the subtree below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &SegmentId) -> bool {
        let a = ancestor.as_str();
        self.0.len() > a.len()
            && self.0.starts_with(a)
            && self.0.as_bytes()[a.len()] == b'-'
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SegmentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SegmentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A named time range `[start_ms, end_ms)` of the loaded source.
///
/// Times are signed so that out-of-range input (e.g. from an imported file)
/// can be represented and reported by validation instead of being rejected
/// at the type level.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub key:      SegmentKey,
    pub id:       SegmentId,
    pub name:     String,
    pub start_ms: i64,
    pub end_ms:   i64,
}

impl Segment {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    pub fn is_sub_segment(&self) -> bool {
        self.id.is_sub()
    }
}

/// Input for creating a segment. `id: None` lets the manager assign one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewSegment {
    pub id:       Option<SegmentId>,
    pub name:     String,
    pub start_ms: i64,
    pub end_ms:   i64,
}

impl NewSegment {
    pub fn new(name: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self { id: None, name: name.into(), start_ms, end_ms }
    }

    pub fn with_id(mut self, id: impl Into<SegmentId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Partial update: only `Some` fields are written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentPatch {
    pub id:       Option<SegmentId>,
    pub name:     Option<String>,
    pub start_ms: Option<i64>,
    pub end_ms:   Option<i64>,
}

impl SegmentPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn range(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms: Some(start_ms), end_ms: Some(end_ms), ..Self::default() }
    }

    pub(crate) fn apply_to(self, seg: &mut Segment) {
        if let Some(id) = self.id { seg.id = id; }
        if let Some(name) = self.name { seg.name = name; }
        if let Some(start) = self.start_ms { seg.start_ms = start; }
        if let Some(end) = self.end_ms { seg.end_ms = end; }
    }
}
