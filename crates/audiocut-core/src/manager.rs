// crates/audiocut-core/src/manager.rs
//
// SegmentManager: the authoritative, observable list of segments.
//
// Ordering invariant: a segment's descendants immediately follow it and
// precede its next sibling. Insertion (`add_sub_segment`) and renumbering
// (`renumber_all`) both maintain it; renumbering rebuilds ids from sequence
// order, never the other way round.
//
// Notification: every successful mutating call invokes the registered
// listener exactly once with the full list. Rejected calls (Err) mutate
// nothing and notify nobody.

use std::fmt;

use tracing::debug;

use crate::error::EditError;
use crate::helpers::time::validate_range;
use crate::segment::{NewSegment, Segment, SegmentId, SegmentKey, SegmentPatch, MAX_DEPTH};

/// Callback receiving the current list after each change.
pub type ChangeListener = Box<dyn FnMut(&[Segment]) + Send>;

/// Length given to a segment appended by `append_default_segment`.
const DEFAULT_SEGMENT_MS: i64 = 10_000;

/// `split_at_cursor` refuses cursors closer than this to either end.
const CURSOR_MARGIN_MS: i64 = 100;

/// Aggregated result of `validate_all`. Every problem is listed, not just
/// the first one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid:  bool,
    pub errors: Vec<String>,
}

pub struct SegmentManager {
    segments:  Vec<Segment>,
    next_id:   u64,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for SegmentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentManager")
            .field("segments", &self.segments)
            .field("next_id", &self.next_id)
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}

impl Default for SegmentManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentManager {
    pub fn new() -> Self {
        Self { segments: Vec::new(), next_id: 1, on_change: None }
    }

    /// Register the single change listener, replacing any previous one.
    pub fn set_on_change(&mut self, listener: impl FnMut(&[Segment]) + Send + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, id: &SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| &s.id == id)
    }

    pub fn get_by_key(&self, key: SegmentKey) -> Option<&Segment> {
        self.segments.iter().find(|s| s.key == key)
    }

    pub fn index_of(&self, id: &SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| &s.id == id)
    }

    /// Direct children of `id`, in sequence order.
    pub fn children(&self, id: &SegmentId) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.id.parent().as_ref() == Some(id))
            .collect()
    }

    /// The segment whose id is the parent path of `id`, if present.
    pub fn parent_of(&self, id: &SegmentId) -> Option<&Segment> {
        id.parent().and_then(|p| self.get(&p))
    }

    pub fn is_sub_segment(&self, id: &SegmentId) -> bool {
        id.is_sub()
    }

    /// The counter used for the next auto-assigned top-level id.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    /// Append a segment, assigning a fresh top-level id when none is given.
    pub fn add_segment(&mut self, data: NewSegment) -> Segment {
        let seg = self.materialize(data);
        self.segments.push(seg.clone());
        self.notify();
        seg
    }

    /// Insert a child of `parent_id` after the parent's last descendant (or
    /// directly after the parent when it has none).
    ///
    /// Without a supplied id the child becomes `"{parent}-{k}"` for the
    /// smallest unused `k`.
    pub fn add_sub_segment(&mut self, parent_id: &SegmentId, data: NewSegment) -> Result<Segment, EditError> {
        let parent_idx = self
            .index_of(parent_id)
            .ok_or_else(|| EditError::ParentNotFound(parent_id.to_string()))?;
        if parent_id.depth() >= MAX_DEPTH {
            return Err(EditError::TooDeep(parent_id.to_string()));
        }

        let id = match data.id {
            Some(id) if !id.is_empty() => id,
            _ => self.next_child_id(parent_id),
        };
        let seg = Segment {
            key:      SegmentKey::new(),
            id,
            name:     data.name,
            start_ms: data.start_ms,
            end_ms:   data.end_ms,
        };

        let insert_at = self
            .segments
            .iter()
            .rposition(|s| s.id.is_descendant_of(parent_id))
            .map_or(parent_idx + 1, |last| last + 1);

        self.segments.insert(insert_at, seg.clone());
        self.notify();
        Ok(seg)
    }

    /// Shallow-merge `patch` into the segment with `id`.
    pub fn update_segment(&mut self, id: &SegmentId, patch: SegmentPatch) -> Result<(), EditError> {
        let seg = self
            .segments
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| EditError::NotFound(id.to_string()))?;
        patch.apply_to(seg);
        self.notify();
        Ok(())
    }

    /// Delete a segment. A top-level id takes its whole subtree with it; a
    /// sub-segment id removes only that one node.
    pub fn delete_segment(&mut self, id: &SegmentId) -> Result<(), EditError> {
        let index = self.index_of(id).ok_or_else(|| EditError::NotFound(id.to_string()))?;
        if id.is_sub() {
            self.segments.remove(index);
        } else {
            self.segments.retain(|s| &s.id != id && !s.id.is_descendant_of(id));
        }
        self.notify();
        Ok(())
    }

    /// Move the element at `from` to position `to`, then renumber so ids
    /// match the new order.
    pub fn reorder_segment(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        let len = self.segments.len();
        for index in [from, to] {
            if index >= len {
                return Err(EditError::IndexOutOfBounds { index, len });
            }
        }
        let moved = self.segments.remove(from);
        self.segments.insert(to, moved);
        self.renumber();
        self.notify();
        Ok(())
    }

    /// Rebuild every id from sequence order.
    ///
    /// Each depth-1 id (or the first element, whatever its depth) starts a new
    /// top-level number; everything up to the next depth-1 id becomes
    /// `"{main}-{n}"`. Deeper hierarchies collapse to two levels; names and
    /// times are untouched.
    pub fn renumber_all(&mut self) {
        self.renumber();
        self.notify();
    }

    /// Splice the segment at `id` out and put `replacements` in its place.
    /// Replacements without an id get fresh top-level ids.
    pub fn replace_segment(&mut self, id: &SegmentId, replacements: Vec<NewSegment>) -> Result<Vec<Segment>, EditError> {
        let index = self.index_of(id).ok_or_else(|| EditError::NotFound(id.to_string()))?;
        let inserted = self.splice_at(index, replacements);
        self.notify();
        Ok(inserted)
    }

    /// Remove everything and reset the id counter.
    pub fn clear_all(&mut self) {
        self.reset();
        self.notify();
    }

    /// Replace the list with `parts` contiguous equal-width segments covering
    /// `[0, total_ms]`. The last segment ends exactly at `total_ms`.
    pub fn auto_split(&mut self, total_ms: i64, parts: usize) -> Result<(), EditError> {
        if parts == 0 {
            return Err(EditError::InvalidSplitCount(parts));
        }
        self.reset();

        let width = total_ms as f64 / parts as f64;
        for i in 0..parts {
            let start_ms = (i as f64 * width).floor() as i64;
            let end_ms = if i + 1 == parts {
                total_ms
            } else {
                ((i + 1) as f64 * width).floor() as i64
            };
            let n = (i + 1) as u64;
            self.segments.push(Segment {
                key:  SegmentKey::new(),
                id:   SegmentId::top_level(n),
                name: format!("Segment {n}"),
                start_ms,
                end_ms,
            });
        }
        self.next_id = parts as u64 + 1;

        debug!(total_ms, parts, "auto split");
        self.notify();
        Ok(())
    }

    /// Append a segment starting where the last one ends (0 when empty),
    /// at most 10 s long and never past `duration_ms`.
    pub fn append_default_segment(&mut self, duration_ms: i64) -> Segment {
        let start_ms = self.segments.last().map_or(0, |s| s.end_ms);
        let end_ms = start_ms.saturating_add(DEFAULT_SEGMENT_MS).min(duration_ms);
        let name = format!("Segment {}", self.segments.len() + 1);
        self.add_segment(NewSegment::new(name, start_ms, end_ms))
    }

    /// Replace everything with two parts split at `cursor_ms`.
    pub fn split_at_cursor(&mut self, duration_ms: i64, cursor_ms: i64) -> Result<(), EditError> {
        if cursor_ms <= CURSOR_MARGIN_MS || cursor_ms >= duration_ms.saturating_sub(CURSOR_MARGIN_MS) {
            return Err(EditError::InvalidSplitPoint { at_ms: cursor_ms, start_ms: 0, end_ms: duration_ms });
        }
        self.reset();
        for (name, start_ms, end_ms) in [("Part 1", 0, cursor_ms), ("Part 2", cursor_ms, duration_ms)] {
            let seg = self.materialize(NewSegment::new(name, start_ms, end_ms));
            self.segments.push(seg);
        }
        self.notify();
        Ok(())
    }

    /// Sibling split: replace the segment with two adjacent halves meeting at
    /// `at_ms`, then renumber. The first half keeps the original key.
    pub fn split_segment_at(&mut self, id: &SegmentId, at_ms: i64) -> Result<(Segment, Segment), EditError> {
        let index = self.index_of(id).ok_or_else(|| EditError::NotFound(id.to_string()))?;
        let original = self.segments[index].clone();
        if at_ms <= original.start_ms || at_ms >= original.end_ms {
            return Err(EditError::InvalidSplitPoint {
                at_ms,
                start_ms: original.start_ms,
                end_ms:   original.end_ms,
            });
        }

        // The second half needs an id at the same depth so renumbering keeps
        // it a sibling; its exact value is rewritten below.
        let second_id = original.id.parent().map(|p| p.child(0));
        let second = self.materialize(NewSegment {
            id:       second_id,
            name:     format!("{} (2)", original.name),
            start_ms: at_ms,
            end_ms:   original.end_ms,
        });
        let second_key = second.key;

        let first = &mut self.segments[index];
        first.name = format!("{} (1)", original.name);
        first.end_ms = at_ms;

        // Descendants stay with the first half, so the second half goes after
        // the last of them.
        let insert_at = self
            .segments
            .iter()
            .rposition(|s| s.id.is_descendant_of(&original.id))
            .map_or(index + 1, |last| last + 1);
        self.segments.insert(insert_at, second);
        self.renumber();
        self.notify();

        let second_index = self
            .segments
            .iter()
            .position(|s| s.key == second_key)
            .unwrap_or(insert_at);
        Ok((self.segments[index].clone(), self.segments[second_index].clone()))
    }

    // ── Validation ───────────────────────────────────────────────────────────

    /// Check every segment and collect all problems.
    pub fn validate_all(&self, max_duration_ms: i64) -> ValidationReport {
        let mut errors = Vec::new();
        for (index, seg) in self.segments.iter().enumerate() {
            if seg.id.is_empty() || seg.name.is_empty() {
                errors.push(format!("Segment {}: missing id or name", index + 1));
            }
            if let Err(e) = validate_range(seg.start_ms, seg.end_ms, Some(max_duration_ms)) {
                errors.push(format!("Segment {}: {e}", seg.id));
            }
        }
        ValidationReport { valid: errors.is_empty(), errors }
    }

    // ── Internal ─────────────────────────────────────────────────────────────

    /// Clear the list and id counter without notifying.
    pub(crate) fn reset(&mut self) {
        self.segments.clear();
        self.next_id = 1;
    }

    /// Append without notifying; used by bulk operations that notify once.
    pub(crate) fn push_silent(&mut self, data: NewSegment) {
        let seg = self.materialize(data);
        self.segments.push(seg);
    }

    pub(crate) fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.segments);
        }
    }

    fn materialize(&mut self, data: NewSegment) -> Segment {
        let id = match data.id {
            Some(id) if !id.is_empty() => id,
            _ => self.alloc_top_level_id(),
        };
        Segment {
            key:      SegmentKey::new(),
            id,
            name:     data.name,
            start_ms: data.start_ms,
            end_ms:   data.end_ms,
        }
    }

    /// Next counter value whose id is not already taken. The counter only
    /// moves forward.
    fn alloc_top_level_id(&mut self) -> SegmentId {
        loop {
            let id = SegmentId::top_level(self.next_id);
            self.next_id += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn next_child_id(&self, parent: &SegmentId) -> SegmentId {
        (1..)
            .map(|k| parent.child(k))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or_else(|| parent.child(0))
    }

    fn splice_at(&mut self, index: usize, replacements: Vec<NewSegment>) -> Vec<Segment> {
        let inserted: Vec<Segment> = replacements.into_iter().map(|d| self.materialize(d)).collect();
        self.segments.splice(index..=index, inserted.iter().cloned());
        inserted
    }

    fn renumber(&mut self) {
        let mut main = 0u64;
        let mut current: Option<SegmentId> = None;
        let mut sub = 0u64;

        for seg in &mut self.segments {
            match &current {
                Some(parent) if seg.id.depth() > 1 => {
                    sub += 1;
                    seg.id = parent.child(sub);
                }
                _ => {
                    main += 1;
                    let id = SegmentId::top_level(main);
                    seg.id = id.clone();
                    current = Some(id);
                    sub = 0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn ids(m: &SegmentManager) -> Vec<&str> {
        m.segments().iter().map(|s| s.id.as_str()).collect()
    }

    fn tree() -> SegmentManager {
        let mut m = SegmentManager::new();
        m.add_segment(NewSegment::new("one", 0, 1000));
        m.add_segment(NewSegment::new("two", 1000, 2000));
        m.add_segment(NewSegment::new("three", 2000, 3000));
        m.add_sub_segment(&"3".into(), NewSegment::new("three a", 2000, 2500)).unwrap();
        m.add_sub_segment(&"3".into(), NewSegment::new("three b", 2500, 3000)).unwrap();
        m
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let mut m = SegmentManager::new();
        let a = m.add_segment(NewSegment::new("a", 0, 10));
        let b = m.add_segment(NewSegment::new("b", 10, 20));
        let c = m.add_segment(NewSegment::new("c", 20, 30).with_id("custom"));
        assert_eq!((a.id.as_str(), b.id.as_str(), c.id.as_str()), ("1", "2", "custom"));
    }

    #[test]
    fn auto_ids_skip_taken_values() {
        let mut m = SegmentManager::new();
        m.add_segment(NewSegment::new("x", 0, 10).with_id("1"));
        let next = m.add_segment(NewSegment::new("y", 10, 20));
        assert_eq!(next.id.as_str(), "2");
    }

    #[test]
    fn sub_segments_insert_after_last_descendant() {
        let mut m = SegmentManager::new();
        m.add_segment(NewSegment::new("one", 0, 1000));
        m.add_segment(NewSegment::new("two", 1000, 2000));
        m.add_sub_segment(&"1".into(), NewSegment::new("1a", 0, 500)).unwrap();
        m.add_sub_segment(&"1".into(), NewSegment::new("1b", 500, 1000)).unwrap();
        m.add_sub_segment(&"1-1".into(), NewSegment::new("1a-i", 0, 250)).unwrap();
        assert_eq!(ids(&m), ["1", "1-1", "1-1-1", "1-2", "2"]);
    }

    #[test]
    fn sub_segment_rejects_unknown_parent_and_depth() {
        let mut m = tree();
        let before = m.segments().to_vec();
        assert_eq!(
            m.add_sub_segment(&"9".into(), NewSegment::new("x", 0, 1)),
            Err(EditError::ParentNotFound("9".into()))
        );
        m.add_sub_segment(&"3-1".into(), NewSegment::new("deep", 2000, 2100)).unwrap();
        assert!(matches!(
            m.add_sub_segment(&"3-1-1".into(), NewSegment::new("too deep", 2000, 2050)),
            Err(EditError::TooDeep(_))
        ));
        assert_eq!(m.len(), before.len() + 1);
    }

    #[test]
    fn delete_top_level_cascades() {
        let mut m = tree();
        m.delete_segment(&"3".into()).unwrap();
        assert_eq!(ids(&m), ["1", "2"]);
    }

    #[test]
    fn delete_sub_segment_removes_only_that_node() {
        let mut m = tree();
        m.delete_segment(&"3-1".into()).unwrap();
        assert_eq!(ids(&m), ["1", "2", "3", "3-2"]);
        assert_eq!(m.delete_segment(&"nope".into()), Err(EditError::NotFound("nope".into())));
    }

    #[test]
    fn update_merges_fields() {
        let mut m = tree();
        m.update_segment(&"2".into(), SegmentPatch::range(1100, 1900)).unwrap();
        let two = m.get(&"2".into()).unwrap();
        assert_eq!((two.name.as_str(), two.start_ms, two.end_ms), ("two", 1100, 1900));
        assert!(m.update_segment(&"7".into(), SegmentPatch::name("x")).is_err());
    }

    #[test]
    fn reorder_renumbers_and_keeps_keys() {
        let mut m = tree();
        let key_of_three = m.get(&"3".into()).unwrap().key;
        // move "3" to the front; its children stay behind under the old "2"
        m.reorder_segment(2, 0).unwrap();
        assert_eq!(ids(&m), ["1", "2", "3", "3-1", "3-2"]);
        let moved = m.get_by_key(key_of_three).unwrap();
        assert_eq!(moved.id.as_str(), "1");
        assert_eq!(moved.name, "three");
    }

    #[test]
    fn reorder_out_of_bounds_is_rejected_without_change() {
        let mut m = tree();
        let before = m.segments().to_vec();
        assert_eq!(m.reorder_segment(0, 5), Err(EditError::IndexOutOfBounds { index: 5, len: 5 }));
        assert_eq!(m.segments(), before.as_slice());
    }

    #[test]
    fn renumber_collapses_deep_ids_and_promotes_leading_child() {
        let mut m = SegmentManager::new();
        for id in ["4-2", "9", "9-3-1", "9-7", "12"] {
            m.add_segment(NewSegment::new(id, 0, 10).with_id(id));
        }
        m.renumber_all();
        assert_eq!(ids(&m), ["1", "2", "2-1", "2-2", "3"]);
        assert_eq!(m.segments()[2].name, "9-3-1");
    }

    #[test]
    fn replace_splices_in_place() {
        let mut m = tree();
        let inserted = m
            .replace_segment(&"2".into(), vec![NewSegment::new("2a", 1000, 1500), NewSegment::new("2b", 1500, 2000)])
            .unwrap();
        assert_eq!(inserted.len(), 2);
        assert_eq!(ids(&m), ["1", "4", "5", "3", "3-1", "3-2"]);
        assert!(m.replace_segment(&"zz".into(), vec![]).is_err());
    }

    #[test]
    fn auto_split_covers_duration_exactly() {
        let mut m = SegmentManager::new();
        m.add_segment(NewSegment::new("old", 0, 1));
        m.auto_split(10_000, 3).unwrap();
        let segs = m.segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].start_ms, 0);
        assert_eq!(segs[2].end_ms, 10_000);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end_ms, pair[1].start_ms);
        }
        assert_eq!(segs[1].start_ms, 3333);
        assert_eq!(ids(&m), ["1", "2", "3"]);
        assert_eq!(m.auto_split(10_000, 0), Err(EditError::InvalidSplitCount(0)));
    }

    #[test]
    fn auto_split_scenario_thirty_seconds() {
        let mut m = SegmentManager::new();
        m.auto_split(30_000, 3).unwrap();
        let got: Vec<_> = m.segments().iter().map(|s| (s.id.as_str(), s.start_ms, s.end_ms)).collect();
        assert_eq!(got, [("1", 0, 10_000), ("2", 10_000, 20_000), ("3", 20_000, 30_000)]);
    }

    #[test]
    fn clear_resets_counter() {
        let mut m = tree();
        m.clear_all();
        assert!(m.is_empty());
        assert_eq!(m.add_segment(NewSegment::new("x", 0, 1)).id.as_str(), "1");
    }

    #[test]
    fn validate_collects_every_problem() {
        let mut m = SegmentManager::new();
        m.add_segment(NewSegment::new("ok", 0, 100));
        m.add_segment(NewSegment::new("", 50, 40));
        m.add_segment(NewSegment::new("late", 0, 5000));
        let report = m.validate_all(1000);
        assert!(!report.valid);
        assert_eq!(report.errors, [
            "Segment 2: missing id or name",
            "Segment 2: start time must be before end time",
            "Segment 3: end time exceeds audio length",
        ]);
        assert!(tree().validate_all(3000).valid);
    }

    #[test]
    fn default_segment_follows_last_one() {
        let mut m = SegmentManager::new();
        let first = m.append_default_segment(25_000);
        let second = m.append_default_segment(25_000);
        let third = m.append_default_segment(25_000);
        assert_eq!((first.start_ms, first.end_ms), (0, 10_000));
        assert_eq!((second.start_ms, second.end_ms), (10_000, 20_000));
        assert_eq!((third.start_ms, third.end_ms), (20_000, 25_000));
        assert_eq!(third.name, "Segment 3");
    }

    #[test]
    fn split_at_cursor_needs_margin() {
        let mut m = SegmentManager::new();
        assert!(m.split_at_cursor(10_000, 50).is_err());
        assert!(m.split_at_cursor(10_000, 9_950).is_err());
        m.split_at_cursor(10_000, 4_000).unwrap();
        let got: Vec<_> = m.segments().iter().map(|s| (s.name.as_str(), s.start_ms, s.end_ms)).collect();
        assert_eq!(got, [("Part 1", 0, 4_000), ("Part 2", 4_000, 10_000)]);
    }

    #[test]
    fn sibling_split_of_sub_segment_stays_nested() {
        let mut m = tree();
        let key = m.get(&"3-1".into()).unwrap().key;
        let (a, b) = m.split_segment_at(&"3-1".into(), 2200).unwrap();
        assert_eq!(ids(&m), ["1", "2", "3", "3-1", "3-2", "3-3"]);
        assert_eq!(a.key, key);
        assert_eq!((a.start_ms, a.end_ms, b.start_ms, b.end_ms), (2000, 2200, 2200, 2500));
        assert_eq!(b.name, "three a (2)");
        assert!(m.split_segment_at(&"1".into(), 0).is_err());
    }

    #[test]
    fn sibling_split_of_parent_keeps_children_with_first_half() {
        let mut m = tree();
        let (a, b) = m.split_segment_at(&"3".into(), 2500).unwrap();
        assert_eq!(ids(&m), ["1", "2", "3", "3-1", "3-2", "4"]);
        assert_eq!(m.get(&"3-1".into()).map(|s| s.name.as_str()), Some("three a"));
        assert_eq!((a.id.as_str(), a.start_ms, a.end_ms), ("3", 2000, 2500));
        assert_eq!((b.id.as_str(), b.name.as_str(), b.start_ms, b.end_ms), ("4", "three (2)", 2500, 3000));
    }

    #[test]
    fn children_and_parent_queries() {
        let m = tree();
        let kids: Vec<_> = m.children(&"3".into()).iter().map(|s| s.name.clone()).collect();
        assert_eq!(kids, ["three a", "three b"]);
        assert_eq!(m.parent_of(&"3-2".into()).map(|s| s.name.as_str()), Some("three"));
        assert!(m.is_sub_segment(&"3-2".into()));
        assert!(!m.is_sub_segment(&"3".into()));
    }

    #[test]
    fn listener_fires_once_per_successful_mutation() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let mut m = SegmentManager::new();
        m.set_on_change(move |segs| sink.lock().unwrap().push(segs.len()));

        m.add_segment(NewSegment::new("a", 0, 10));
        m.auto_split(100, 4).unwrap();
        let _ = m.delete_segment(&"missing".into());
        m.delete_segment(&"1".into()).unwrap();

        assert_eq!(*calls.lock().unwrap(), [1, 4, 3]);
    }
}
