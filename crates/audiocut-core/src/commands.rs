// crates/audiocut-core/src/commands.rs
//
// Every segment edit a host can request, as plain data.
// Front-ends (CLI, a GUI, a script runner) build these and hand them to
// `SegmentManager::apply`; adding an edit means one variant here plus one
// match arm below.

use crate::error::EditError;
use crate::manager::SegmentManager;
use crate::segment::{NewSegment, SegmentId, SegmentPatch};

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentCommand {
    // ── Structure ────────────────────────────────────────────────────────────
    Add(NewSegment),
    AddSub { parent: SegmentId, data: NewSegment },
    Delete(SegmentId),
    /// Replace one segment with any number of new ones, in place.
    Replace { id: SegmentId, with: Vec<NewSegment> },
    Clear,

    // ── Editing ──────────────────────────────────────────────────────────────
    Update { id: SegmentId, patch: SegmentPatch },
    Reorder { from: usize, to: usize },
    Renumber,

    // ── Splitting ────────────────────────────────────────────────────────────
    /// Replace the list with `parts` equal segments over `[0, total_ms]`.
    AutoSplit { total_ms: i64, parts: usize },
    /// Split one segment into two siblings at `at_ms`.
    SplitAt { id: SegmentId, at_ms: i64 },
}

impl SegmentManager {
    /// Run one command. Errors leave the list untouched.
    pub fn apply(&mut self, cmd: SegmentCommand) -> Result<(), EditError> {
        match cmd {
            SegmentCommand::Add(data)                 => { self.add_segment(data); }
            SegmentCommand::AddSub { parent, data }   => { self.add_sub_segment(&parent, data)?; }
            SegmentCommand::Delete(id)                => self.delete_segment(&id)?,
            SegmentCommand::Replace { id, with }      => { self.replace_segment(&id, with)?; }
            SegmentCommand::Clear                     => self.clear_all(),
            SegmentCommand::Update { id, patch }      => self.update_segment(&id, patch)?,
            SegmentCommand::Reorder { from, to }      => self.reorder_segment(from, to)?,
            SegmentCommand::Renumber                  => self.renumber_all(),
            SegmentCommand::AutoSplit { total_ms, parts } => self.auto_split(total_ms, parts)?,
            SegmentCommand::SplitAt { id, at_ms }     => { self.split_segment_at(&id, at_ms)?; }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_drive_the_manager() {
        let mut m = SegmentManager::new();
        let script = vec![
            SegmentCommand::AutoSplit { total_ms: 9_000, parts: 3 },
            SegmentCommand::AddSub { parent: "2".into(), data: NewSegment::new("inner", 3_000, 4_000) },
            SegmentCommand::Update { id: "1".into(), patch: SegmentPatch::name("Opening") },
            SegmentCommand::Delete("3".into()),
        ];
        for cmd in script {
            m.apply(cmd).unwrap();
        }
        let got: Vec<_> = m.segments().iter().map(|s| (s.id.as_str(), s.name.as_str())).collect();
        assert_eq!(got, [("1", "Opening"), ("2", "Segment 2"), ("2-1", "inner")]);
    }

    #[test]
    fn failed_command_reports_error() {
        let mut m = SegmentManager::new();
        assert_eq!(
            m.apply(SegmentCommand::Reorder { from: 0, to: 1 }),
            Err(EditError::IndexOutOfBounds { index: 0, len: 0 })
        );
        assert!(m.is_empty());
    }
}
