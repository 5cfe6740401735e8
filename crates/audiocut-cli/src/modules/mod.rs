// crates/audiocut-cli/src/modules/mod.rs
//
// Command registry. To add a new subcommand:
//   1. Create modules/mycommand.rs with a `pub fn run(ctx: &mut AppContext, ...)`
//   2. Add `pub mod mycommand;` below
//   3. Add a variant to Commands in cli.rs and one match arm in main.rs
//
// Modules drive the segment list through AppContext.manager and the audio
// through AppContext.engine. They never decode or encode on their own.

pub mod info;
pub mod merge;
pub mod plan;
pub mod split;
pub mod waveform;
