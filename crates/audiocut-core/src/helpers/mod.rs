// crates/audiocut-core/src/helpers/mod.rs
//
// Pure helper functions with no dependency on segment state.

pub mod time;
