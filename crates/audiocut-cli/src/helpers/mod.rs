// crates/audiocut-cli/src/helpers/mod.rs
pub mod format;
