//! Result types of the edrex commands and their renderings
//!
//! Every command result serializes to JSON (the default); `text` gives a
//! human-readable view of the same struct.

pub mod json;
pub mod text;
pub mod types;

pub use types::*;
