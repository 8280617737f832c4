//! Report renderers for freedom checks.
//!
//! - [`terminal`]: colored vote table and verdict line; respects `--quiet`.
//! - [`json`]: machine-readable document with every vote.

pub mod json;
pub mod terminal;
