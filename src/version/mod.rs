//! Distro-agnostic version ordering.
//!
//! - [`tokenizer`]: splits a version string into ranked components.
//! - [`compare`]: total order over component sequences and the [`compare::Version`] newtype.
//! - [`constraint`]: `<=1.2`-style bounds used to filter packages by version.

pub mod compare;
pub mod constraint;
pub mod tokenizer;
