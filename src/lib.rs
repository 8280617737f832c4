//! Version ordering and license-freedom voting for packages aggregated from
//! many distribution repositories.
//!
//! - [`version`]: tokenizer and total order over arbitrary version strings.
//! - [`license`]: per-repository license evaluators, including the Gentoo grammar.
//! - [`reference`]: the ordered table of trusted reference repositories.
//! - [`vote`]: per-package verdicts and per-project quorum voting.
//! - [`loader`], [`config`], [`registry`], [`report`]: the I/O around the engines.

pub mod config;
pub mod error;
pub mod license;
pub mod loader;
pub mod models;
pub mod reference;
pub mod registry;
pub mod report;
pub mod version;
pub mod vote;
