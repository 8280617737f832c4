//! Async HTTP clients for documents fetched from upstream distributions.
//!
//! Functions return `Ok(Some(body))` on success, `Ok(None)` when the server
//! answers with a non-success status, and `Err` on network failures.

pub mod gentoo;
