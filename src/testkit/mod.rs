//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] — Mock [`QuoteSource`](crate::source::QuoteSource)
//!   implementations: `ScriptedSource`, `FailingSource`, `StallingSource`.
//! - [`domain`] — Builders for domain primitives: sizing, opportunities.

pub mod domain;
pub mod source;
