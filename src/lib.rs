//! Arbwatch - cross-venue arbitrage detection and recording.
//!
//! This crate continuously samples bid/ask quotes for a fixed set of
//! instruments across independent venues, detects price discrepancies that
//! remain profitable after round-trip taker fees, deduplicates repeat
//! alerts, and hands qualifying opportunities to an execution path with an
//! atomically persisted trade log.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with first-run default synthesis
//! - [`domain`] - Venue-agnostic types: quotes, opportunities, trades,
//!   bounded price history
//! - [`detector`] - The N×(N-1) ordered-pair opportunity scan
//! - [`source`] - `QuoteSource` trait, venue registry, simulated adapter
//! - [`service`] - Alert deduplication, notifiers, execution recording
//! - [`app`] - Component wiring and the monitoring loop
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use arbwatch::app::App;
//! use arbwatch::config::Config;
//!
//! # async fn run() -> arbwatch::error::Result<()> {
//! let config = Config::load_or_init("arbwatch.toml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! App::new(config)?.run(shutdown_rx).await
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod detector;
pub mod domain;
pub mod error;
pub mod service;
pub mod source;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
