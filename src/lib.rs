//! `market-dash` library crate.
//!
//! The binary (`mdash`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the CLI and the TUI share one load/metrics pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod metrics;
pub mod report;
pub mod tui;
