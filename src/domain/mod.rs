//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the compact wire format (`CompactMarketData`) and the normalized model
//!   (`MarketData`, `SegmentData`, `YearlyData`)
//! - breakdown dimensions (`Axis`, `CrossTab`, `Orientation`)
//! - presentation settings (`UnitScale`, `ReportConfig`)

pub mod types;

pub use types::*;
