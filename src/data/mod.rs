//! Market data: dashboard catalog, document loading, and expansion.

pub mod catalog;
pub mod expand;
pub mod source;

pub use catalog::{Dashboard, accessible_dashboards, open_dashboard};
pub use expand::*;
pub use source::{DataSource, MarketDataClient};
