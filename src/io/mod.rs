//! Input/output helpers.
//!
//! - table exports (CSV) (`export`)
//! - compact document read/write (JSON) (`compact`)

pub mod compact;
pub mod export;

pub use compact::*;
pub use export::*;
