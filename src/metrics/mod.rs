//! Derived metrics over the normalized model.
//!
//! Everything here is a pure function of its inputs. Recomputing on every
//! render/report is cheap (segments × years is tiny), so nothing is cached.

pub mod aggregate;
pub mod growth;
pub mod pivot;

pub use aggregate::*;
pub use growth::*;
pub use pivot::*;
