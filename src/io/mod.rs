//! Input/output helpers.
//!
//! - CSV snapshot ingest with layout fallback (`ingest`)
//! - pivot exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
