//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the per-row counter bundle (`StatRecord`) and its field selector (`StatField`)
//! - the resolved run configuration (`ReportConfig`)

pub mod types;

pub use types::*;
