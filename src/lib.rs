//! `epi-pivot` library crate.
//!
//! The binary (`epi`) is a thin wrapper around this library so that:
//!
//! - the tree/query/report core is testable without spawning processes
//! - ingestion and rendering stay separate from the aggregation model

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod query;
pub mod report;
pub mod tree;
