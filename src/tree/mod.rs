//! Aggregation trees and the per-date store.
//!
//! - one tree node type shared by every level (`node`)
//! - per-date snapshots + date-ordered series (`series`)

pub mod node;
pub mod series;

pub use node::*;
pub use series::*;
