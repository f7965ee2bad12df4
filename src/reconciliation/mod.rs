//! Reconciliation of vendor statements against internal records

pub mod engine;
pub mod filter;

pub use engine::*;
pub use filter::*;
