//! Summaries and exports derived from reconciliation results

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
