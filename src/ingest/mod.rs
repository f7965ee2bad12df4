//! Ingestion of raw ledger files into typed transactions

pub mod fields;
pub mod reader;

pub use fields::*;
pub use reader::*;
