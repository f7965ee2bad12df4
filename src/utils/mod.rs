//! Utility modules

pub mod memory;
pub mod validation;

pub use memory::*;
pub use validation::*;
