//! # Invoice Recon
//!
//! Reconciles a vendor statement against internal records by invoice ID,
//! classifying every invoice as matched, amount mismatch, or missing, and
//! deriving summary statistics and a CSV export from the results.
//!
//! ## Features
//!
//! - **Reconciliation engine**: deterministic matching with an inclusive amount tolerance
//! - **Reporting**: status counts, match and discrepancy rates, CSV export
//! - **Ingestion**: CSV ledgers with tolerant header and amount parsing
//! - **Collaborator traits**: async sources and sinks around a synchronous core
//!
//! ## Quick Start
//!
//! ```rust
//! use invoice_recon::{reconcile_default, summarize, export_to_csv, Transaction};
//! use bigdecimal::BigDecimal;
//!
//! let vendor = vec![Transaction::new("A1", BigDecimal::from(100), "2024-01-01")];
//! let internal = vec![Transaction::new("A1", BigDecimal::from(105), "2024-01-01")];
//!
//! let results = reconcile_default(&vendor, &internal);
//! let summary = summarize(&results);
//! assert_eq!(summary.amount_mismatch, 1);
//!
//! let csv = export_to_csv(&results);
//! assert!(csv.contains("\"AMOUNT-MISMATCH\""));
//! ```

pub mod config;
pub mod ingest;
pub mod reconciliation;
pub mod reporting;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ingest::{load_csv_file, parse_amount, parse_csv, validate_csv_file};
pub use reconciliation::*;
pub use reporting::*;
pub use traits::*;
pub use types::*;
