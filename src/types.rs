//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default file name for exported reconciliation results
pub const DEFAULT_EXPORT_FILE_NAME: &str = "reconciliation-results.csv";

/// Content type attached to exported reconciliation results
pub const EXPORT_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// One ledger line item, as produced by ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Join key shared by both ledgers
    pub invoice_id: String,
    /// Signed amount; unparseable input has already been defaulted to zero
    pub amount: BigDecimal,
    /// Free-form date text, never interpreted
    pub date: String,
    /// Optional description, empty if absent
    pub description: String,
    /// Optional vendor name, empty if absent
    pub vendor: String,
    /// Columns the engine does not interpret, keyed by original header name
    pub extra: HashMap<String, String>,
}

impl Transaction {
    /// Create a new transaction with empty metadata
    pub fn new(invoice_id: impl Into<String>, amount: BigDecimal, date: impl Into<String>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            amount,
            date: date.into(),
            description: String::new(),
            vendor: String::new(),
            extra: HashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Attach an uninterpreted column value
    pub fn with_extra(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(column.into(), value.into());
        self
    }
}

/// Which of the two ledgers a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerSide {
    /// The vendor's statement
    Vendor,
    /// Our own records
    Internal,
}

impl fmt::Display for LedgerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerSide::Vendor => write!(f, "vendor"),
            LedgerSide::Internal => write!(f, "internal"),
        }
    }
}

/// Outcome of reconciling a single invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconciliationStatus {
    /// Both sides agree within tolerance
    Matched,
    /// Both sides report the invoice but the amounts disagree
    AmountMismatch,
    /// Only one side reports the invoice
    Missing,
}

impl ReconciliationStatus {
    pub const ALL: [ReconciliationStatus; 3] = [
        ReconciliationStatus::AmountMismatch,
        ReconciliationStatus::Missing,
        ReconciliationStatus::Matched,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationStatus::Matched => "matched",
            ReconciliationStatus::AmountMismatch => "amount-mismatch",
            ReconciliationStatus::Missing => "missing",
        }
    }

    /// Upper-case tag used in exports
    pub fn label(&self) -> &'static str {
        match self {
            ReconciliationStatus::Matched => "MATCHED",
            ReconciliationStatus::AmountMismatch => "AMOUNT-MISMATCH",
            ReconciliationStatus::Missing => "MISSING",
        }
    }

    /// Sort priority; lower values need attention first
    pub fn priority(&self) -> u8 {
        match self {
            ReconciliationStatus::AmountMismatch => 0,
            ReconciliationStatus::Missing => 1,
            ReconciliationStatus::Matched => 2,
        }
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One result per distinct invoice ID across both ledgers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub invoice_id: String,
    pub vendor_record: Option<Transaction>,
    pub internal_record: Option<Transaction>,
    pub status: ReconciliationStatus,
    /// Absolute amount difference; present only when both records exist
    pub amount_difference: Option<BigDecimal>,
}

impl ReconciliationResult {
    /// Pair two records sharing an invoice ID, classifying by `tolerance` (inclusive)
    pub fn matched_pair(
        invoice_id: String,
        vendor: Transaction,
        internal: Transaction,
        tolerance: &BigDecimal,
    ) -> Self {
        let difference = (&vendor.amount - &internal.amount).abs();
        let status = if &difference <= tolerance {
            ReconciliationStatus::Matched
        } else {
            ReconciliationStatus::AmountMismatch
        };

        Self {
            invoice_id,
            vendor_record: Some(vendor),
            internal_record: Some(internal),
            status,
            amount_difference: Some(difference),
        }
    }

    /// Invoice reported by the vendor only
    pub fn vendor_only(invoice_id: String, vendor: Transaction) -> Self {
        Self {
            invoice_id,
            vendor_record: Some(vendor),
            internal_record: None,
            status: ReconciliationStatus::Missing,
            amount_difference: None,
        }
    }

    /// Invoice present in internal records only
    pub fn internal_only(invoice_id: String, internal: Transaction) -> Self {
        Self {
            invoice_id,
            vendor_record: None,
            internal_record: Some(internal),
            status: ReconciliationStatus::Missing,
            amount_difference: None,
        }
    }

    /// The side lacking a record, if any
    pub fn missing_side(&self) -> Option<LedgerSide> {
        match (&self.vendor_record, &self.internal_record) {
            (Some(_), None) => Some(LedgerSide::Internal),
            (None, Some(_)) => Some(LedgerSide::Vendor),
            _ => None,
        }
    }

    /// Description to show for this invoice; the vendor's wins when both exist
    pub fn description(&self) -> Option<&str> {
        [&self.vendor_record, &self.internal_record]
            .into_iter()
            .flatten()
            .map(|t| t.description.as_str())
            .find(|d| !d.is_empty())
    }
}

/// Aggregate counts over a result list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub total_records: usize,
    pub matched: usize,
    pub missing: usize,
    pub amount_mismatch: usize,
}

/// A parsed input file handed over by ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Display name of the source file
    pub name: String,
    /// Rows kept after dropping those without an invoice ID
    pub row_count: usize,
    /// Original header names, in file order
    pub columns: Vec<String>,
    pub data: Vec<Transaction>,
}

/// Export text packaged for download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl ExportArtifact {
    pub fn new(file_name: impl Into<String>, content: String) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: EXPORT_CONTENT_TYPE.to_string(),
            content,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Errors that can occur around the reconciliation engine
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Duplicate invoice ID '{invoice_id}' in {side} ledger")]
    DuplicateInvoice { side: LedgerSide, invoice_id: String },
    #[error("Source error: {0}")]
    Source(String),
    #[error("Sink error: {0}")]
    Sink(String),
}

/// Result type for fallible operations around the engine
pub type ReconResult<T> = Result<T, ReconError>;
