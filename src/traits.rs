//! Traits for the collaborators around the engine

use async_trait::async_trait;

use crate::types::*;

/// Supplier of parsed ledgers
///
/// Reading raw input may be asynchronous; the engine only ever sees the
/// fully-materialized `UploadedFile` this returns. Loading either succeeds
/// completely or fails without yielding partial data.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Load and parse the ledger registered under `name`
    async fn load(&self, name: &str) -> ReconResult<UploadedFile>;

    /// Names this source can load
    async fn available(&self) -> ReconResult<Vec<String>>;
}

/// Receiver of exported reports (download, persistence, display)
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Hand over an export artifact verbatim
    async fn deliver(&mut self, artifact: &ExportArtifact) -> ReconResult<()>;
}

/// Trait for implementing custom ledger validation rules
pub trait LedgerValidator: Send + Sync {
    /// Validate one side's transactions before reconciliation
    fn validate_ledger(&self, side: LedgerSide, transactions: &[Transaction]) -> ReconResult<()>;
}

/// Default validator: every record must carry an invoice ID
pub struct DefaultLedgerValidator;

impl LedgerValidator for DefaultLedgerValidator {
    fn validate_ledger(&self, side: LedgerSide, transactions: &[Transaction]) -> ReconResult<()> {
        if let Some(position) = transactions
            .iter()
            .position(|t| t.invoice_id.trim().is_empty())
        {
            return Err(ReconError::Validation(format!(
                "{} ledger record {} has an empty invoice ID",
                side,
                position + 1
            )));
        }

        Ok(())
    }
}
