//! Validation utilities

use std::collections::HashSet;

use crate::traits::*;
use crate::types::*;

/// Return invoice IDs that occur more than once, in order of first repetition
pub fn find_duplicate_invoice_ids(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for transaction in transactions {
        let id = transaction.invoice_id.as_str();
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.to_string());
        }
    }

    duplicates
}

/// Validate that an invoice ID is usable as a join key
pub fn validate_invoice_id(invoice_id: &str) -> ReconResult<()> {
    if invoice_id.trim().is_empty() {
        return Err(ReconError::Validation(
            "Invoice ID cannot be empty".to_string(),
        ));
    }

    if invoice_id.trim() != invoice_id {
        return Err(ReconError::Validation(format!(
            "Invoice ID '{}' has surrounding whitespace",
            invoice_id
        )));
    }

    Ok(())
}

/// Strict validator: well-formed IDs and no duplicate IDs within a ledger
pub struct StrictLedgerValidator;

impl LedgerValidator for StrictLedgerValidator {
    fn validate_ledger(&self, side: LedgerSide, transactions: &[Transaction]) -> ReconResult<()> {
        // Basic validation
        DefaultLedgerValidator.validate_ledger(side, transactions)?;

        for transaction in transactions {
            validate_invoice_id(&transaction.invoice_id)?;
        }

        if let Some(invoice_id) = find_duplicate_invoice_ids(transactions).into_iter().next() {
            return Err(ReconError::DuplicateInvoice { side, invoice_id });
        }

        Ok(())
    }
}
