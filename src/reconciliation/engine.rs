//! Invoice matching between a vendor statement and internal records

use bigdecimal::BigDecimal;
use std::collections::{HashMap, HashSet};

use crate::config::*;
use crate::traits::*;
use crate::types::*;
use crate::utils::find_duplicate_invoice_ids;

/// Reconcile two ledgers by invoice ID.
///
/// Produces exactly one result per distinct invoice ID across both inputs.
/// Results are ordered amount mismatches first, then missing, then matched;
/// within a status they keep first-seen order (vendor ledger first, then
/// internal). A repeated ID within one ledger keeps its last record.
pub fn reconcile(
    vendor: &[Transaction],
    internal: &[Transaction],
    tolerance: &BigDecimal,
) -> Vec<ReconciliationResult> {
    let vendor_index = index_ledger(LedgerSide::Vendor, vendor);
    let internal_index = index_ledger(LedgerSide::Internal, internal);

    let mut seen = HashSet::new();
    let keys: Vec<&str> = vendor
        .iter()
        .chain(internal.iter())
        .map(|t| t.invoice_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect();

    let mut results: Vec<ReconciliationResult> = keys
        .into_iter()
        .filter_map(|id| {
            let invoice_id = id.to_string();
            match (vendor_index.get(id), internal_index.get(id)) {
                (Some(v), Some(i)) => Some(ReconciliationResult::matched_pair(
                    invoice_id,
                    (*v).clone(),
                    (*i).clone(),
                    tolerance,
                )),
                (Some(v), None) => Some(ReconciliationResult::vendor_only(invoice_id, (*v).clone())),
                (None, Some(i)) => {
                    Some(ReconciliationResult::internal_only(invoice_id, (*i).clone()))
                }
                (None, None) => None,
            }
        })
        .collect();

    // Stable: ties keep key order
    results.sort_by_key(|r| r.status.priority());

    log::debug!(
        "reconciled {} vendor and {} internal records into {} results",
        vendor.len(),
        internal.len(),
        results.len()
    );

    results
}

/// Reconcile with the default one-cent tolerance
pub fn reconcile_default(
    vendor: &[Transaction],
    internal: &[Transaction],
) -> Vec<ReconciliationResult> {
    reconcile(vendor, internal, &default_tolerance())
}

fn index_ledger(side: LedgerSide, transactions: &[Transaction]) -> HashMap<&str, &Transaction> {
    let mut index = HashMap::with_capacity(transactions.len());
    for transaction in transactions {
        if index
            .insert(transaction.invoice_id.as_str(), transaction)
            .is_some()
        {
            log::warn!(
                "duplicate invoice ID '{}' in {} ledger; keeping the later record",
                transaction.invoice_id,
                side
            );
        }
    }
    index
}

/// Configured reconciliation entry point
pub struct ReconciliationEngine {
    config: ReconciliationConfig,
    validator: Box<dyn LedgerValidator>,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    /// Create an engine with default settings
    pub fn new() -> Self {
        Self::with_config(ReconciliationConfig::default())
    }

    pub fn with_config(config: ReconciliationConfig) -> Self {
        Self {
            config,
            validator: Box::new(DefaultLedgerValidator),
        }
    }

    /// Create an engine with a custom ledger validator
    pub fn with_validator(config: ReconciliationConfig, validator: Box<dyn LedgerValidator>) -> Self {
        Self { config, validator }
    }

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Reconcile using the configured tolerance. Never fails.
    pub fn reconcile(
        &self,
        vendor: &[Transaction],
        internal: &[Transaction],
    ) -> Vec<ReconciliationResult> {
        reconcile(vendor, internal, &self.config.amount_tolerance)
    }

    /// Validate both ledgers and apply the duplicate policy before reconciling
    pub fn reconcile_checked(
        &self,
        vendor: &[Transaction],
        internal: &[Transaction],
    ) -> ReconResult<Vec<ReconciliationResult>> {
        self.config.validate()?;

        for (side, ledger) in [(LedgerSide::Vendor, vendor), (LedgerSide::Internal, internal)] {
            self.validator.validate_ledger(side, ledger)?;

            if self.config.duplicate_policy == DuplicatePolicy::Reject {
                if let Some(invoice_id) = find_duplicate_invoice_ids(ledger).into_iter().next() {
                    return Err(ReconError::DuplicateInvoice { side, invoice_id });
                }
            }
        }

        Ok(self.reconcile(vendor, internal))
    }
}
