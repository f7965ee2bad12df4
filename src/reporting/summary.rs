//! Aggregate counts and rates over reconciliation results

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::*;

/// Count results per status in a single pass
pub fn summarize(results: &[ReconciliationResult]) -> ReconciliationSummary {
    let mut summary = ReconciliationSummary {
        total_records: results.len(),
        ..ReconciliationSummary::default()
    };

    for result in results {
        match result.status {
            ReconciliationStatus::Matched => summary.matched += 1,
            ReconciliationStatus::Missing => summary.missing += 1,
            ReconciliationStatus::AmountMismatch => summary.amount_mismatch += 1,
        }
    }

    summary
}

impl ReconciliationSummary {
    /// Count for a single status
    pub fn count(&self, status: ReconciliationStatus) -> usize {
        match status {
            ReconciliationStatus::Matched => self.matched,
            ReconciliationStatus::Missing => self.missing,
            ReconciliationStatus::AmountMismatch => self.amount_mismatch,
        }
    }

    /// Percentage of results that matched; 0 for an empty run
    pub fn match_rate(&self) -> f64 {
        self.percentage(self.matched)
    }

    /// Percentage of results needing attention (mismatched or missing)
    pub fn discrepancy_rate(&self) -> f64 {
        self.percentage(self.amount_mismatch + self.missing)
    }

    /// True when every invoice matched
    pub fn is_fully_reconciled(&self) -> bool {
        self.matched == self.total_records
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total_records as f64
        }
    }
}

/// Follow-up work implied by a summary, most urgent first
pub fn action_items(summary: &ReconciliationSummary) -> Vec<String> {
    let mut items = Vec::new();

    if summary.amount_mismatch > 0 {
        items.push(format!(
            "Review {} transactions with amount mismatches",
            summary.amount_mismatch
        ));
    }

    if summary.missing > 0 {
        items.push(format!(
            "Investigate {} missing transactions",
            summary.missing
        ));
    }

    items
}

/// A reconciliation run packaged for display collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub run_id: Uuid,
    pub generated_at: NaiveDateTime,
    pub summary: ReconciliationSummary,
    pub results: Vec<ReconciliationResult>,
}

impl ReconciliationReport {
    pub fn new(results: Vec<ReconciliationResult>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: chrono::Utc::now().naive_utc(),
            summary: summarize(&results),
            results,
        }
    }

    pub fn action_items(&self) -> Vec<String> {
        action_items(&self.summary)
    }
}
