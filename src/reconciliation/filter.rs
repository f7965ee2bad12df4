//! Narrowing a result list for review

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Search and status filter over reconciliation results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFilter {
    /// Case-insensitive substring of the invoice ID
    pub search: Option<String>,
    /// Only keep this status; `None` keeps all
    pub status: Option<ReconciliationStatus>,
}

impl ResultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    pub fn status(mut self, status: ReconciliationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, result: &ReconciliationResult) -> bool {
        let matches_search = self.search.as_ref().is_none_or(|term| {
            result
                .invoice_id
                .to_lowercase()
                .contains(&term.to_lowercase())
        });
        let matches_status = self.status.is_none_or(|status| result.status == status);

        matches_search && matches_status
    }

    /// Matching results, in their original order
    pub fn apply<'a>(&self, results: &'a [ReconciliationResult]) -> Vec<&'a ReconciliationResult> {
        results.iter().filter(|r| self.matches(r)).collect()
    }
}
