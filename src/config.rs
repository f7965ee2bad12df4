//! Reconciliation settings

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::*;

/// Largest input file accepted by ingestion (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// How to treat an invoice ID that appears twice in one ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the last-seen record and log the overwrite
    #[default]
    LastWins,
    /// Fail the checked reconciliation entry point
    Reject,
}

/// Settings for a reconciliation run and its ingestion boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Maximum absolute difference still classified as matched (inclusive)
    #[serde(default = "default_tolerance")]
    pub amount_tolerance: BigDecimal,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    /// Upper bound on input file size, in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Accepted file extensions, without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

/// The default tolerance of one cent
pub fn default_tolerance() -> BigDecimal {
    BigDecimal::new(1.into(), 2)
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["csv".to_string()]
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: default_tolerance(),
            duplicate_policy: DuplicatePolicy::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl ReconciliationConfig {
    /// Same defaults with a different tolerance
    pub fn with_tolerance(tolerance: BigDecimal) -> Self {
        Self {
            amount_tolerance: tolerance,
            ..Self::default()
        }
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Parse settings from JSON; omitted fields take their defaults
    pub fn from_json_str(json: &str) -> ReconResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ReconError::Configuration(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a tolerance given as text, e.g. from a command line
    pub fn parse_tolerance(value: &str) -> ReconResult<BigDecimal> {
        BigDecimal::from_str(value.trim()).map_err(|_| {
            ReconError::Configuration(format!("Tolerance '{}' is not a number", value))
        })
    }

    pub fn validate(&self) -> ReconResult<()> {
        if self.amount_tolerance < BigDecimal::from(0) {
            return Err(ReconError::Configuration(format!(
                "Amount tolerance cannot be negative: {}",
                self.amount_tolerance
            )));
        }

        if self.max_file_size == 0 {
            return Err(ReconError::Configuration(
                "Maximum file size must be greater than zero".to_string(),
            ));
        }

        if self.allowed_extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(ReconError::Configuration(
                "At least one file extension must be allowed".to_string(),
            ));
        }

        Ok(())
    }
}
