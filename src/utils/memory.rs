//! In-memory collaborators for testing

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::config::*;
use crate::ingest::load_csv_file;
use crate::traits::*;
use crate::types::*;

/// In-memory ledger source holding raw CSV files by name
#[derive(Debug, Clone)]
pub struct MemorySource {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
    config: ReconciliationConfig,
}

impl MemorySource {
    /// Create an empty source with default ingestion limits
    pub fn new() -> Self {
        Self::with_config(ReconciliationConfig::default())
    }

    pub fn with_config(config: ReconciliationConfig) -> Self {
        Self {
            files: Arc::new(RwLock::new(BTreeMap::new())),
            config,
        }
    }

    /// Register a raw file under `name`, replacing any previous one
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files
            .write()
            .unwrap()
            .insert(name.into(), bytes.into());
    }

    /// Clear all files (useful for testing)
    pub fn clear(&self) {
        self.files.write().unwrap().clear();
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionSource for MemorySource {
    async fn load(&self, name: &str) -> ReconResult<UploadedFile> {
        let bytes = self
            .files
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ReconError::Source(format!("File not found: {}", name)))?;

        load_csv_file(name, &bytes, &self.config)
    }

    async fn available(&self) -> ReconResult<Vec<String>> {
        Ok(self.files.read().unwrap().keys().cloned().collect())
    }
}

/// In-memory sink recording every delivered artifact
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    delivered: Arc<RwLock<Vec<ExportArtifact>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts delivered so far, oldest first
    pub fn delivered(&self) -> Vec<ExportArtifact> {
        self.delivered.read().unwrap().clone()
    }

    /// The most recently delivered artifact with this file name
    pub fn get(&self, file_name: &str) -> Option<ExportArtifact> {
        self.delivered
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|a| a.file_name == file_name)
            .cloned()
    }
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn deliver(&mut self, artifact: &ExportArtifact) -> ReconResult<()> {
        if artifact.file_name.trim().is_empty() {
            return Err(ReconError::Sink(
                "Artifact file name cannot be empty".to_string(),
            ));
        }

        self.delivered.write().unwrap().push(artifact.clone());
        Ok(())
    }
}
