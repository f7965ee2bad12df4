//! CSV ledger reading

use std::collections::HashMap;

use crate::config::*;
use crate::ingest::fields::*;
use crate::types::*;

/// Check a file's name and size before any parsing
pub fn validate_csv_file(name: &str, size: u64, config: &ReconciliationConfig) -> ReconResult<()> {
    if name.trim().is_empty() {
        return Err(ReconError::Validation("No file selected".to_string()));
    }

    let lower = name.to_lowercase();
    let has_allowed_extension = config
        .allowed_extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .any(|ext| lower.ends_with(&format!(".{}", ext)));

    if !has_allowed_extension {
        return Err(ReconError::Validation("File must be a CSV file".to_string()));
    }

    if size == 0 {
        return Err(ReconError::Validation("File is empty".to_string()));
    }

    if size > config.max_file_size {
        return Err(ReconError::Validation(format!(
            "File size must be less than {}",
            describe_size(config.max_file_size)
        )));
    }

    Ok(())
}

fn describe_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Parse CSV text with a header row into an `UploadedFile`.
///
/// Rows without an invoice ID are dropped and not counted. Any malformed
/// input fails the whole file.
pub fn parse_csv(name: &str, bytes: &[u8]) -> ReconResult<UploadedFile> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Parse(format!("CSV parsing error: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let map = ColumnMap::resolve(columns.iter().map(String::as_str));
    let missing = map.missing_required();
    if !missing.is_empty() {
        log::warn!(
            "{}: no column found for {:?}; those fields default to empty",
            name,
            missing
        );
    }

    let mut data = Vec::new();
    let mut dropped = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            ReconError::Parse(format!("CSV parsing error at row {}: {}", row_idx + 1, e))
        })?;

        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");

        let invoice_id = cell(map.invoice_id).trim();
        if invoice_id.is_empty() {
            dropped += 1;
            continue;
        }

        let extra: HashMap<String, String> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| !map.is_mapped(*i))
            .filter_map(|(i, header)| record.get(i).map(|v| (header.clone(), v.to_string())))
            .collect();

        data.push(Transaction {
            invoice_id: invoice_id.to_string(),
            amount: parse_amount(cell(map.amount)),
            date: cell(map.date).trim().to_string(),
            description: cell(map.description).to_string(),
            vendor: cell(map.vendor).to_string(),
            extra,
        });
    }

    if dropped > 0 {
        log::debug!("{}: dropped {} rows without an invoice ID", name, dropped);
    }

    Ok(UploadedFile {
        name: name.to_string(),
        row_count: data.len(),
        columns,
        data,
    })
}

/// Validate then parse a raw file
pub fn load_csv_file(
    name: &str,
    bytes: &[u8],
    config: &ReconciliationConfig,
) -> ReconResult<UploadedFile> {
    validate_csv_file(name, bytes.len() as u64, config)?;
    parse_csv(name, bytes)
}
