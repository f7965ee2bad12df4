//! Delimited-text export of reconciliation results

use bigdecimal::{BigDecimal, RoundingMode};

use crate::types::*;

/// Column headers of the export, in order
pub const EXPORT_HEADERS: [&str; 8] = [
    "Invoice ID",
    "Status",
    "Vendor Amount",
    "Internal Amount",
    "Difference",
    "Vendor Date",
    "Internal Date",
    "Description",
];

/// Placeholder for absent values
pub const NOT_AVAILABLE: &str = "N/A";

/// Render results as CSV text.
///
/// The header row is written bare; every data cell is quoted, with embedded
/// quotes doubled. Rows are separated by `\n` and the text has no trailing
/// newline. Row order follows `results`.
pub fn export_to_csv(results: &[ReconciliationResult]) -> String {
    let mut text = EXPORT_HEADERS.join(",");

    if !results.is_empty() {
        // The writer targets a Vec<u8>, whose writes never fail
        let rows = write_rows(results).expect("in-memory CSV write failed");

        text.push('\n');
        text.push_str(rows.strip_suffix('\n').unwrap_or(&rows));
    }

    text
}

fn write_rows(results: &[ReconciliationResult]) -> csv::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for result in results {
        writer.write_record(export_row(result))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Package the export text as a downloadable artifact
pub fn export_artifact(results: &[ReconciliationResult], file_name: Option<&str>) -> ExportArtifact {
    ExportArtifact::new(
        file_name.unwrap_or(DEFAULT_EXPORT_FILE_NAME),
        export_to_csv(results),
    )
}

/// Cells of one export row
pub fn export_row(result: &ReconciliationResult) -> [String; 8] {
    let vendor = result.vendor_record.as_ref();
    let internal = result.internal_record.as_ref();

    [
        result.invoice_id.clone(),
        result.status.label().to_string(),
        format_optional_amount(vendor.map(|t| &t.amount)),
        format_optional_amount(internal.map(|t| &t.amount)),
        format_optional_amount(result.amount_difference.as_ref()),
        text_or_na(vendor.map(|t| t.date.as_str())),
        text_or_na(internal.map(|t| t.date.as_str())),
        text_or_na(result.description()),
    ]
}

/// Two decimal places, halves rounded away from zero
pub fn format_amount(amount: &BigDecimal) -> String {
    amount.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

fn format_optional_amount(amount: Option<&BigDecimal>) -> String {
    amount
        .map(format_amount)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::reconcile_default;
    use std::str::FromStr;

    fn txn(id: &str, amount: &str, date: &str) -> Transaction {
        Transaction::new(id, BigDecimal::from_str(amount).unwrap(), date)
    }

    #[test]
    fn test_header_only_for_empty_results() {
        assert_eq!(
            export_to_csv(&[]),
            "Invoice ID,Status,Vendor Amount,Internal Amount,Difference,Vendor Date,Internal Date,Description"
        );
    }

    #[test]
    fn test_rows_are_quoted_and_formatted() {
        let vendor = vec![txn("A1", "100", "2024-01-01").with_description("Office chairs")];
        let internal = vec![
            txn("A1", "105.5", "2024-01-02"),
            txn("B2", "7.005", "2024-01-03"),
        ];
        let text = export_to_csv(&reconcile_default(&vendor, &internal));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#""A1","AMOUNT-MISMATCH","100.00","105.50","5.50","2024-01-01","2024-01-02","Office chairs""#
        );
        assert_eq!(
            lines[2],
            r#""B2","MISSING","N/A","7.01","N/A","N/A","2024-01-03","N/A""#
        );
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let vendor = vec![txn("Q1", "1", "d").with_description(r#"12" monitor"#)];
        let text = export_to_csv(&reconcile_default(&vendor, &vendor));
        assert!(text.ends_with(r#""12"" monitor""#));

        let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[7], r#"12" monitor"#);
        assert_eq!(&record[1], "MATCHED");
    }

    #[test]
    fn test_embedded_newlines_stay_in_cell() {
        let vendor = vec![
            txn("N1", "1", "d").with_description("line one\nline two"),
            txn("N2", "2", "d"),
        ];
        let results = reconcile_default(&vendor, &vendor[..1]);
        let text = export_to_csv(&results);

        let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), results.len());
        let n1 = records.iter().find(|r| &r[0] == "N1").unwrap();
        assert_eq!(&n1[7], "line one\nline two");
        assert_eq!(n1.len(), EXPORT_HEADERS.len());
    }

    #[test]
    fn test_format_amount_rounding() {
        assert_eq!(format_amount(&BigDecimal::from_str("1234.5").unwrap()), "1234.50");
        assert_eq!(format_amount(&BigDecimal::from_str("0.125").unwrap()), "0.13");
        assert_eq!(format_amount(&BigDecimal::from_str("-2.345").unwrap()), "-2.35");
        assert_eq!(format_amount(&BigDecimal::from(0)), "0.00");
    }

    #[test]
    fn test_artifact_defaults() {
        let artifact = export_artifact(&[], None);
        assert_eq!(artifact.file_name, "reconciliation-results.csv");
        assert_eq!(artifact.content_type, EXPORT_CONTENT_TYPE);

        let artifact = export_artifact(&[], Some("march.csv"));
        assert_eq!(artifact.file_name, "march.csv");
    }
}
