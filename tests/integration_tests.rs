//! Integration tests for invoice-recon

use bigdecimal::BigDecimal;
use invoice_recon::{
    action_items, export_artifact, export_to_csv, reconcile, reconcile_default, summarize,
    utils::{MemorySink, MemorySource, StrictLedgerValidator},
    DuplicatePolicy, LedgerSide, ReconError, ReconciliationConfig, ReconciliationEngine,
    ReconciliationReport, ReconciliationStatus, ReportSink, ResultFilter, Transaction,
    TransactionSource,
};
use std::str::FromStr;

const VENDOR_CSV: &str = "\
Invoice ID,Amount,Date,Description,Vendor
INV-001,\"$1,200.00\",2024-03-01,Laptops,Acme
INV-002,450.00,2024-03-02,Monitors,Acme
INV-003,99.99,2024-03-03,Cables,Acme
INV-004,15.00,2024-03-04,Adapters,Acme
";

const INTERNAL_CSV: &str = "\
invoice_id,amount,date,cost_center
INV-001,1200,2024-03-01,IT
INV-002,455.00,2024-03-02,IT
INV-003,100.00,2024-03-03,IT
INV-005,80.00,2024-03-05,OPS
,12.00,2024-03-06,OPS
";

fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

fn txn(id: &str, amount: &str) -> Transaction {
    Transaction::new(id, dec(amount), "2024-01-01")
}

#[tokio::test]
async fn test_complete_reconciliation_workflow() {
    let source = MemorySource::new();
    source.insert("vendor.csv", VENDOR_CSV);
    source.insert("internal.csv", INTERNAL_CSV);

    let vendor = source.load("vendor.csv").await.unwrap();
    let internal = source.load("internal.csv").await.unwrap();

    assert_eq!(vendor.row_count, 4);
    assert_eq!(internal.row_count, 4);
    assert_eq!(internal.columns, vec!["invoice_id", "amount", "date", "cost_center"]);
    assert_eq!(vendor.data[0].amount, dec("1200.00"));
    assert_eq!(vendor.data[0].vendor, "Acme");

    let engine = ReconciliationEngine::new();
    let results = engine
        .reconcile_checked(&vendor.data, &internal.data)
        .unwrap();

    let outcome: Vec<(&str, ReconciliationStatus)> = results
        .iter()
        .map(|r| (r.invoice_id.as_str(), r.status))
        .collect();
    assert_eq!(
        outcome,
        vec![
            ("INV-002", ReconciliationStatus::AmountMismatch),
            ("INV-004", ReconciliationStatus::Missing),
            ("INV-005", ReconciliationStatus::Missing),
            ("INV-001", ReconciliationStatus::Matched),
            ("INV-003", ReconciliationStatus::Matched),
        ]
    );
    assert_eq!(results[1].missing_side(), Some(LedgerSide::Internal));
    assert_eq!(results[2].missing_side(), Some(LedgerSide::Vendor));
    assert_eq!(results[4].amount_difference, Some(dec("0.01")));

    let summary = summarize(&results);
    assert_eq!(summary.total_records, 5);
    assert_eq!(summary.matched, 2);
    assert_eq!(summary.missing, 2);
    assert_eq!(summary.amount_mismatch, 1);
    assert_eq!(summary.match_rate(), 40.0);
    assert_eq!(action_items(&summary).len(), 2);

    let mut sink = MemorySink::new();
    let artifact = export_artifact(&results, None);
    sink.deliver(&artifact).await.unwrap();

    let delivered = sink.get("reconciliation-results.csv").unwrap();
    let lines: Vec<&str> = delivered.content.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[1],
        r#""INV-002","AMOUNT-MISMATCH","450.00","455.00","5.00","2024-03-02","2024-03-02","Monitors""#
    );
    assert_eq!(
        lines[3],
        r#""INV-005","MISSING","N/A","80.00","N/A","N/A","2024-03-05","N/A""#
    );
    assert_eq!(
        internal.data[3].extra.get("cost_center").map(String::as_str),
        Some("OPS")
    );
}

#[tokio::test]
async fn test_source_rejects_invalid_files() {
    let source = MemorySource::new();
    source.insert("ledger.txt", "invoice_id,amount,date\nA1,1,2024\n");
    source.insert("empty.csv", "");

    assert!(matches!(
        source.load("ledger.txt").await,
        Err(ReconError::Validation(_))
    ));
    assert!(matches!(
        source.load("empty.csv").await,
        Err(ReconError::Validation(_))
    ));
    assert!(matches!(
        source.load("absent.csv").await,
        Err(ReconError::Source(_))
    ));

    let names = source.available().await.unwrap();
    assert_eq!(names, vec!["empty.csv", "ledger.txt"]);

    source.clear();
    assert!(source.available().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_source_respects_configured_size_limit() {
    let config = ReconciliationConfig {
        max_file_size: 16,
        ..ReconciliationConfig::default()
    };
    let source = MemorySource::with_config(config);
    source.insert("big.csv", "invoice_id,amount,date\nA1,1,2024\n");

    assert!(matches!(
        source.load("big.csv").await,
        Err(ReconError::Validation(_))
    ));
}

#[test]
fn test_concrete_scenarios() {
    let results = reconcile_default(&[txn("A1", "100.00")], &[txn("A1", "100.00")]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, ReconciliationStatus::Matched);
    assert_eq!(results[0].amount_difference, Some(BigDecimal::from(0)));

    let results = reconcile(
        &[txn("A1", "100.00")],
        &[txn("A1", "105.00")],
        &dec("0.01"),
    );
    assert_eq!(results[0].status, ReconciliationStatus::AmountMismatch);
    assert_eq!(results[0].amount_difference, Some(dec("5.00")));

    let results = reconcile_default(&[txn("A1", "50")], &[]);
    assert_eq!(results[0].status, ReconciliationStatus::Missing);
    assert!(results[0].vendor_record.is_some());
    assert!(results[0].internal_record.is_none());

    let results = reconcile_default(&[], &[]);
    assert!(results.is_empty());
    let summary = summarize(&results);
    assert_eq!(summary.total_records, 0);
    assert_eq!(summary.matched + summary.missing + summary.amount_mismatch, 0);

    assert_eq!(invoice_recon::parse_amount("$1,234.50"), dec("1234.50"));
}

#[test]
fn test_strict_validator_and_reject_policy() {
    let duplicated = vec![txn("A1", "1"), txn("A1", "2")];

    let strict = ReconciliationEngine::with_validator(
        ReconciliationConfig::default(),
        Box::new(StrictLedgerValidator),
    );
    assert!(matches!(
        strict.reconcile_checked(&duplicated, &[]),
        Err(ReconError::DuplicateInvoice { side: LedgerSide::Vendor, .. })
    ));

    let rejecting = ReconciliationEngine::with_config(
        ReconciliationConfig::default().duplicate_policy(DuplicatePolicy::Reject),
    );
    assert!(rejecting.reconcile_checked(&[], &duplicated).is_err());

    let lenient = ReconciliationEngine::new();
    let results = lenient.reconcile_checked(&duplicated, &[]).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].vendor_record.as_ref().unwrap().amount, dec("2"));
}

#[test]
fn test_filter_and_report() {
    let vendor = vec![txn("INV-1", "10"), txn("INV-2", "10"), txn("CR-3", "10")];
    let internal = vec![txn("INV-1", "10"), txn("INV-2", "11")];
    let results = reconcile_default(&vendor, &internal);

    let invoices = ResultFilter::new().search("inv-").apply(&results);
    assert_eq!(invoices.len(), 2);

    let report = ReconciliationReport::new(results.clone());
    assert_eq!(report.summary, summarize(&results));
    assert_eq!(
        report.action_items(),
        vec![
            "Review 1 transactions with amount mismatches".to_string(),
            "Investigate 1 missing transactions".to_string(),
        ]
    );

    let filtered: Vec<_> = invoices.into_iter().cloned().collect();
    let csv = export_to_csv(&filtered);
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_sink_rejects_unnamed_artifact() {
    let mut sink = MemorySink::new();
    let artifact = export_artifact(&[], Some(" "));
    assert!(matches!(
        sink.deliver(&artifact).await,
        Err(ReconError::Sink(_))
    ));
    assert!(sink.delivered().is_empty());
}
