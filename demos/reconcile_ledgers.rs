//! Reconcile a vendor statement against internal records and export the result

use invoice_recon::utils::{MemorySink, MemorySource};
use invoice_recon::{
    export_artifact, ReconciliationEngine, ReconciliationReport, ReportSink, TransactionSource,
};

const VENDOR_STATEMENT: &str = "\
Invoice ID,Amount,Date,Description
INV-1001,\"$2,450.00\",2024-04-02,Quarterly license
INV-1002,310.75,2024-04-05,Support hours
INV-1003,89.90,2024-04-09,\"Cable kit, 12\"\" pack\"
INV-1004,1200.00,2024-04-11,Workstation
";

const INTERNAL_RECORDS: &str = "\
invoice_id,amount,date,approver
INV-1001,2450,2024-04-02,jlee
INV-1002,315.75,2024-04-05,jlee
INV-1003,89.90,2024-04-09,mpatel
INV-1005,64.00,2024-04-12,mpatel
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Invoice Recon - Ledger Reconciliation Example\n");

    let source = MemorySource::new();
    source.insert("vendor.csv", VENDOR_STATEMENT);
    source.insert("internal.csv", INTERNAL_RECORDS);

    let vendor = source.load("vendor.csv").await?;
    let internal = source.load("internal.csv").await?;
    println!(
        "Loaded {} ({} rows) and {} ({} rows)\n",
        vendor.name, vendor.row_count, internal.name, internal.row_count
    );

    let engine = ReconciliationEngine::new();
    let results = engine.reconcile_checked(&vendor.data, &internal.data)?;
    let report = ReconciliationReport::new(results);

    println!("Run {}", report.run_id);
    for result in &report.results {
        let difference = result
            .amount_difference
            .as_ref()
            .map(invoice_recon::format_amount)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<10} {:<16} diff {}",
            result.invoice_id,
            result.status.label(),
            difference
        );
    }

    let summary = &report.summary;
    println!(
        "\nMatched {} / {} ({:.1}%), discrepancies {:.1}%",
        summary.matched,
        summary.total_records,
        summary.match_rate(),
        summary.discrepancy_rate()
    );
    for item in report.action_items() {
        println!("  - {}", item);
    }

    let mut sink = MemorySink::new();
    let artifact = export_artifact(&report.results, None);
    sink.deliver(&artifact).await?;
    println!("\n{}:\n{}", artifact.file_name, artifact.content);

    Ok(())
}
