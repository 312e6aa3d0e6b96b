// End-to-end pipeline: raw backend JSON → normalize → compute →
// aggregate / bucketize, the way the report screens drive the engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use gstcore::core::Diagnostics;
use gstcore::invoices::InvoiceAggregator;
use gstcore::lineitems::{Normalizer, TaxCalculator};
use gstcore::reports::{ReportBucketizer, ReportService};

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

/// A month of mixed records across the endpoint shapes
fn mixed_raws() -> Vec<Value> {
    vec![
        // Counter-sale: forward mode, 18% intra-state
        json!({
            "itemName": "Engine oil 5W-30",
            "quantity": 2, "unitPrice": 100,
            "cgstPercent": 9, "sgstPercent": 9,
            "invoiceNo": "CS-1", "invoiceDate": "2025-03-05"
        }),
        // Same invoice, second line at 5%
        json!({
            "itemName": "Oil filter",
            "quantity": 1, "unitPrice": 200,
            "cgstPercent": 2.5, "sgstPercent": 2.5,
            "invoiceNo": "CS-1", "invoiceDate": "2025-03-05"
        }),
        // Purchase: reverse mode, gross only, inter-state
        json!({
            "partName": "Clutch plate",
            "total": 1180, "igst": 18,
            "billNo": "P-9", "billDate": "15-03-2025"
        }),
        // Zero-rated service
        json!({
            "serviceName": "Warranty inspection",
            "qty": 1, "rate": 500,
            "jobCardId": "JC-3", "date": "2025-03-20"
        }),
        // Record with an unparseable date: excluded from buckets, counted
        json!({
            "itemName": "Coolant",
            "quantity": 1, "unitPrice": 300,
            "cgstPercent": 9, "sgstPercent": 9,
            "invoiceNo": "CS-2", "date": "around mid march"
        }),
        // Out of range for the March report
        json!({
            "itemName": "Wiper blade",
            "quantity": 1, "unitPrice": 400,
            "cgstPercent": 9, "sgstPercent": 9,
            "invoiceNo": "CS-8", "date": "2025-04-02"
        }),
    ]
}

#[test]
fn test_raw_records_to_rate_buckets() {
    let mut diagnostics = Diagnostics::new();
    let items = Normalizer::new().normalize_all(&mixed_raws(), &mut diagnostics);
    let lines = TaxCalculator::new().compute_all(&items, &mut diagnostics);

    let report = ReportBucketizer::new().bucketize(&lines, march(1), march(31));

    // 0% (inspection), 5% (filter), 18% (oil + clutch)
    assert_eq!(report.buckets.len(), 3);

    let zero = &report.buckets[0];
    assert_eq!(zero.rate_percent, Some(dec!(0)));
    assert_eq!(zero.taxable_sum, dec!(500.00));

    let five = &report.buckets[1];
    assert_eq!(five.rate_percent, Some(dec!(5)));
    assert_eq!(five.taxable_sum, dec!(200.00));
    assert_eq!(five.total_tax(), dec!(10.00));

    let eighteen = &report.buckets[2];
    assert_eq!(eighteen.rate_percent, Some(dec!(18)));
    // 200 forward + 1000 reverse-derived
    assert_eq!(eighteen.taxable_sum, dec!(1200.00));
    assert_eq!(eighteen.cgst_sum, dec!(18.00));
    assert_eq!(eighteen.sgst_sum, dec!(18.00));
    assert_eq!(eighteen.igst_sum, dec!(180.00));

    // Coolant line skipped for its date; wiper blade silently out of range
    assert_eq!(report.skipped_count, 1);
    assert!(report.other.is_empty());

    // One warning: the unparseable date
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_raw_records_to_invoice_totals() {
    let mut diagnostics = Diagnostics::new();
    let items = Normalizer::new().normalize_all(&mixed_raws(), &mut diagnostics);
    let lines = TaxCalculator::new().compute_all(&items, &mut diagnostics);

    let totals = InvoiceAggregator::new().by_invoice_ref(&lines);

    // CS-1, P-9, JC-3, CS-2, CS-8 in first-seen order
    assert_eq!(totals.len(), 5);

    let cs1 = &totals[0];
    assert_eq!(cs1.invoice_id, "CS-1");
    assert_eq!(cs1.line_count, 2);
    assert_eq!(cs1.total_quantity, dec!(3));
    assert_eq!(cs1.total_taxable, dec!(400.00));
    assert_eq!(cs1.grand_total, dec!(446.00));
    assert!(cs1.is_consistent());

    let purchase = &totals[1];
    assert_eq!(purchase.invoice_id, "P-9");
    assert_eq!(purchase.total_taxable, dec!(1000.00));
    assert_eq!(purchase.total_igst, dec!(180.00));
    assert_eq!(purchase.grand_total, dec!(1180.00));

    // Every invoice reconciles within a paisa
    assert!(totals.iter().all(|t| t.is_consistent()));

    // Grand totals equal the sum of line final amounts per invoice
    let cs1_lines: Decimal = lines
        .iter()
        .filter(|l| l.invoice_ref.as_deref() == Some("CS-1"))
        .map(|l| l.final_amount)
        .sum();
    assert_eq!(cs1.grand_total, cs1_lines);
}

#[test]
fn test_report_service_facade() {
    let mut service = ReportService::new();

    let (report, diagnostics) = service
        .rate_report(&mixed_raws(), march(1), march(31), None)
        .unwrap();

    assert_eq!(report.buckets.len(), 3);
    assert_eq!(report.skipped_count, 1);
    assert_eq!(diagnostics.len(), 1);

    let (totals, _) = service.invoice_report(&mixed_raws()).unwrap();
    assert_eq!(totals.len(), 5);
}
