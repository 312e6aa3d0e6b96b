// Rate bucketizer tests: date filtering, tier snapping, the explicit
// "other" bucket and the no-double-counting property.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gstcore::lineitems::{ComputeMode, ComputedLine};
use gstcore::reports::ReportBucketizer;

fn line(rate: Decimal, taxable: Decimal, date: Option<NaiveDate>) -> ComputedLine {
    // Intra-state split for simplicity
    let half = rate / Decimal::from(2);
    let cgst = (taxable * half / Decimal::ONE_HUNDRED).round_dp(2);
    ComputedLine {
        description: String::new(),
        quantity: dec!(1),
        base_amount: taxable,
        discount_amount: Decimal::ZERO,
        taxable_amount: taxable,
        cgst_amount: cgst,
        sgst_amount: cgst,
        igst_amount: Decimal::ZERO,
        final_amount: taxable + cgst + cgst,
        cgst_percent: half,
        sgst_percent: half,
        igst_percent: Decimal::ZERO,
        mode: ComputeMode::Forward,
        txn_date: date,
        invoice_ref: None,
    }
}

fn march(day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 3, day)
}

fn range() -> (NaiveDate, NaiveDate) {
    (march(1).unwrap(), march(31).unwrap())
}

#[test]
fn test_lines_grouped_by_tier() {
    let (from, to) = range();
    let lines = vec![
        line(dec!(18), dec!(100), march(5)),
        line(dec!(18), dec!(200), march(6)),
        line(dec!(5), dec!(50), march(7)),
        line(dec!(0), dec!(10), march(8)),
    ];

    let report = ReportBucketizer::new().bucketize(&lines, from, to);

    // Ascending tier order: 0, 5, 18
    assert_eq!(report.buckets.len(), 3);
    assert_eq!(report.buckets[0].rate_percent, Some(dec!(0)));
    assert_eq!(report.buckets[0].taxable_sum, dec!(10));
    assert_eq!(report.buckets[1].rate_percent, Some(dec!(5)));
    assert_eq!(report.buckets[2].rate_percent, Some(dec!(18)));
    assert_eq!(report.buckets[2].taxable_sum, dec!(300));
    assert!(report.other.is_empty());
    assert_eq!(report.skipped_count, 0);
}

#[test]
fn test_near_tier_rate_snaps_and_far_rate_goes_to_other() {
    let (from, to) = range();
    let lines = vec![
        line(dec!(17.99), dec!(100), march(5)),
        line(dec!(15), dec!(100), march(5)),
    ];

    let report = ReportBucketizer::new().bucketize(&lines, from, to);

    assert_eq!(report.buckets.len(), 1);
    assert_eq!(report.buckets[0].rate_percent, Some(dec!(18)));
    assert_eq!(report.buckets[0].line_count, 1);
    assert_eq!(report.other.line_count, 1);
    assert_eq!(report.other.taxable_sum, dec!(100));
}

#[test]
fn test_date_range_is_inclusive() {
    let (from, to) = range();
    let lines = vec![
        line(dec!(18), dec!(10), march(1)),  // on from
        line(dec!(18), dec!(20), march(31)), // on to
        line(dec!(18), dec!(30), NaiveDate::from_ymd_opt(2025, 4, 1)),
    ];

    let report = ReportBucketizer::new().bucketize(&lines, from, to);

    assert_eq!(report.buckets[0].taxable_sum, dec!(30));
    assert_eq!(report.skipped_count, 0);
}

#[test]
fn test_missing_date_counted_as_skipped() {
    let (from, to) = range();
    let lines = vec![
        line(dec!(18), dec!(100), march(5)),
        line(dec!(18), dec!(100), None),
        line(dec!(18), dec!(100), None),
    ];

    let report = ReportBucketizer::new().bucketize(&lines, from, to);

    assert_eq!(report.skipped_count, 2);
    assert_eq!(report.buckets[0].taxable_sum, dec!(100));
}

#[test]
fn test_empty_tiers_not_emitted() {
    let (from, to) = range();
    let lines = vec![line(dec!(28), dec!(100), march(5))];

    let report = ReportBucketizer::new().bucketize(&lines, from, to);

    assert_eq!(report.buckets.len(), 1);
    assert_eq!(report.buckets[0].rate_percent, Some(dec!(28)));
}

proptest! {
    #[test]
    fn buckets_never_double_count(
        entries in prop::collection::vec(
            (
                prop::sample::select(vec![0u32, 5, 12, 15, 18, 28, 40]),
                1u64..1_000_000u64,
                1u32..28u32,
            ),
            0..50,
        ),
    ) {
        let (from, to) = range();
        let lines: Vec<ComputedLine> = entries
            .iter()
            .map(|(rate, paise, day)| line(
                Decimal::from(*rate),
                Decimal::from(*paise) / Decimal::from(100),
                march(*day),
            ))
            .collect();

        let report = ReportBucketizer::new().bucketize(&lines, from, to);

        let in_range_taxable: Decimal = lines
            .iter()
            .filter(|l| l.txn_date.map(|d| d >= from && d <= to).unwrap_or(false))
            .map(|l| l.taxable_amount)
            .sum();

        // Tier sums never exceed the in-range total, and tiers + other
        // account for exactly the in-range lines.
        prop_assert!(report.total_taxable() <= in_range_taxable);
        let accounted = report.total_taxable() + report.other.taxable_sum;
        prop_assert_eq!(accounted, in_range_taxable);

        let counted: i64 = report.buckets.iter().map(|b| b.line_count).sum::<i64>()
            + report.other.line_count;
        prop_assert_eq!(counted as usize + report.skipped_count, lines.len()
            - lines.iter().filter(|l| {
                l.txn_date.map(|d| d < from || d > to).unwrap_or(false)
            }).count());
    }
}
