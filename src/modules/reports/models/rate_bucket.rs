use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::lineitems::ComputedLine;

/// The GST rate tiers recognized by tax-authority reports, in percent
pub const GST_RATE_TIERS: [u32; 5] = [0, 5, 12, 18, 28];

/// Per-rate totals for a tax report
///
/// `rate_percent` is one of the known tiers; `None` marks the catch-all
/// bucket for lines whose combined rate matches no tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBucketTotals {
    pub rate_percent: Option<Decimal>,
    pub taxable_sum: Decimal,
    pub cgst_sum: Decimal,
    pub sgst_sum: Decimal,
    pub igst_sum: Decimal,
    pub line_count: i64,
}

impl RateBucketTotals {
    pub fn new(rate_percent: Option<Decimal>) -> Self {
        Self {
            rate_percent,
            taxable_sum: Decimal::ZERO,
            cgst_sum: Decimal::ZERO,
            sgst_sum: Decimal::ZERO,
            igst_sum: Decimal::ZERO,
            line_count: 0,
        }
    }

    /// Fold one computed line into this bucket
    pub fn absorb(&mut self, line: &ComputedLine) {
        self.line_count += 1;
        self.taxable_sum += line.taxable_amount;
        self.cgst_sum += line.cgst_amount;
        self.sgst_sum += line.sgst_amount;
        self.igst_sum += line.igst_amount;
    }

    pub fn total_tax(&self) -> Decimal {
        self.cgst_sum + self.sgst_sum + self.igst_sum
    }

    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

/// Rate-bucketed report over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBucketReport {
    /// Reporting period, both ends inclusive
    pub from: NaiveDate,
    pub to: NaiveDate,

    /// Known rate tiers with at least one contributing line, ascending
    pub buckets: Vec<RateBucketTotals>,

    /// Lines whose combined rate matched no known tier; rendered as its own
    /// row even when empty
    pub other: RateBucketTotals,

    /// Lines excluded for a missing or unparseable transaction date
    pub skipped_count: usize,
}

impl RateBucketReport {
    /// Total taxable value across the known tiers (excludes "other")
    pub fn total_taxable(&self) -> Decimal {
        self.buckets.iter().map(|b| b.taxable_sum).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() && self.other.is_empty()
    }
}
