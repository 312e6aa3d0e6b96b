// Rate-wise regrouping for tax-authority style reports.
//
// Lines inside the date range are assigned to the GST tier matching their
// combined rate. Slightly-off rates (bad upstream rounding, e.g. 17.99)
// snap to the nearest tier within 0.1 percentage points; anything further
// lands in the explicit "other" bucket instead of being dropped or merged.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::modules::lineitems::ComputedLine;
use crate::modules::reports::models::{RateBucketReport, RateBucketTotals, GST_RATE_TIERS};

/// Maximum distance, in percentage points, for snapping a rate to a tier
fn snap_tolerance() -> Decimal {
    Decimal::new(1, 1) // 0.1
}

/// ReportBucketizer regroups computed lines by GST rate tier
pub struct ReportBucketizer;

impl ReportBucketizer {
    pub fn new() -> Self {
        Self
    }

    /// Bucket lines whose transaction date falls within [from, to]
    ///
    /// Lines without a parseable date are counted in `skipped_count`;
    /// out-of-range lines are simply not part of the report.
    pub fn bucketize(
        &self,
        lines: &[ComputedLine],
        from: NaiveDate,
        to: NaiveDate,
    ) -> RateBucketReport {
        let mut tiers: Vec<RateBucketTotals> = GST_RATE_TIERS
            .iter()
            .map(|rate| RateBucketTotals::new(Some(Decimal::from(*rate))))
            .collect();
        let mut other = RateBucketTotals::new(None);
        let mut skipped_count = 0usize;

        for line in lines {
            let Some(date) = line.txn_date else {
                skipped_count += 1;
                continue;
            };
            if date < from || date > to {
                continue;
            }

            match Self::snap_to_tier(line.total_rate()) {
                Some(slot) => tiers[slot].absorb(line),
                None => other.absorb(line),
            }
        }

        // Only tiers that actually contributed make it into the report
        let buckets: Vec<RateBucketTotals> =
            tiers.into_iter().filter(|b| !b.is_empty()).collect();

        debug!(
            "Bucketized {} lines into {} tiers (other: {}, skipped: {})",
            lines.len(),
            buckets.len(),
            other.line_count,
            skipped_count
        );

        RateBucketReport {
            from,
            to,
            buckets,
            other,
            skipped_count,
        }
    }

    /// Index of the tier this combined rate snaps to, if any
    fn snap_to_tier(rate: Decimal) -> Option<usize> {
        GST_RATE_TIERS
            .iter()
            .position(|tier| (rate - Decimal::from(*tier)).abs() <= snap_tolerance())
    }
}

impl Default for ReportBucketizer {
    fn default() -> Self {
        Self::new()
    }
}
