use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::{AppError, Diagnostics, Result, TtlCache};
use crate::modules::invoices::{InvoiceAggregator, InvoiceTotals};
use crate::modules::lineitems::{Normalizer, TaxCalculator};
use crate::modules::reports::models::RateBucketReport;
use crate::modules::reports::services::ReportBucketizer;

/// Facade running the full pipeline for report views
///
/// normalize → compute → aggregate/bucketize, with date-range validation
/// and an optional TTL cache so repeated renders of the same report view
/// skip recomputation. The computation stages themselves stay pure and
/// cache-free; this is the only fallible surface of the crate.
pub struct ReportService {
    normalizer: Normalizer,
    calculator: TaxCalculator,
    aggregator: InvoiceAggregator,
    bucketizer: ReportBucketizer,
    cache: Option<TtlCache<String, RateBucketReport>>,
}

impl ReportService {
    /// Service without caching
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
            calculator: TaxCalculator::new(),
            aggregator: InvoiceAggregator::new(),
            bucketizer: ReportBucketizer::new(),
            cache: None,
        }
    }

    /// Service with a report cache of the given TTL
    pub fn with_cache(ttl: Duration) -> Self {
        Self {
            cache: Some(TtlCache::new(ttl)),
            ..Self::new()
        }
    }

    /// GST-rate-bucketed report over raw backend records
    ///
    /// `cache_key` identifies the report view for caching; pass None to
    /// always recompute. A cache hit returns empty diagnostics (they were
    /// surfaced when the entry was computed).
    pub fn rate_report(
        &mut self,
        raws: &[Value],
        from: NaiveDate,
        to: NaiveDate,
        cache_key: Option<&str>,
    ) -> Result<(RateBucketReport, Diagnostics)> {
        Self::validate_range(from, to)?;

        if let (Some(key), Some(cache)) = (cache_key, self.cache.as_mut()) {
            if let Some(report) = cache.get(&key.to_string()) {
                debug!("Rate report cache hit for '{}'", key);
                return Ok((report, Diagnostics::new()));
            }
        }

        let mut diagnostics = Diagnostics::new();
        let items = self.normalizer.normalize_all(raws, &mut diagnostics);
        let lines = self.calculator.compute_all(&items, &mut diagnostics);
        let report = self.bucketizer.bucketize(&lines, from, to);

        if report.is_empty() {
            warn!("Empty rate report for period {} to {}", from, to);
        } else {
            info!(
                "Rate report for {} to {}: {} tiers, {} other lines, {} skipped",
                from, to, report.buckets.len(), report.other.line_count, report.skipped_count
            );
        }

        if let (Some(key), Some(cache)) = (cache_key, self.cache.as_mut()) {
            cache.insert(key.to_string(), report.clone());
        }

        Ok((report, diagnostics))
    }

    /// Per-invoice totals over raw backend records, grouped by each
    /// record's own bill/invoice/registration reference
    pub fn invoice_report(&self, raws: &[Value]) -> Result<(Vec<InvoiceTotals>, Diagnostics)> {
        let mut diagnostics = Diagnostics::new();
        let items = self.normalizer.normalize_all(raws, &mut diagnostics);
        let lines = self.calculator.compute_all(&items, &mut diagnostics);
        let totals = self.aggregator.by_invoice_ref(&lines);

        info!(
            "Invoice report: {} records into {} invoices",
            raws.len(),
            totals.len()
        );

        Ok((totals, diagnostics))
    }

    fn validate_range(from: NaiveDate, to: NaiveDate) -> Result<()> {
        if from > to {
            return Err(AppError::validation(format!(
                "from ({}) must be before or equal to to ({})",
                from, to
            )));
        }
        Ok(())
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
