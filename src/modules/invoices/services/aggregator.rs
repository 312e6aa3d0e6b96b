use std::collections::HashMap;

use tracing::debug;

use crate::modules::invoices::models::InvoiceTotals;
use crate::modules::lineitems::ComputedLine;

/// InvoiceAggregator groups computed lines into per-invoice totals
///
/// The grouping key is caller-supplied because different screens group by
/// different identifiers (bill number, invoice number, vehicle reg id).
/// Output order is the first-seen order of the input sequence, so repeated
/// identical inputs produce identical output (snapshot-testable).
pub struct InvoiceAggregator;

impl InvoiceAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Group lines by the supplied key and sum each group
    ///
    /// Lines whose key is None belong to no invoice and are skipped, so a
    /// group with zero lines is never emitted.
    pub fn aggregate<F>(&self, lines: &[ComputedLine], key: F) -> Vec<InvoiceTotals>
    where
        F: Fn(&ComputedLine) -> Option<String>,
    {
        let mut totals: Vec<InvoiceTotals> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for line in lines {
            let Some(invoice_id) = key(line) else {
                continue;
            };

            let slot = *index.entry(invoice_id.clone()).or_insert_with(|| {
                totals.push(InvoiceTotals::new(invoice_id.clone()));
                totals.len() - 1
            });

            totals[slot].absorb(line);
        }

        debug!(
            "Aggregated {} lines into {} invoice groups",
            lines.len(),
            totals.len()
        );

        totals
    }

    /// Group on each line's own invoice reference
    pub fn by_invoice_ref(&self, lines: &[ComputedLine]) -> Vec<InvoiceTotals> {
        self.aggregate(lines, |line| line.invoice_ref.clone())
    }

    /// Combine two aggregation results
    ///
    /// Groups present in both inputs are merged; new groups keep their order
    /// after the existing ones. Aggregating in parts then merging equals one
    /// aggregation over the concatenated input.
    pub fn merge(&self, a: Vec<InvoiceTotals>, b: Vec<InvoiceTotals>) -> Vec<InvoiceTotals> {
        let mut totals = a;
        let mut index: HashMap<String, usize> = totals
            .iter()
            .enumerate()
            .map(|(i, t)| (t.invoice_id.clone(), i))
            .collect();

        for group in b {
            match index.get(&group.invoice_id) {
                Some(&slot) => totals[slot].merge_from(&group),
                None => {
                    index.insert(group.invoice_id.clone(), totals.len());
                    totals.push(group);
                }
            }
        }

        totals
    }
}

impl Default for InvoiceAggregator {
    fn default() -> Self {
        Self::new()
    }
}
