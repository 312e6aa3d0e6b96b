// Invoice-level roll-up of computed lines.
//
// One InvoiceTotals per bill/invoice/job-card id. The grand total is the
// sum of the already-rounded line final amounts, so it reconciles exactly
// with what each line displays.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::approx_eq;
use crate::modules::lineitems::ComputedLine;

/// Totals for one invoice group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// The grouping key: bill number, invoice number, or vehicle reg id
    pub invoice_id: String,

    /// Transaction date of the first line seen for this invoice
    pub date: Option<NaiveDate>,

    /// Number of lines in the group
    pub line_count: i64,

    /// Sum of pre-tax line quantities
    pub total_quantity: Decimal,

    pub total_taxable: Decimal,
    pub total_cgst: Decimal,
    pub total_sgst: Decimal,
    pub total_igst: Decimal,

    /// Sum of line final amounts
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// Empty totals for a newly-seen invoice id
    pub fn new(invoice_id: String) -> Self {
        Self {
            invoice_id,
            date: None,
            line_count: 0,
            total_quantity: Decimal::ZERO,
            total_taxable: Decimal::ZERO,
            total_cgst: Decimal::ZERO,
            total_sgst: Decimal::ZERO,
            total_igst: Decimal::ZERO,
            grand_total: Decimal::ZERO,
        }
    }

    /// Fold one computed line into the totals
    pub fn absorb(&mut self, line: &ComputedLine) {
        if self.date.is_none() {
            self.date = line.txn_date;
        }
        self.line_count += 1;
        self.total_quantity += line.quantity;
        self.total_taxable += line.taxable_amount;
        self.total_cgst += line.cgst_amount;
        self.total_sgst += line.sgst_amount;
        self.total_igst += line.igst_amount;
        self.grand_total += line.final_amount;
    }

    /// Fold another group's totals into this one (same invoice id)
    pub fn merge_from(&mut self, other: &InvoiceTotals) {
        if self.date.is_none() {
            self.date = other.date;
        }
        self.line_count += other.line_count;
        self.total_quantity += other.total_quantity;
        self.total_taxable += other.total_taxable;
        self.total_cgst += other.total_cgst;
        self.total_sgst += other.total_sgst;
        self.total_igst += other.total_igst;
        self.grand_total += other.grand_total;
    }

    /// Sum of all tax components
    pub fn total_tax(&self) -> Decimal {
        self.total_cgst + self.total_sgst + self.total_igst
    }

    /// Whether grand_total matches taxable + taxes within a paisa
    pub fn is_consistent(&self) -> bool {
        approx_eq(self.grand_total, self.total_taxable + self.total_tax())
    }
}
