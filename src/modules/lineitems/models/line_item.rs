// Canonical line item record.
//
// One LineItem per part/service/labour row. The normalizer produces these
// from the varying raw shapes the backend endpoints return; everything
// downstream (calculator, aggregator, bucketizer) consumes only this shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A normalized line item, ready for tax computation
///
/// All numeric fields default to zero when the raw record was missing or
/// malformed; CGST/SGST and IGST are mutually exclusive (intra-state vs
/// inter-state) — the normalizer enforces this before the record gets here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description of the part or service
    pub description: String,

    /// Quantity (non-positive quantities contribute nothing)
    pub quantity: Decimal,

    /// Price per unit before discount and tax
    pub unit_price: Decimal,

    /// Discount applied to quantity × unit_price, as a percentage (0-100)
    pub discount_percent: Decimal,

    /// Central GST rate percentage (intra-state)
    pub cgst_percent: Decimal,

    /// State GST rate percentage (intra-state)
    pub sgst_percent: Decimal,

    /// Integrated GST rate percentage (inter-state)
    pub igst_percent: Decimal,

    /// Tax-inclusive gross amount supplied by the backend
    ///
    /// When set and no usable unit price exists, the taxable value is
    /// derived from this amount instead of quantity × unit_price.
    pub known_gross_amount: Option<Decimal>,

    /// Transaction date; None when the raw record had no parseable date
    pub txn_date: Option<NaiveDate>,

    /// Bill number, invoice number, or vehicle registration id
    pub invoice_ref: Option<String>,
}

impl LineItem {
    /// Combined GST rate percentage for this line
    pub fn total_rate(&self) -> Decimal {
        self.cgst_percent + self.sgst_percent + self.igst_percent
    }

    /// Whether this line is taxed as an inter-state transaction
    pub fn is_inter_state(&self) -> bool {
        self.igst_percent > Decimal::ZERO
    }
}
