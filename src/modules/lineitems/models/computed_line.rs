use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the taxable value of a line was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeMode {
    /// taxable = quantity × unit_price − discount
    Forward,
    /// taxable = gross / (1 + total_rate/100), for records that only carry
    /// a tax-inclusive amount
    Reverse,
}

/// Per-line computation output
///
/// Every monetary field is already rounded to paise at the point of
/// computation; re-displaying a ComputedLine never changes its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedLine {
    pub description: String,

    /// Quantity that contributed to the totals (0 for invalid quantities)
    pub quantity: Decimal,

    /// quantity × unit_price before discount
    pub base_amount: Decimal,

    /// base_amount × discount_percent / 100
    pub discount_amount: Decimal,

    /// The price base tax percentages apply to
    pub taxable_amount: Decimal,

    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,

    /// taxable_amount + all tax amounts
    pub final_amount: Decimal,

    /// Rates carried through for aggregation and rate bucketing
    pub cgst_percent: Decimal,
    pub sgst_percent: Decimal,
    pub igst_percent: Decimal,

    pub mode: ComputeMode,

    pub txn_date: Option<NaiveDate>,
    pub invoice_ref: Option<String>,
}

impl ComputedLine {
    /// Combined GST rate percentage for this line
    pub fn total_rate(&self) -> Decimal {
        self.cgst_percent + self.sgst_percent + self.igst_percent
    }

    /// Sum of all tax component amounts
    pub fn total_tax(&self) -> Decimal {
        self.cgst_amount + self.sgst_amount + self.igst_amount
    }
}
