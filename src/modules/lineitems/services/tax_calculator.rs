// Per-line GST computation.
//
// Two derivations exist in the wild: forward (rate × quantity with a
// discount) and reverse (strip the tax back out of a known gross amount).
// The mode is decided per line from the data, not per screen, and the
// taxable value is always rounded before the tax components are split so
// that totals reconcile against already-rounded gross figures.

use rust_decimal::Decimal;

use crate::core::money::{approx_eq, percent_of, round_money};
use crate::core::{DataWarning, Diagnostics};
use crate::modules::lineitems::models::{ComputeMode, ComputedLine, LineItem};

/// TaxCalculator computes discount, taxable value, CGST/SGST/IGST splits
/// and the final amount for one line item
///
/// Total over all inputs: malformed values are clamped with a diagnostic,
/// never an error.
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute one line
    pub fn compute_line(&self, item: &LineItem, diagnostics: &mut Diagnostics) -> ComputedLine {
        let item = Self::sanitize(item, diagnostics);

        match item.known_gross_amount {
            // Reverse mode: only a tax-inclusive amount exists
            Some(gross) if item.unit_price.is_zero() => self.compute_reverse(&item, gross),
            _ => self.compute_forward(&item, diagnostics),
        }
    }

    /// Clamp malformed numeric fields into range, with a diagnostic each
    ///
    /// Negative rates in particular must not reach the arithmetic: a
    /// combined rate of -100 would divide by zero in reverse mode.
    fn sanitize(item: &LineItem, diagnostics: &mut Diagnostics) -> LineItem {
        let mut clean = item.clone();

        if clean.unit_price < Decimal::ZERO {
            // Data error, not a refund; refunds are out of scope
            diagnostics.record(DataWarning::NegativeUnitPrice {
                price: clean.unit_price,
            });
            clean.unit_price = Decimal::ZERO;
        }

        if clean.discount_percent < Decimal::ZERO || clean.discount_percent > Decimal::ONE_HUNDRED
        {
            diagnostics.record(DataWarning::DiscountOutOfRange {
                percent: clean.discount_percent,
            });
            clean.discount_percent = clean
                .discount_percent
                .max(Decimal::ZERO)
                .min(Decimal::ONE_HUNDRED);
        }

        let rates = [
            ("CGST", &mut clean.cgst_percent),
            ("SGST", &mut clean.sgst_percent),
            ("IGST", &mut clean.igst_percent),
        ];
        for (field, rate) in rates {
            if *rate < Decimal::ZERO {
                diagnostics.record(DataWarning::NegativeTaxRate {
                    field,
                    percent: *rate,
                });
                *rate = Decimal::ZERO;
            }
        }

        clean
    }

    /// Compute a batch of lines
    pub fn compute_all(&self, items: &[LineItem], diagnostics: &mut Diagnostics) -> Vec<ComputedLine> {
        items
            .iter()
            .map(|item| self.compute_line(item, diagnostics))
            .collect()
    }

    fn compute_forward(&self, item: &LineItem, diagnostics: &mut Diagnostics) -> ComputedLine {
        if item.quantity <= Decimal::ZERO {
            return Self::zero_line(item, ComputeMode::Forward);
        }

        // Absurd magnitudes would overflow Decimal; treat as a data error
        let base_amount = match item.quantity.checked_mul(item.unit_price) {
            Some(product) => round_money(product),
            None => {
                diagnostics.record(DataWarning::AmountOverflow {
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                });
                return Self::zero_line(item, ComputeMode::Forward);
            }
        };
        let discount_amount = percent_of(base_amount, item.discount_percent);
        // Taxable is rounded before the components are split
        let taxable_amount = round_money(base_amount - discount_amount);

        let cgst_amount = percent_of(taxable_amount, item.cgst_percent);
        let sgst_amount = percent_of(taxable_amount, item.sgst_percent);
        let igst_amount = percent_of(taxable_amount, item.igst_percent);
        let final_amount = taxable_amount + cgst_amount + sgst_amount + igst_amount;

        // Open data question: both a unit price and a gross amount present.
        // Forward mode wins; a disagreement beyond a paisa is reported.
        if let Some(supplied) = item.known_gross_amount {
            if !approx_eq(final_amount, supplied) {
                diagnostics.record(DataWarning::ConflictingAmounts {
                    computed: final_amount,
                    supplied,
                });
            }
        }

        ComputedLine {
            description: item.description.clone(),
            quantity: item.quantity,
            base_amount,
            discount_amount,
            taxable_amount,
            cgst_amount,
            sgst_amount,
            igst_amount,
            final_amount,
            cgst_percent: item.cgst_percent,
            sgst_percent: item.sgst_percent,
            igst_percent: item.igst_percent,
            mode: ComputeMode::Forward,
            txn_date: item.txn_date,
            invoice_ref: item.invoice_ref.clone(),
        }
    }

    fn compute_reverse(&self, item: &LineItem, gross: Decimal) -> ComputedLine {
        let gross = round_money(gross.max(Decimal::ZERO));
        let total_rate = item.total_rate();

        let taxable_amount = if total_rate.is_zero() {
            // Nothing to strip out
            gross
        } else {
            round_money(gross / (Decimal::ONE + total_rate / Decimal::ONE_HUNDRED))
        };

        let cgst_amount = percent_of(taxable_amount, item.cgst_percent);
        let sgst_amount = percent_of(taxable_amount, item.sgst_percent);
        let igst_amount = percent_of(taxable_amount, item.igst_percent);
        let final_amount = taxable_amount + cgst_amount + sgst_amount + igst_amount;

        ComputedLine {
            description: item.description.clone(),
            quantity: item.quantity.max(Decimal::ZERO),
            base_amount: taxable_amount,
            discount_amount: Decimal::ZERO,
            taxable_amount,
            cgst_amount,
            sgst_amount,
            igst_amount,
            final_amount,
            cgst_percent: item.cgst_percent,
            sgst_percent: item.sgst_percent,
            igst_percent: item.igst_percent,
            mode: ComputeMode::Reverse,
            txn_date: item.txn_date,
            invoice_ref: item.invoice_ref.clone(),
        }
    }

    fn zero_line(item: &LineItem, mode: ComputeMode) -> ComputedLine {
        ComputedLine {
            description: item.description.clone(),
            quantity: Decimal::ZERO,
            base_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            taxable_amount: Decimal::ZERO,
            cgst_amount: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            igst_amount: Decimal::ZERO,
            final_amount: Decimal::ZERO,
            cgst_percent: item.cgst_percent,
            sgst_percent: item.sgst_percent,
            igst_percent: item.igst_percent,
            mode,
            txn_date: item.txn_date,
            invoice_ref: item.invoice_ref.clone(),
        }
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
