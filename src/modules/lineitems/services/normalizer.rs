// Sole adapter boundary over the raw backend records.
//
// The backend endpoints (spare-part transactions, service-used records,
// invoice items, counter-sale items) each use their own field names and
// sometimes send numbers as strings. All of that variance, plus the
// defensive null handling, lives here and nowhere else.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::core::{DataWarning, Diagnostics};
use crate::modules::lineitems::models::LineItem;

const DESCRIPTION_KEYS: &[&str] = &["description", "itemName", "partName", "serviceName", "name"];
const QUANTITY_KEYS: &[&str] = &["quantity", "qty"];
const UNIT_PRICE_KEYS: &[&str] = &["unitPrice", "unit_price", "rate", "price", "sellingPrice"];
const DISCOUNT_KEYS: &[&str] = &["discountPercent", "discount_percent", "discount"];
const CGST_KEYS: &[&str] = &["cgstPercent", "cgst_percent", "cgst"];
const SGST_KEYS: &[&str] = &["sgstPercent", "sgst_percent", "sgst"];
const IGST_KEYS: &[&str] = &["igstPercent", "igst_percent", "igst"];
const GROSS_KEYS: &[&str] = &["knownGrossAmount", "amount", "total", "finalAmount", "grandTotal"];
const DATE_KEYS: &[&str] = &["date", "txnDate", "invoiceDate", "billDate", "transactionDate"];
const INVOICE_REF_KEYS: &[&str] = &["invoiceId", "invoiceNo", "billNo", "jobCardId", "regNo", "vehicleRegNo"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Normalizer coerces raw backend records into canonical LineItems
///
/// Total over all inputs: missing or malformed fields become zero (with a
/// diagnostic for the malformed ones), never an error.
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize one raw record into a LineItem
    pub fn normalize(&self, raw: &Value, diagnostics: &mut Diagnostics) -> LineItem {
        let description = Self::string_field(raw, DESCRIPTION_KEYS).unwrap_or_default();
        let quantity = Self::decimal_field(raw, QUANTITY_KEYS, diagnostics);
        let unit_price = Self::decimal_field(raw, UNIT_PRICE_KEYS, diagnostics);
        let discount_percent = Self::decimal_field(raw, DISCOUNT_KEYS, diagnostics);
        let cgst_percent = Self::decimal_field(raw, CGST_KEYS, diagnostics);
        let sgst_percent = Self::decimal_field(raw, SGST_KEYS, diagnostics);
        let mut igst_percent = Self::decimal_field(raw, IGST_KEYS, diagnostics);

        // CGST/SGST and IGST are mutually exclusive; keep the intra-state
        // pair, which is the dominant convention in the source data.
        if cgst_percent + sgst_percent > Decimal::ZERO && igst_percent > Decimal::ZERO {
            diagnostics.record(DataWarning::MutuallyExclusiveRates {
                cgst: cgst_percent,
                sgst: sgst_percent,
                igst: igst_percent,
            });
            igst_percent = Decimal::ZERO;
        }

        // A gross amount with no usable unit price marks the line for
        // reverse-mode derivation; when both are present the calculator
        // resolves the conflict.
        let known_gross_amount = Self::optional_decimal_field(raw, GROSS_KEYS);

        let txn_date = Self::date_field(raw, diagnostics);
        let invoice_ref = Self::string_field(raw, INVOICE_REF_KEYS);

        LineItem {
            description,
            quantity,
            unit_price,
            discount_percent,
            cgst_percent,
            sgst_percent,
            igst_percent,
            known_gross_amount,
            txn_date,
            invoice_ref,
        }
    }

    /// Normalize a batch of raw records
    pub fn normalize_all(&self, raws: &[Value], diagnostics: &mut Diagnostics) -> Vec<LineItem> {
        let items: Vec<LineItem> = raws
            .iter()
            .map(|raw| self.normalize(raw, diagnostics))
            .collect();

        debug!(
            "Normalized {} raw records ({} warnings)",
            items.len(),
            diagnostics.len()
        );

        items
    }

    /// First key present in the record, with its value
    fn lookup<'a>(raw: &'a Value, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
        keys.iter()
            .find_map(|key| raw.get(*key).map(|value| (*key, value)))
    }

    /// Coerce a JSON value to Decimal; accepts numbers and numeric strings
    fn coerce_decimal(value: &Value) -> Option<Decimal> {
        match value {
            Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
            Value::String(s) => s.trim().parse::<Decimal>().ok(),
            _ => None,
        }
    }

    /// Numeric field defaulting to 0; warns when present but not numeric
    fn decimal_field(raw: &Value, keys: &[&'static str], diagnostics: &mut Diagnostics) -> Decimal {
        match Self::lookup(raw, keys) {
            None => Decimal::ZERO,
            Some((_, Value::Null)) => Decimal::ZERO,
            Some((field, value)) => Self::coerce_decimal(value).unwrap_or_else(|| {
                diagnostics.record(DataWarning::NonNumericField {
                    field: field.to_string(),
                    value: value.to_string(),
                });
                Decimal::ZERO
            }),
        }
    }

    /// Numeric field that stays absent when missing or malformed
    fn optional_decimal_field(raw: &Value, keys: &[&'static str]) -> Option<Decimal> {
        Self::lookup(raw, keys).and_then(|(_, value)| Self::coerce_decimal(value))
    }

    fn string_field(raw: &Value, keys: &[&'static str]) -> Option<String> {
        Self::lookup(raw, keys).and_then(|(_, value)| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    fn date_field(raw: &Value, diagnostics: &mut Diagnostics) -> Option<NaiveDate> {
        let (_, value) = Self::lookup(raw, DATE_KEYS)?;
        let text = match value {
            Value::String(s) if !s.trim().is_empty() => s.trim(),
            _ => return None,
        };

        match Self::parse_txn_date(text) {
            Some(date) => Some(date),
            None => {
                diagnostics.record(DataWarning::UnparseableDate {
                    raw: text.to_string(),
                });
                None
            }
        }
    }

    /// Parse the date formats the backend emits inconsistently
    fn parse_txn_date(text: &str) -> Option<NaiveDate> {
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(text, format) {
                return Some(date);
            }
        }

        // ISO datetime strings: take the date prefix
        text.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
