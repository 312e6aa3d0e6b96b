use rust_decimal::Decimal;
use tracing::warn;

/// Data-integrity findings recovered from during computation
///
/// None of these are fatal: the engine clamps or zeroes the offending value
/// and keeps going. The caller decides whether to surface them (toast, log).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataWarning {
    /// A field was present but not coercible to a number; treated as 0
    #[error("field '{field}' is not numeric ({value}); treated as 0")]
    NonNumericField { field: String, value: String },

    /// Record carried both CGST/SGST and IGST rates; kept CGST/SGST
    #[error("record has both CGST/SGST ({cgst}+{sgst}) and IGST ({igst}); IGST zeroed")]
    MutuallyExclusiveRates {
        cgst: Decimal,
        sgst: Decimal,
        igst: Decimal,
    },

    /// Unit price and supplied gross amount disagree; forward mode was used
    #[error("computed gross {computed} disagrees with supplied gross {supplied}; forward mode used")]
    ConflictingAmounts { computed: Decimal, supplied: Decimal },

    /// Transaction date could not be parsed
    #[error("unparseable transaction date '{raw}'")]
    UnparseableDate { raw: String },

    /// Negative unit price clamped to 0 (refunds are not modeled here)
    #[error("negative unit price {price} clamped to 0")]
    NegativeUnitPrice { price: Decimal },

    /// Negative tax rate clamped to 0
    #[error("negative {field} rate {percent}% clamped to 0")]
    NegativeTaxRate {
        field: &'static str,
        percent: Decimal,
    },

    /// quantity × unit_price exceeds the representable range; treated as 0
    #[error("amount {quantity} × {unit_price} overflows; treated as 0")]
    AmountOverflow {
        quantity: Decimal,
        unit_price: Decimal,
    },

    /// Discount percent outside 0-100 clamped into range
    #[error("discount {percent}% outside 0-100; clamped")]
    DiscountOutOfRange { percent: Decimal },
}

/// Accumulator for data warnings collected across a pipeline run
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<DataWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding; also emits a tracing warning for operators
    pub fn record(&mut self, warning: DataWarning) {
        warn!(%warning, "data integrity finding");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[DataWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Fold another accumulator's findings into this one
    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }
}
