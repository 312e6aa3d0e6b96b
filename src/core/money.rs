use rust_decimal::Decimal;

/// All amounts are INR with 2 decimal places (paise)
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary value to paise precision (banker's rounding)
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// The smallest representable monetary unit (one paisa, 0.01)
pub fn paisa() -> Decimal {
    Decimal::new(1, 2)
}

/// Whether two amounts agree within one paisa
///
/// Totals reconciled against independently-rounded figures may differ by a
/// paisa; anything larger is a real discrepancy.
pub fn approx_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= paisa()
}

/// Applies a percentage rate to an amount, rounded to paise
///
/// An overflowing product yields 0 rather than a panic; the inputs this
/// engine feeds in are already clamped, so overflow here means garbage data.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    match amount.checked_mul(percent) {
        Some(product) => round_money(product / Decimal::ONE_HUNDRED),
        None => Decimal::ZERO,
    }
}
