//! Small numeric helpers shared by the calculators.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Number of months amounts are annualized over or amortized across.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Rounds a decimal value to cents using half-up rounding.
///
/// The calculators never round intermediate values; this is applied only
/// where a figure is shown to a person.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(509.597)), dec!(509.60));
/// assert_eq!(round_half_up(dec!(334.850675)), dec!(334.85));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero if it is negative.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Converts an annual figure to its monthly equivalent.
pub fn monthly(annual: Decimal) -> Decimal {
    annual / MONTHS_PER_YEAR
}
