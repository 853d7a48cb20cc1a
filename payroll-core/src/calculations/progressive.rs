//! Progressive bracket taxes.
//!
//! Two techniques are in use and must not be mixed up:
//!
//! - INSS is genuinely cumulative: each slice of salary is charged its own
//!   bracket's rate, up to the contribution ceiling.
//! - IRRF and PLR use a single lookup, `amount × rate − deduction`, where the
//!   published "parcela a deduzir" makes the result equal to the marginal sum.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::non_negative;
use crate::models::{TaxBracket, TaxTables};

/// Tax owed on `amount` using single-lookup-with-deduction.
///
/// Finds the first bracket whose upper bound is at or above `amount` (or the
/// open-ended one) and applies `amount × rate − deduction`. Amounts at or below
/// zero owe nothing. If `amount` is above every bounded bracket of a table
/// without an open one, the top bracket is used.
pub fn bracket_tax(
    amount: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let Some(bracket) = brackets
        .iter()
        .find(|b| b.covers(amount))
        .or_else(|| brackets.last())
    else {
        return Decimal::ZERO;
    };

    non_negative(amount * bracket.rate - bracket.deduction)
}

/// Employee INSS contribution on a monthly salary.
///
/// Walks the brackets accumulating `min(ceiling − previous ceiling, remaining) × rate`
/// until the salary is exhausted. Salary above the last ceiling contributes nothing.
pub fn calculate_inss(
    salary: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    if salary < Decimal::ZERO {
        warn!(salary = %salary, "Negative salary; INSS is zero");
    }

    let mut remaining = salary;
    let mut previous_ceiling = Decimal::ZERO;
    let mut contribution = Decimal::ZERO;

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }
        let slice = match bracket.upper_bound {
            Some(ceiling) => (ceiling - previous_ceiling).min(remaining),
            None => remaining,
        };
        contribution += slice * bracket.rate;
        remaining -= slice;
        previous_ceiling = bracket.upper_bound.unwrap_or(previous_ceiling);
    }

    contribution
}

/// Monthly IRRF on `taxable_base` (gross minus INSS minus alimony).
///
/// The fixed per-dependent deduction is subtracted first and the base is
/// floored at zero before the bracket lookup.
pub fn calculate_irrf(
    taxable_base: Decimal,
    dependents: u32,
    tables: &TaxTables,
) -> Decimal {
    let dependents_deduction = tables.irrf_dependent_deduction * Decimal::from(dependents);
    let base = non_negative(taxable_base - dependents_deduction);

    bracket_tax(base, &tables.irrf)
}

/// Exclusive withholding on a PLR (profit-sharing) payment.
pub fn calculate_plr_tax(
    plr: Decimal,
    tables: &TaxTables,
) -> Decimal {
    bracket_tax(plr, &tables.plr)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;
    use crate::tables;

    /// Slice-by-slice marginal sum, the definition the single-lookup tables must match.
    fn brute_force(
        amount: Decimal,
        brackets: &[TaxBracket],
    ) -> Decimal {
        let mut floor = Decimal::ZERO;
        let mut tax = Decimal::ZERO;
        for bracket in brackets {
            let top = bracket.upper_bound.map_or(amount, |b| b.min(amount));
            if top > floor {
                tax += (top - floor) * bracket.rate;
            }
            floor = bracket.upper_bound.unwrap_or(amount);
            if floor >= amount {
                break;
            }
        }
        tax
    }

    fn salary_grid() -> impl Iterator<Item = Decimal> {
        (0..=240).map(|i| Decimal::from(i) * dec!(50.25))
    }

    // =========================================================================
    // bracket_tax tests
    // =========================================================================

    #[test]
    fn bracket_tax_is_zero_for_non_positive_amounts() {
        let tables = tables::current();

        assert_eq!(bracket_tax(dec!(0), &tables.irrf), dec!(0));
        assert_eq!(bracket_tax(dec!(-500), &tables.irrf), dec!(0));
    }

    #[test]
    fn bracket_tax_is_zero_in_exempt_bracket() {
        let tables = tables::current();

        assert_eq!(bracket_tax(dec!(2428.80), &tables.irrf), dec!(0));
    }

    #[test]
    fn bracket_tax_uses_bracket_at_upper_bound() {
        let tables = tables::current();

        // 3751.05 × 0.15 − 394.16
        assert_eq!(bracket_tax(dec!(3751.05), &tables.irrf), dec!(168.4975));
    }

    #[test]
    fn bracket_tax_uses_open_bracket_for_high_amounts() {
        let tables = tables::current();

        // 10000 × 0.275 − 908.73
        assert_eq!(bracket_tax(dec!(10000), &tables.irrf), dec!(1841.27));
    }

    #[test]
    fn bracket_tax_with_empty_table_is_zero() {
        assert_eq!(bracket_tax(dec!(10000), &[]), dec!(0));
    }

    #[test]
    fn bracket_tax_is_monotonic_for_every_table() {
        let tables = tables::current();

        for brackets in [&tables.irrf, &tables.plr] {
            let mut previous = Decimal::ZERO;
            for amount in (0..=600).map(|i| Decimal::from(i) * dec!(37.5)) {
                let tax = bracket_tax(amount, brackets);
                assert!(tax >= previous, "tax dropped at {amount}");
                previous = tax;
            }
        }
    }

    #[test]
    fn irrf_single_lookup_matches_brute_force_within_a_cent() {
        let tables = tables::current();

        for amount in salary_grid() {
            let diff = (bracket_tax(amount, &tables.irrf) - brute_force(amount, &tables.irrf)).abs();
            assert!(diff < dec!(0.01), "amount {amount}: diff {diff}");
        }
    }

    #[test]
    fn plr_single_lookup_matches_brute_force_within_a_cent() {
        let tables = tables::current();

        for amount in (0..=100).map(|i| Decimal::from(i) * dec!(250)) {
            let diff = (bracket_tax(amount, &tables.plr) - brute_force(amount, &tables.plr)).abs();
            assert!(diff < dec!(0.01), "amount {amount}: diff {diff}");
        }
    }

    // =========================================================================
    // calculate_inss tests
    // =========================================================================

    #[test]
    fn inss_for_5000() {
        let inss = calculate_inss(dec!(5000), &tables::current().inss);

        assert_eq!(inss, dec!(509.597));
        assert_eq!(round_half_up(inss), dec!(509.60));
    }

    #[test]
    fn inss_is_capped_at_ceiling() {
        let brackets = &tables::current().inss;

        let at_ceiling = calculate_inss(dec!(8157.41), brackets);
        let above = calculate_inss(dec!(10000), brackets);

        assert_eq!(at_ceiling, dec!(951.6344));
        assert_eq!(above, at_ceiling);
        assert_eq!(round_half_up(above), dec!(951.63));
    }

    #[test]
    fn inss_first_bracket_is_flat_rate() {
        let inss = calculate_inss(dec!(1518.00), &tables::current().inss);

        assert_eq!(inss, dec!(113.85));
    }

    #[test]
    fn inss_at_bracket_boundaries_equals_sum_of_full_slices() {
        let brackets = &tables::current().inss;

        let mut floor = Decimal::ZERO;
        let mut expected = Decimal::ZERO;
        for bracket in brackets {
            let ceiling = bracket.upper_bound.expect("INSS brackets are bounded");
            expected += (ceiling - floor) * bracket.rate;
            floor = ceiling;

            assert_eq!(calculate_inss(ceiling, brackets), expected, "ceiling {ceiling}");
        }
    }

    #[test]
    fn inss_matches_brute_force_on_grid() {
        let brackets = &tables::current().inss;

        for salary in salary_grid() {
            assert_eq!(
                calculate_inss(salary, brackets),
                brute_force(salary, brackets),
                "salary {salary}"
            );
        }
    }

    #[test]
    fn inss_is_zero_for_negative_salary() {
        assert_eq!(calculate_inss(dec!(-100), &tables::current().inss), dec!(0));
    }

    // =========================================================================
    // calculate_irrf / calculate_plr_tax tests
    // =========================================================================

    #[test]
    fn irrf_without_dependents() {
        let tables = tables::current();

        let tax = calculate_irrf(dec!(4490.403), 0, tables);

        assert_eq!(round_half_up(tax), dec!(334.85));
    }

    #[test]
    fn irrf_subtracts_dependents_before_lookup() {
        let tables = tables::current();

        // 4490.403 − 2 × 189.59 = 4111.223 → 22.5% bracket
        let tax = calculate_irrf(dec!(4490.403), 2, tables);

        assert_eq!(round_half_up(tax), dec!(249.54));
    }

    #[test]
    fn irrf_base_is_floored_at_zero() {
        let tables = tables::current();

        assert_eq!(calculate_irrf(dec!(300), 5, tables), dec!(0));
    }

    #[test]
    fn plr_tax_in_fifteen_percent_bracket() {
        let tables = tables::current();

        // 12000 × 0.15 − 1317.23
        assert_eq!(calculate_plr_tax(dec!(12000), tables), dec!(482.77));
    }

    #[test]
    fn plr_tax_at_each_published_ceiling() {
        let tables = tables::current();

        assert_eq!(calculate_plr_tax(dec!(9922.28), tables), dec!(171.111));
        assert_eq!(calculate_plr_tax(dec!(13167.00), tables), dec!(657.82));
        assert_eq!(calculate_plr_tax(dec!(16380.38), tables), dec!(1380.8255));
        // 20000 × 0.275 − 3123.78
        assert_eq!(calculate_plr_tax(dec!(20000), tables), dec!(2376.22));
    }

    #[test]
    fn plr_up_to_exemption_is_untaxed() {
        let tables = tables::current();

        assert_eq!(calculate_plr_tax(dec!(7640.80), tables), dec!(0));
    }
}
