//! Built-in legal tables.
//!
//! Each tax year lives in its own module and only contributes data; the
//! calculators in [`crate::calculations`] take a [`TaxTables`] reference and
//! never embed rates themselves.

mod y2025;

use std::sync::LazyLock;

use crate::models::TaxTables;

static CURRENT: LazyLock<TaxTables> = LazyLock::new(TaxTables::y2025);

/// The most recent built-in table set, shared by the free-function
/// calculators.
pub fn current() -> &'static TaxTables {
    &CURRENT
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    /// Brute-force marginal tax: sums `slice × rate` across every bracket
    /// below `amount`.
    fn marginal_sum(
        amount: Decimal,
        brackets: &[crate::models::TaxBracket],
    ) -> Decimal {
        let mut floor = Decimal::ZERO;
        let mut tax = Decimal::ZERO;
        for bracket in brackets {
            let ceiling = bracket.upper_bound.unwrap_or(Decimal::MAX).min(amount);
            if ceiling > floor {
                tax += (ceiling - floor) * bracket.rate;
            }
            match bracket.upper_bound {
                Some(bound) if bound < amount => floor = bound,
                _ => break,
            }
        }
        tax
    }

    #[test]
    fn current_is_2025() {
        assert_eq!(current().year, 2025);
    }

    #[test]
    fn plr_rows_are_the_published_2025_table() {
        let rows: Vec<_> = current()
            .plr
            .iter()
            .map(|b| (b.upper_bound, b.rate, b.deduction))
            .collect();

        assert_eq!(
            rows,
            vec![
                (Some(dec!(7640.80)), dec!(0), dec!(0)),
                (Some(dec!(9922.28)), dec!(0.075), dec!(573.06)),
                (Some(dec!(13167.00)), dec!(0.15), dec!(1317.23)),
                (Some(dec!(16380.38)), dec!(0.225), dec!(2304.76)),
                (None, dec!(0.275), dec!(3123.78)),
            ]
        );
    }

    #[test]
    fn plr_deductions_match_marginal_sum_within_a_cent() {
        let tables = current();

        for bracket in &tables.plr {
            let bound = bracket.upper_bound.unwrap_or(dec!(30000));
            let single = bound * bracket.rate - bracket.deduction;
            let diff = (single - marginal_sum(bound, &tables.plr)).abs();

            assert!(diff < dec!(0.01), "bound {bound}: diff {diff}");
        }
    }

    #[test]
    fn irrf_deductions_match_marginal_sum_within_a_cent() {
        let tables = current();

        for bracket in &tables.irrf {
            let bound = bracket.upper_bound.unwrap_or(dec!(20000));
            let single = bound * bracket.rate - bracket.deduction;
            let diff = (single - marginal_sum(bound, &tables.irrf)).abs();

            assert!(diff < dec!(0.01), "bound {bound}: diff {diff}");
        }
    }
}
