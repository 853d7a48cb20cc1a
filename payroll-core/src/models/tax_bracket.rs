use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive tax table.
///
/// `upper_bound` of `None` marks the open-ended top bracket. For single-lookup
/// tables (IRRF, PLR) `deduction` is the legally published "parcela a deduzir";
/// for the cumulative INSS table it is unused and left at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
    pub label: Option<Cow<'static, str>>,
}

impl TaxBracket {
    /// Returns `true` when `amount` falls at or below this bracket's ceiling.
    pub fn covers(
        &self,
        amount: Decimal,
    ) -> bool {
        self.upper_bound.is_none_or(|bound| amount <= bound)
    }
}

/// Share of the Simples Nacional nominal tax assigned to each federal,
/// social security and municipal tax.
///
/// The values are fractions of the *tax amount*, not of revenue, and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRates {
    pub irpj: Decimal,
    pub csll: Decimal,
    pub cofins: Decimal,
    pub pis_pasep: Decimal,
    pub cpp: Decimal,
    pub iss: Decimal,
}

impl ComponentRates {
    pub fn sum(&self) -> Decimal {
        self.irpj + self.csll + self.cofins + self.pis_pasep + self.cpp + self.iss
    }
}

/// Revenue bracket ("faixa") of a Simples Nacional annex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplesBracket {
    /// Upper limit of trailing-twelve-month gross revenue for this bracket.
    pub max_revenue: Decimal,
    pub nominal_rate: Decimal,
    pub deduction: Decimal,
    pub component_rates: ComponentRates,
}

impl SimplesBracket {
    /// Effective rate for `annual_revenue`: `(RBT12 × Aliq − PD) / RBT12`.
    ///
    /// Callers must ensure `annual_revenue` is positive.
    pub fn effective_rate(
        &self,
        annual_revenue: Decimal,
    ) -> Decimal {
        (annual_revenue * self.nominal_rate - self.deduction) / annual_revenue
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn covers_includes_upper_bound() {
        let bracket = TaxBracket {
            upper_bound: Some(dec!(1518.00)),
            rate: dec!(0.075),
            deduction: dec!(0),
            label: None,
        };

        assert!(bracket.covers(dec!(1518.00)));
        assert!(!bracket.covers(dec!(1518.01)));
    }

    #[test]
    fn open_bracket_covers_everything() {
        let bracket = TaxBracket {
            upper_bound: None,
            rate: dec!(0.275),
            deduction: dec!(908.73),
            label: None,
        };

        assert!(bracket.covers(dec!(1000000000)));
    }

    #[test]
    fn effective_rate_applies_deduction() {
        let bracket = SimplesBracket {
            max_revenue: dec!(360000),
            nominal_rate: dec!(0.112),
            deduction: dec!(9360),
            component_rates: ComponentRates {
                irpj: dec!(0.04),
                csll: dec!(0.035),
                cofins: dec!(0.1405),
                pis_pasep: dec!(0.0305),
                cpp: dec!(0.434),
                iss: dec!(0.32),
            },
        };

        // (240000 × 0.112 − 9360) / 240000 = 0.073
        assert_eq!(bracket.effective_rate(dec!(240000)), dec!(0.073));
        assert_eq!(bracket.component_rates.sum(), dec!(1));
    }
}
