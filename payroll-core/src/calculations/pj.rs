//! Quick PJ (independent contractor) estimate.
//!
//! This is deliberately a flat-rate model for side-by-side comparisons with
//! CLT; the full Simples Nacional treatment lives in
//! [`crate::calculations::simples_nacional`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::models::{PjDeductions, PjInput, PjResult, TaxTables};
use crate::tables;

/// Default monthly accounting fee.
pub const DEFAULT_ACCOUNTING_FEE: Decimal = dec!(189);

/// Default flat tax rate on the taxable amount.
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.10);

/// Computes a [`PjResult`] with the 2025 tables.
pub fn calculate_pj(input: &PjInput) -> PjResult {
    PjCalculator::new(tables::current()).calculate(input)
}

/// Input with every default applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPjInput {
    pub gross_salary: Decimal,
    pub accounting_fee: Decimal,
    pub inss_contribution: Decimal,
    pub tax_rate: Decimal,
    pub other_expenses: Decimal,
    pub taxable_benefits: Decimal,
    pub non_taxable_benefits: Decimal,
}

impl ResolvedPjInput {
    /// Costs that do not depend on revenue.
    pub fn fixed_costs(&self) -> Decimal {
        self.accounting_fee + self.inss_contribution + self.other_expenses
    }
}

/// Calculator for the PJ estimate.
///
/// Defaults for unset fields:
///
/// | Field | Default |
/// |-------|---------|
/// | `accounting_fee` | 189 |
/// | `inss_contribution` | 11% of the reference minimum wage (155.32) |
/// | `tax_rate` | 10% |
/// | everything else | 0 |
#[derive(Debug, Clone, Copy)]
pub struct PjCalculator<'a> {
    tables: &'a TaxTables,
}

impl<'a> PjCalculator<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    pub fn resolve(
        &self,
        input: &PjInput,
    ) -> ResolvedPjInput {
        ResolvedPjInput {
            gross_salary: input.gross_salary,
            accounting_fee: input.accounting_fee.unwrap_or(DEFAULT_ACCOUNTING_FEE),
            inss_contribution: input.inss_contribution.unwrap_or_else(|| {
                self.tables.reference_minimum_wage * self.tables.pj_inss_rate
            }),
            tax_rate: input.tax_rate.unwrap_or(DEFAULT_TAX_RATE),
            other_expenses: input.other_expenses.unwrap_or_default(),
            taxable_benefits: input.taxable_benefits.unwrap_or_default(),
            non_taxable_benefits: input.non_taxable_benefits.unwrap_or_default(),
        }
    }

    pub fn calculate(
        &self,
        input: &PjInput,
    ) -> PjResult {
        let input = self.resolve(input);

        if input.tax_rate < Decimal::ZERO || input.tax_rate >= Decimal::ONE {
            warn!(tax_rate = %input.tax_rate, "PJ tax rate outside [0, 1)");
        }

        let taxable_amount = input.gross_salary + input.taxable_benefits;
        let taxes = taxable_amount * input.tax_rate;
        let deductions = PjDeductions {
            taxes,
            accounting_fee: input.accounting_fee,
            inss_contribution: input.inss_contribution,
            other_expenses: input.other_expenses,
        };
        let net_salary = taxable_amount - taxes - deductions.fixed_costs();

        PjResult {
            gross_salary: input.gross_salary,
            taxable_amount,
            tax_rate: input.tax_rate,
            net_salary,
            deductions,
            taxable_benefits: input.taxable_benefits,
            non_taxable_benefits: input.non_taxable_benefits,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn golden_defaults_5000() {
        let result = calculate_pj(&PjInput::new(dec!(5000)));

        assert_eq!(result.deductions.taxes, dec!(500));
        assert_eq!(result.deductions.accounting_fee, dec!(189));
        assert_eq!(result.deductions.inss_contribution, dec!(155.32));
        assert_eq!(result.net_salary, dec!(4155.68));
        assert_eq!(result.total(), dec!(4155.68));
    }

    #[test]
    fn taxable_benefits_enlarge_the_tax_base() {
        let input = PjInput {
            taxable_benefits: Some(dec!(500)),
            tax_rate: Some(dec!(0.15)),
            accounting_fee: Some(dec!(200)),
            inss_contribution: Some(dec!(300)),
            ..PjInput::new(dec!(5000))
        };

        let result = calculate_pj(&input);

        assert_eq!(result.taxable_amount, dec!(5500));
        assert_eq!(result.deductions.taxes, dec!(825));
        assert_eq!(result.net_salary, dec!(4175));
    }

    #[test]
    fn non_taxable_benefits_are_added_after_tax() {
        let input = PjInput {
            non_taxable_benefits: Some(dec!(700)),
            ..PjInput::new(dec!(5000))
        };

        let result = calculate_pj(&input);

        assert_eq!(result.deductions.taxes, dec!(500));
        assert_eq!(result.net_salary, dec!(4155.68));
        assert_eq!(result.total(), dec!(4855.68));
    }

    #[test]
    fn overrides_replace_defaults() {
        let input = PjInput {
            accounting_fee: Some(dec!(0)),
            inss_contribution: Some(dec!(0)),
            tax_rate: Some(dec!(0.06)),
            other_expenses: Some(dec!(100)),
            ..PjInput::new(dec!(10000))
        };

        let result = calculate_pj(&input);

        assert_eq!(result.net_salary, dec!(9300));
    }

    #[test]
    fn resolve_uses_reference_minimum_wage() {
        let tables = TaxTables {
            reference_minimum_wage: dec!(1518),
            ..TaxTables::y2025()
        };

        let resolved = PjCalculator::new(&tables).resolve(&PjInput::new(dec!(5000)));

        assert_eq!(resolved.inss_contribution, dec!(166.98));
        assert_eq!(resolved.fixed_costs(), dec!(355.98));
    }
}
