//! CLT (salaried employee) net compensation.
//!
//! # Calculation Order
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | INSS on gross salary (cumulative brackets) |
//! | 2    | IRRF base: gross − INSS − alimony |
//! | 3    | IRRF with the per-dependent deduction |
//! | 4    | Transport deduction: smaller of 6% of gross or the allowance |
//! | 5    | Net salary: gross − INSS − IRRF − transport − other expenses − alimony |
//! | 6    | FGTS: 8% of gross, plus 8% of the monthly 13th and vacation accruals |
//! | 7    | 13th salary (net / 12) and vacation bonus (net / 36) |
//! | 8    | Severance estimate: 40% of FGTS accrued over the tenure, per month |
//! | 9    | PLR taxed on its own table, net amortized over 12 months |
//! | 10   | Benefits: allowances + FGTS (if included) + PLR + 13th + vacation |
//! | 11   | Total: net salary + benefits |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::{calculate_clt, common::round_half_up};
//! use payroll_core::SalaryInput;
//!
//! let input = SalaryInput {
//!     include_fgts: true,
//!     ..SalaryInput::new(dec!(5000))
//! };
//! let result = calculate_clt(&input);
//!
//! assert_eq!(round_half_up(result.deductions.inss), dec!(509.60));
//! assert_eq!(round_half_up(result.deductions.income_tax), dec!(334.85));
//! assert_eq!(round_half_up(result.net_salary), dec!(4155.55));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::calculations::common::{MONTHS_PER_YEAR, monthly};
use crate::calculations::progressive::{calculate_inss, calculate_irrf, calculate_plr_tax};
use crate::models::{
    CltBenefits, CltDeductions, CltResult, FgtsBreakdown, ResolvedSalaryInput, SalaryInput,
    TaxTables,
};
use crate::tables;

/// Largest share of gross salary the employer may withhold for transport.
const TRANSPORT_DEDUCTION_CAP: Decimal = dec!(0.06);

/// Monthly FGTS deposit rate.
const FGTS_RATE: Decimal = dec!(0.08);

/// Fine on the FGTS balance paid on dismissal without cause.
const FGTS_SEVERANCE_FINE: Decimal = dec!(0.40);

/// The constitutional one-third vacation bonus divisor.
const VACATION_DIVISOR: Decimal = dec!(3);

/// Computes [`SalaryInput`] into a [`CltResult`] with the 2025 tables.
pub fn calculate_clt(input: &SalaryInput) -> CltResult {
    CltCalculator::new(tables::current()).calculate(input)
}

/// Calculator for CLT compensation against a given set of tables.
#[derive(Debug, Clone, Copy)]
pub struct CltCalculator<'a> {
    tables: &'a TaxTables,
}

impl<'a> CltCalculator<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a TaxTables {
        self.tables
    }

    /// Runs the full calculation. Unset optional inputs count as zero.
    pub fn calculate(
        &self,
        input: &SalaryInput,
    ) -> CltResult {
        let input = input.resolve();

        if input.gross_salary < Decimal::ZERO {
            warn!(
                gross_salary = %input.gross_salary,
                "Negative gross salary; taxes will be zero"
            );
        }

        // Steps 1-3
        let inss = calculate_inss(input.gross_salary, &self.tables.inss);
        let income_tax = self.income_tax(&input, inss);

        // Step 4
        let transport = self.transport_deduction(input.gross_salary, input.transport_allowance);

        // Step 5
        let net_salary = input.gross_salary
            - inss
            - income_tax
            - transport
            - input.other_expenses
            - input.alimony;

        // Steps 6-8
        let fgts = self.fgts(input.gross_salary);
        let thirteenth_salary = monthly(net_salary);
        let vacation_bonus = monthly(net_salary / VACATION_DIVISOR);
        let severance_estimate = self.severance_estimate(fgts.total_monthly, input.years_at_company);

        // Step 9
        let plr_tax = calculate_plr_tax(input.plr, self.tables);
        let plr_net_monthly = monthly(input.plr - plr_tax);

        // Steps 10-11 live on CltResult so the totals cannot drift from their parts.
        CltResult {
            gross_salary: input.gross_salary,
            net_salary,
            deductions: CltDeductions {
                inss,
                income_tax,
                transport,
                plr_tax,
                other_expenses: input.other_expenses,
                alimony: input.alimony,
            },
            detailed_benefits: CltBenefits {
                meal_allowance: input.meal_allowance,
                transport_allowance: input.transport_allowance,
                health_insurance: input.health_insurance,
                other_benefits: input.other_benefits,
                fgts,
                thirteenth_salary,
                vacation_bonus,
                severance_estimate,
                plr_net_monthly,
            },
            include_fgts: input.include_fgts,
        }
    }

    /// IRRF on gross minus INSS minus alimony, with dependents.
    fn income_tax(
        &self,
        input: &ResolvedSalaryInput,
        inss: Decimal,
    ) -> Decimal {
        let taxable_base = input.gross_salary - inss - input.alimony;
        calculate_irrf(taxable_base, input.dependents, self.tables)
    }

    /// Employee share of the transport allowance, capped at 6% of gross.
    fn transport_deduction(
        &self,
        gross_salary: Decimal,
        transport_allowance: Decimal,
    ) -> Decimal {
        if transport_allowance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (gross_salary * TRANSPORT_DEDUCTION_CAP).min(transport_allowance)
    }

    fn fgts(
        &self,
        gross_salary: Decimal,
    ) -> FgtsBreakdown {
        let monthly_deposit = gross_salary * FGTS_RATE;
        let thirteenth = monthly(gross_salary) * FGTS_RATE;
        let vacation = monthly(gross_salary / VACATION_DIVISOR) * FGTS_RATE;

        FgtsBreakdown {
            monthly: monthly_deposit,
            thirteenth,
            vacation,
            total_monthly: monthly_deposit + thirteenth + vacation,
        }
    }

    /// Projected FGTS fine for the tenure, spread over twelve months.
    fn severance_estimate(
        &self,
        total_monthly_fgts: Decimal,
        years_at_company: Decimal,
    ) -> Decimal {
        if years_at_company <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let balance = total_monthly_fgts * MONTHS_PER_YEAR * years_at_company;
        monthly(balance * FGTS_SEVERANCE_FINE)
    }
}
