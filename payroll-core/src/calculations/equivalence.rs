//! "What gross under one regime pays the same as the other?"
//!
//! - PJ: the total is affine in gross
//!   (`total = (gross + taxable) × (1 − rate) − fixed + non_taxable`), so the
//!   PJ gross for a target is solved in closed form.
//! - CLT: the total is piecewise (IRRF brackets, INSS ceiling, 13th, vacation
//!   and FGTS compound on top), so the CLT gross is found by damped
//!   fixed-point iteration on [`CltCalculator`].
//!
//! The iteration starts at 80% of the target, moves by 80% of the remaining
//! gap each step, and stops once the total is within 0.01% of the target or
//! the guess moves by less than one cent, after at most 10 steps. There is no
//! failure signal: after the cap the best estimate is returned.
//! [`CltEquivalenceSolver::solve`] exposes whether it converged.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::clt::CltCalculator;
use crate::calculations::pj::PjCalculator;
use crate::models::{PjInput, SalaryInput};
use crate::tables;

/// Fraction of the target used as the first guess.
pub const INITIAL_GUESS_FACTOR: Decimal = dec!(0.8);

/// Fraction of the remaining gap applied per step.
pub const DAMPING_FACTOR: Decimal = dec!(0.8);

/// Relative error at which the solver stops (0.01%).
pub const RELATIVE_TOLERANCE: Decimal = dec!(0.0001);

/// Smallest change in the guess worth another step.
pub const MIN_STEP: Decimal = dec!(0.01);

pub const MAX_ITERATIONS: u32 = 10;

/// CLT gross salary whose total matches `target_total`, using `template`
/// for every other field (benefits, dependents, FGTS flag...).
pub fn find_clt_equivalent_for_pj(
    target_total: Decimal,
    template: &SalaryInput,
) -> Decimal {
    CltEquivalenceSolver::new(CltCalculator::new(tables::current()))
        .solve(target_total, template)
        .gross_salary
}

/// PJ gross revenue whose total matches `target_total`, using `template`
/// for the rate, costs and benefits.
pub fn find_pj_equivalent_for_clt(
    target_total: Decimal,
    template: &PjInput,
) -> Decimal {
    pj_gross_for_total(&PjCalculator::new(tables::current()), target_total, template)
}

/// Closed-form inverse of the PJ calculation.
///
/// `gross = (target − non_taxable + fixed_costs) / (1 − rate) − taxable_benefits`.
/// A rate of 100% or more has no inverse; the target itself is returned.
pub fn pj_gross_for_total(
    calculator: &PjCalculator<'_>,
    target_total: Decimal,
    template: &PjInput,
) -> Decimal {
    let resolved = calculator.resolve(template);
    let retained = Decimal::ONE - resolved.tax_rate;
    if retained <= Decimal::ZERO {
        warn!(tax_rate = %resolved.tax_rate, "PJ tax rate leaves nothing to invert");
        return target_total;
    }

    (target_total - resolved.non_taxable_benefits + resolved.fixed_costs()) / retained
        - resolved.taxable_benefits
}

/// Outcome of a CLT equivalence search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equivalence {
    pub gross_salary: Decimal,
    pub iterations: u32,
    pub converged: bool,
    /// `target − total` at the returned gross salary.
    pub residual: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct CltEquivalenceSolver<'a> {
    calculator: CltCalculator<'a>,
}

impl<'a> CltEquivalenceSolver<'a> {
    pub fn new(calculator: CltCalculator<'a>) -> Self {
        Self { calculator }
    }

    /// Searches for the CLT gross whose total is `target_total`.
    pub fn solve(
        &self,
        target_total: Decimal,
        template: &SalaryInput,
    ) -> Equivalence {
        let tolerance = target_total.abs() * RELATIVE_TOLERANCE;
        let mut guess = target_total * INITIAL_GUESS_FACTOR;
        let mut residual = self.residual(target_total, guess, template);

        for iteration in 1..=MAX_ITERATIONS {
            if residual.abs() <= tolerance {
                debug!(iterations = iteration - 1, gross = %guess, "CLT equivalence converged");
                return Equivalence {
                    gross_salary: guess,
                    iterations: iteration - 1,
                    converged: true,
                    residual,
                };
            }

            let step = residual * DAMPING_FACTOR;
            guess += step;
            residual = self.residual(target_total, guess, template);

            if step.abs() < MIN_STEP {
                debug!(iterations = iteration, gross = %guess, "CLT equivalence step below a cent");
                return Equivalence {
                    gross_salary: guess,
                    iterations: iteration,
                    converged: true,
                    residual,
                };
            }
        }

        let converged = residual.abs() <= tolerance;
        if !converged {
            warn!(
                target = %target_total,
                gross = %guess,
                residual = %residual,
                "CLT equivalence did not converge; returning best estimate"
            );
        }
        Equivalence {
            gross_salary: guess,
            iterations: MAX_ITERATIONS,
            converged,
            residual,
        }
    }

    fn residual(
        &self,
        target_total: Decimal,
        gross_salary: Decimal,
        template: &SalaryInput,
    ) -> Decimal {
        let input = SalaryInput {
            gross_salary,
            ..template.clone()
        };
        target_total - self.calculator.calculate(&input).total()
    }
}
