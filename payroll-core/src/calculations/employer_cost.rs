//! Monthly cost of a CLT employee to the employer.
//!
//! | Component | Base | Rate |
//! |-----------|------|------|
//! | INSS (employer share) | gross + provisions | 20% |
//! | FGTS | gross + provisions | 8% |
//! | RAT | gross + provisions | 1%, 2% or 3% by [`RiskLevel`](crate::RiskLevel) |
//! | Sistema S | gross + provisions | 5.5%, 5.8% or 6% by [`IndustryType`](crate::IndustryType) |
//!
//! Provisions accrue the 13th salary (gross / 12) and vacation with its
//! one-third bonus ((gross + gross / 3) / 12).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::calculations::common::{MONTHS_PER_YEAR, monthly};
use crate::models::{
    CltResult, EmployerBenefitCosts, EmployerContributions, EmployerCostOptions,
    EmployerCostResult, EmployerProvisions,
};

const EMPLOYER_INSS_RATE: Decimal = dec!(0.20);
const EMPLOYER_FGTS_RATE: Decimal = dec!(0.08);

/// Builds the employer's view of an already computed CLT result.
pub fn calculate_employer_cost(
    clt: &CltResult,
    options: &EmployerCostOptions,
) -> EmployerCostResult {
    let gross_salary = clt.gross_salary;
    if gross_salary < Decimal::ZERO {
        warn!(gross_salary = %gross_salary, "Negative gross salary in employer cost");
    }

    let provisions = provisions(gross_salary);
    let contributions = contributions(gross_salary + provisions.total, options);
    let benefits = benefit_costs(clt);

    let monthly_total = gross_salary + provisions.total + contributions.total + benefits.total;
    let cost_multiplier = if gross_salary.is_zero() {
        Decimal::ZERO
    } else {
        monthly_total / gross_salary
    };

    EmployerCostResult {
        gross_salary,
        options: *options,
        contributions,
        provisions,
        benefits,
        monthly_total,
        annual_total: monthly_total * MONTHS_PER_YEAR,
        cost_multiplier,
    }
}

fn provisions(gross_salary: Decimal) -> EmployerProvisions {
    let thirteenth_salary = monthly(gross_salary);
    let vacation = monthly(gross_salary + gross_salary / dec!(3));

    EmployerProvisions {
        thirteenth_salary,
        vacation,
        total: thirteenth_salary + vacation,
    }
}

fn contributions(
    base: Decimal,
    options: &EmployerCostOptions,
) -> EmployerContributions {
    let inss = base * EMPLOYER_INSS_RATE;
    let fgts = base * EMPLOYER_FGTS_RATE;
    let rat = base * options.risk_level.rat_rate();
    let system_s = base * options.industry_type.system_s_rate();

    EmployerContributions {
        inss,
        fgts,
        rat,
        system_s,
        total: inss + fgts + rat + system_s,
    }
}

fn benefit_costs(clt: &CltResult) -> EmployerBenefitCosts {
    let b = &clt.detailed_benefits;
    let transport_allowance = b.transport_allowance - clt.deductions.transport;

    EmployerBenefitCosts {
        meal_allowance: b.meal_allowance,
        transport_allowance,
        health_insurance: b.health_insurance,
        other_benefits: b.other_benefits,
        total: b.meal_allowance + transport_allowance + b.health_insurance + b.other_benefits,
    }
}
