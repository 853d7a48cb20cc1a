use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for a CLT (salaried employee) calculation.
///
/// Every optional amount left as `None` contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    pub gross_salary: Decimal,
    pub meal_allowance: Option<Decimal>,
    pub transport_allowance: Option<Decimal>,
    pub health_insurance: Option<Decimal>,
    pub other_benefits: Option<Decimal>,
    pub other_expenses: Option<Decimal>,
    pub years_at_company: Option<Decimal>,
    /// Annual profit-sharing payment.
    pub plr: Option<Decimal>,
    /// Monthly court-ordered alimony; deductible from the IRRF base.
    pub alimony: Option<Decimal>,
    pub dependents: Option<u32>,
    /// Whether the FGTS deposit counts towards `total`. It is reported either way.
    #[serde(default)]
    pub include_fgts: bool,
}

impl SalaryInput {
    pub fn new(gross_salary: Decimal) -> Self {
        Self {
            gross_salary,
            ..Default::default()
        }
    }

    /// Resolves every optional field to its default.
    pub(crate) fn resolve(&self) -> ResolvedSalaryInput {
        ResolvedSalaryInput {
            gross_salary: self.gross_salary,
            meal_allowance: self.meal_allowance.unwrap_or_default(),
            transport_allowance: self.transport_allowance.unwrap_or_default(),
            health_insurance: self.health_insurance.unwrap_or_default(),
            other_benefits: self.other_benefits.unwrap_or_default(),
            other_expenses: self.other_expenses.unwrap_or_default(),
            years_at_company: self.years_at_company.unwrap_or_default(),
            plr: self.plr.unwrap_or_default(),
            alimony: self.alimony.unwrap_or_default(),
            dependents: self.dependents.unwrap_or_default(),
            include_fgts: self.include_fgts,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedSalaryInput {
    pub gross_salary: Decimal,
    pub meal_allowance: Decimal,
    pub transport_allowance: Decimal,
    pub health_insurance: Decimal,
    pub other_benefits: Decimal,
    pub other_expenses: Decimal,
    pub years_at_company: Decimal,
    pub plr: Decimal,
    pub alimony: Decimal,
    pub dependents: u32,
    pub include_fgts: bool,
}

/// Amounts withheld from the CLT gross salary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CltDeductions {
    pub inss: Decimal,
    pub income_tax: Decimal,
    /// Employee share of the transport allowance (at most 6% of gross).
    pub transport: Decimal,
    /// Tax withheld on the annual PLR payment.
    pub plr_tax: Decimal,
    pub other_expenses: Decimal,
    pub alimony: Decimal,
}

/// FGTS deposits, monthly equivalents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FgtsBreakdown {
    pub monthly: Decimal,
    pub thirteenth: Decimal,
    pub vacation: Decimal,
    pub total_monthly: Decimal,
}

/// Monthly equivalents of everything the employee receives on top of the net salary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CltBenefits {
    pub meal_allowance: Decimal,
    pub transport_allowance: Decimal,
    pub health_insurance: Decimal,
    pub other_benefits: Decimal,
    pub fgts: FgtsBreakdown,
    pub thirteenth_salary: Decimal,
    pub vacation_bonus: Decimal,
    /// Projected 40% FGTS fine amortized over twelve months. Not part of `benefits`.
    pub severance_estimate: Decimal,
    pub plr_net_monthly: Decimal,
}

impl CltBenefits {
    pub fn allowances(&self) -> Decimal {
        self.meal_allowance + self.transport_allowance + self.health_insurance + self.other_benefits
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CltResult {
    pub gross_salary: Decimal,
    pub net_salary: Decimal,
    pub deductions: CltDeductions,
    pub detailed_benefits: CltBenefits,
    pub include_fgts: bool,
}

impl CltResult {
    /// Sum of the benefits that count towards [`Self::total`]: allowances,
    /// FGTS (only when included), PLR, 13th salary and vacation bonus.
    pub fn benefits(&self) -> Decimal {
        let b = &self.detailed_benefits;
        let fgts = if self.include_fgts {
            b.fgts.total_monthly
        } else {
            Decimal::ZERO
        };
        b.allowances() + fgts + b.plr_net_monthly + b.thirteenth_salary + b.vacation_bonus
    }

    /// Monthly compensation: net salary plus benefits.
    pub fn total(&self) -> Decimal {
        self.net_salary + self.benefits()
    }
}
