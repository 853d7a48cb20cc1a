use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for the quick PJ (independent contractor) estimate.
///
/// `None` fields take the defaults documented on [`crate::calculations::PjCalculator`]:
/// accounting fee 189, INSS 11% of the reference minimum wage, tax rate 10%.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjInput {
    pub gross_salary: Decimal,
    pub accounting_fee: Option<Decimal>,
    pub inss_contribution: Option<Decimal>,
    /// Flat rate applied to the taxable amount (e.g. `0.10`).
    pub tax_rate: Option<Decimal>,
    pub other_expenses: Option<Decimal>,
    /// Benefits that are paid out but also enlarge the tax base.
    pub taxable_benefits: Option<Decimal>,
    /// Benefits paid out untaxed, after the tax computation.
    pub non_taxable_benefits: Option<Decimal>,
}

impl PjInput {
    pub fn new(gross_salary: Decimal) -> Self {
        Self {
            gross_salary,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjDeductions {
    pub taxes: Decimal,
    pub accounting_fee: Decimal,
    pub inss_contribution: Decimal,
    pub other_expenses: Decimal,
}

impl PjDeductions {
    /// Everything subtracted from the taxable amount other than the tax itself.
    pub fn fixed_costs(&self) -> Decimal {
        self.accounting_fee + self.inss_contribution + self.other_expenses
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjResult {
    pub gross_salary: Decimal,
    pub taxable_amount: Decimal,
    pub tax_rate: Decimal,
    pub net_salary: Decimal,
    pub deductions: PjDeductions,
    pub taxable_benefits: Decimal,
    pub non_taxable_benefits: Decimal,
}

impl PjResult {
    /// Net income plus the untaxed benefits.
    pub fn total(&self) -> Decimal {
        self.net_salary + self.non_taxable_benefits
    }
}
