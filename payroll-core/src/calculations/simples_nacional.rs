//! Simples Nacional tax for a PJ company, plus the partner's personal taxes.
//!
//! # Steps
//!
//! 1. Fator R = annual payroll (pro-labore + other payroll, × 12) / annual revenue.
//! 2. Annex: Anexo III for natural Anexo III activities; for software, Anexo III
//!    when Fator R reaches the threshold (28%), otherwise Anexo V.
//! 3. Revenue bracket and effective rate `(RBT12 × Aliq − PD) / RBT12`.
//! 4. Domestic / export split. Export revenue is immune from COFINS, PIS/PASEP
//!    and ISS; the forgone amounts are reported as exemptions.
//! 5. INSS and IRPF on the pro-labore (no dependents), annualized.
//! 6. Totals and the monthly income picture: net pro-labore plus tax-free
//!    profit distribution.
//!
//! Revenue at or below zero, or above the last bracket (R$ 4.8 million),
//! cannot be computed and yields `None`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calculations::common::{MONTHS_PER_YEAR, monthly, non_negative};
use crate::calculations::progressive::{calculate_inss, calculate_irrf};
use crate::models::{
    ActivityType, MonthlyIncome, PjTaxCalculationResults, PjTaxFormData, ProLaboreTaxes,
    SimplesAnnex, SimplesBracket, TaxComponents, TaxTables,
};
use crate::tables;

const ONE_HUNDRED: Decimal = dec!(100);

/// Computes the Simples Nacional breakdown with the 2025 tables.
pub fn calculate_pj_taxes(form: &PjTaxFormData) -> Option<PjTaxCalculationResults> {
    SimplesNacionalCalculator::new(tables::current()).calculate(form)
}

/// Fator R: annual payroll over annual revenue. Zero when revenue is not positive.
pub fn fator_r(
    monthly_pro_labore: Decimal,
    other_monthly_payroll: Decimal,
    annual_revenue: Decimal,
) -> Decimal {
    if annual_revenue <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (monthly_pro_labore + other_monthly_payroll) * MONTHS_PER_YEAR / annual_revenue
}

#[derive(Debug, Clone, Copy)]
pub struct SimplesNacionalCalculator<'a> {
    tables: &'a TaxTables,
}

impl<'a> SimplesNacionalCalculator<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Picks the annex for an activity given its Fator R.
    pub fn select_annex(
        &self,
        activity_type: ActivityType,
        fator_r: Decimal,
    ) -> SimplesAnnex {
        match activity_type {
            ActivityType::NaturalAnexoIII => SimplesAnnex::AnexoIII,
            ActivityType::SoftwareFatorR if fator_r >= self.tables.fator_r_threshold => {
                SimplesAnnex::AnexoIII
            }
            ActivityType::SoftwareFatorR => SimplesAnnex::AnexoV,
        }
    }

    /// Finds the bracket for `annual_revenue` and its one-based position.
    pub fn find_bracket(
        &self,
        annex: SimplesAnnex,
        annual_revenue: Decimal,
    ) -> Option<(usize, &'a SimplesBracket)> {
        let brackets = match annex {
            SimplesAnnex::AnexoIII => &self.tables.anexo_iii,
            SimplesAnnex::AnexoV => &self.tables.anexo_v,
        };
        brackets
            .iter()
            .enumerate()
            .find(|(_, b)| annual_revenue <= b.max_revenue)
            .map(|(index, bracket)| (index + 1, bracket))
    }

    pub fn calculate(
        &self,
        form: &PjTaxFormData,
    ) -> Option<PjTaxCalculationResults> {
        let revenue = form.annual_revenue;
        if revenue <= Decimal::ZERO {
            warn!(annual_revenue = %revenue, "Annual revenue must be positive");
            return None;
        }

        // Steps 1-3
        let fator_r = fator_r(form.monthly_pro_labore, form.other_monthly_payroll, revenue);
        let annex = self.select_annex(form.activity_type, fator_r);
        let Some((bracket_number, bracket)) = self.find_bracket(annex, revenue) else {
            warn!(
                annual_revenue = %revenue,
                annex = annex.as_str(),
                "Annual revenue above the Simples Nacional limit"
            );
            return None;
        };
        let effective_rate = bracket.effective_rate(revenue);
        debug!(
            fator_r = %fator_r,
            annex = annex.as_str(),
            bracket = bracket_number,
            effective_rate = %effective_rate,
            "Simples Nacional regime selected"
        );

        // Step 4
        let export_percentage = form.export_percentage.clamp(Decimal::ZERO, ONE_HUNDRED);
        let export_revenue = revenue * export_percentage / ONE_HUNDRED;
        let domestic_revenue = revenue - export_revenue;

        let domestic_taxes =
            TaxComponents::split(domestic_revenue * effective_rate, &bracket.component_rates);
        let export_unexempted =
            TaxComponents::split(export_revenue * effective_rate, &bracket.component_rates);
        let export_taxes = export_unexempted.export_exempt();
        let exemptions = export_unexempted - export_taxes;
        let total_taxes = domestic_taxes + export_taxes;
        let corporate_tax = total_taxes.total();

        // Step 5
        let pro_labore = self.pro_labore_taxes(form.monthly_pro_labore);

        // Step 6
        let total_annual_tax = corporate_tax + pro_labore.annual_total;
        let annual_payroll = (form.monthly_pro_labore + form.other_monthly_payroll) * MONTHS_PER_YEAR;
        let net_pro_labore =
            pro_labore.monthly_gross - pro_labore.monthly_inss - pro_labore.monthly_irpf;
        let profit_distribution = monthly(non_negative(revenue - corporate_tax - annual_payroll));

        Some(PjTaxCalculationResults {
            annual_revenue: revenue,
            domestic_revenue,
            export_revenue,
            export_percentage,
            fator_r,
            annex,
            bracket: bracket_number,
            nominal_rate: bracket.nominal_rate,
            effective_rate,
            domestic_taxes,
            export_taxes,
            total_taxes,
            exemptions,
            corporate_tax,
            pro_labore,
            total_annual_tax,
            effective_total_rate: total_annual_tax / revenue,
            monthly: MonthlyIncome {
                net_pro_labore,
                profit_distribution,
                total_net_income: net_pro_labore + profit_distribution,
            },
        })
    }

    /// INSS and IRPF withheld on the pro-labore, as if it were a salary with
    /// no dependents.
    fn pro_labore_taxes(
        &self,
        monthly_pro_labore: Decimal,
    ) -> ProLaboreTaxes {
        let monthly_inss = calculate_inss(monthly_pro_labore, &self.tables.inss);
        let monthly_irpf = calculate_irrf(monthly_pro_labore - monthly_inss, 0, self.tables);
        let annual_inss = monthly_inss * MONTHS_PER_YEAR;
        let annual_irpf = monthly_irpf * MONTHS_PER_YEAR;

        ProLaboreTaxes {
            monthly_gross: monthly_pro_labore,
            monthly_inss,
            monthly_irpf,
            annual_inss,
            annual_irpf,
            annual_total: annual_inss + annual_irpf,
        }
    }
}
