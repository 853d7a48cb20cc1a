use std::ops::{Add, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ComponentRates;

/// Company activity, which decides the Simples Nacional annex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityType {
    /// Software development and similar services: Anexo III or V depending on Fator R.
    #[serde(rename = "SOFTWARE_FACTOR_R")]
    SoftwareFatorR,
    /// Activities taxed under Anexo III regardless of payroll.
    #[serde(rename = "NATURAL_ANEXO_III")]
    NaturalAnexoIII,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoftwareFatorR => "SOFTWARE_FACTOR_R",
            Self::NaturalAnexoIII => "NATURAL_ANEXO_III",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOFTWARE_FACTOR_R" | "SOFTWARE" => Some(Self::SoftwareFatorR),
            "NATURAL_ANEXO_III" | "ANEXO_III" => Some(Self::NaturalAnexoIII),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimplesAnnex {
    #[serde(rename = "III")]
    AnexoIII,
    #[serde(rename = "V")]
    AnexoV,
}

impl SimplesAnnex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnexoIII => "III",
            Self::AnexoV => "V",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "III" | "ANEXO_III" => Some(Self::AnexoIII),
            "V" | "ANEXO_V" => Some(Self::AnexoV),
            _ => None,
        }
    }
}

/// Input for the Simples Nacional calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjTaxFormData {
    /// Gross revenue of the last twelve months (RBT12).
    pub annual_revenue: Decimal,
    pub monthly_pro_labore: Decimal,
    /// Other monthly payroll costs counted in Fator R.
    pub other_monthly_payroll: Decimal,
    /// Share of revenue from exports, in percent. Clamped to `[0, 100]`.
    pub export_percentage: Decimal,
    pub activity_type: ActivityType,
}

/// Simples Nacional tax split into its constituent taxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponents {
    pub irpj: Decimal,
    pub csll: Decimal,
    pub cofins: Decimal,
    pub pis_pasep: Decimal,
    pub cpp: Decimal,
    pub iss: Decimal,
}

impl TaxComponents {
    /// Splits `tax` according to `rates`.
    pub fn split(
        tax: Decimal,
        rates: &ComponentRates,
    ) -> Self {
        Self {
            irpj: tax * rates.irpj,
            csll: tax * rates.csll,
            cofins: tax * rates.cofins,
            pis_pasep: tax * rates.pis_pasep,
            cpp: tax * rates.cpp,
            iss: tax * rates.iss,
        }
    }

    /// Drops the taxes export revenue is immune from (COFINS, PIS/PASEP, ISS).
    pub fn export_exempt(self) -> Self {
        Self {
            cofins: Decimal::ZERO,
            pis_pasep: Decimal::ZERO,
            iss: Decimal::ZERO,
            ..self
        }
    }

    pub fn total(&self) -> Decimal {
        self.irpj + self.csll + self.cofins + self.pis_pasep + self.cpp + self.iss
    }
}

impl Add for TaxComponents {
    type Output = Self;

    fn add(
        self,
        rhs: Self,
    ) -> Self {
        Self {
            irpj: self.irpj + rhs.irpj,
            csll: self.csll + rhs.csll,
            cofins: self.cofins + rhs.cofins,
            pis_pasep: self.pis_pasep + rhs.pis_pasep,
            cpp: self.cpp + rhs.cpp,
            iss: self.iss + rhs.iss,
        }
    }
}

impl Sub for TaxComponents {
    type Output = Self;

    fn sub(
        self,
        rhs: Self,
    ) -> Self {
        Self {
            irpj: self.irpj - rhs.irpj,
            csll: self.csll - rhs.csll,
            cofins: self.cofins - rhs.cofins,
            pis_pasep: self.pis_pasep - rhs.pis_pasep,
            cpp: self.cpp - rhs.cpp,
            iss: self.iss - rhs.iss,
        }
    }
}

/// Personal taxes on the partner's pro-labore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProLaboreTaxes {
    pub monthly_gross: Decimal,
    pub monthly_inss: Decimal,
    pub monthly_irpf: Decimal,
    pub annual_inss: Decimal,
    pub annual_irpf: Decimal,
    pub annual_total: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub net_pro_labore: Decimal,
    /// Tax-free distribution of the profit left after payroll and DAS.
    pub profit_distribution: Decimal,
    pub total_net_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjTaxCalculationResults {
    pub annual_revenue: Decimal,
    pub domestic_revenue: Decimal,
    pub export_revenue: Decimal,
    pub export_percentage: Decimal,
    pub fator_r: Decimal,
    pub annex: SimplesAnnex,
    /// One-based bracket ("faixa") number within the annex.
    pub bracket: usize,
    pub nominal_rate: Decimal,
    pub effective_rate: Decimal,
    pub domestic_taxes: TaxComponents,
    pub export_taxes: TaxComponents,
    pub total_taxes: TaxComponents,
    /// Tax export revenue would have paid without the exemption.
    pub exemptions: TaxComponents,
    pub corporate_tax: Decimal,
    pub pro_labore: ProLaboreTaxes,
    pub total_annual_tax: Decimal,
    pub effective_total_rate: Decimal,
    pub monthly: MonthlyIncome,
}
