use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Workplace accident risk grade, which sets the RAT contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn rat_rate(&self) -> Decimal {
        match self {
            Self::Low => dec!(0.01),
            Self::Medium => dec!(0.02),
            Self::High => dec!(0.03),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "1" => Some(Self::Low),
            "medium" | "2" => Some(Self::Medium),
            "high" | "3" => Some(Self::High),
            _ => None,
        }
    }
}

/// Sector of the employer, which sets the "Sistema S" contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndustryType {
    #[default]
    Services,
    Commerce,
    Industry,
}

impl IndustryType {
    pub fn system_s_rate(&self) -> Decimal {
        match self {
            Self::Services => dec!(0.055),
            Self::Commerce => dec!(0.058),
            Self::Industry => dec!(0.06),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "services" => Some(Self::Services),
            "commerce" => Some(Self::Commerce),
            "industry" => Some(Self::Industry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCostOptions {
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub industry_type: IndustryType,
}

/// Employer contributions, applied to gross salary plus provisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    pub inss: Decimal,
    pub fgts: Decimal,
    pub rat: Decimal,
    pub system_s: Decimal,
    pub total: Decimal,
}

/// Monthly accruals for 13th salary and vacation (with its one-third bonus).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerProvisions {
    pub thirteenth_salary: Decimal,
    pub vacation: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerBenefitCosts {
    pub meal_allowance: Decimal,
    /// Transport allowance minus the employee's payroll deduction.
    pub transport_allowance: Decimal,
    pub health_insurance: Decimal,
    pub other_benefits: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCostResult {
    pub gross_salary: Decimal,
    pub options: EmployerCostOptions,
    pub contributions: EmployerContributions,
    pub provisions: EmployerProvisions,
    pub benefits: EmployerBenefitCosts,
    pub monthly_total: Decimal,
    pub annual_total: Decimal,
    /// `monthly_total / gross_salary`, or zero for a zero salary.
    pub cost_multiplier: Decimal,
}
