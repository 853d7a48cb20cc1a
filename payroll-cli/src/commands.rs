//! Subcommand arguments and their execution.
//!
//! Every `run_*` function takes the resolved [`Session`] and returns a JSON
//! value; rendering is left to [`crate::output`].

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use payroll_core::calculations::equivalence::pj_gross_for_total;
use payroll_core::calculations::{
    CltCalculator, CltEquivalenceSolver, PjCalculator, SimplesNacionalCalculator,
    calculate_employer_cost, compare_regimes_with,
};
use payroll_core::{
    ActivityType, CltResult, EmployerCostOptions, IndustryType, PjInput, PjResult, PjTaxFormData,
    RiskLevel, SalaryInput, TaxTables,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::csv_loader;
use crate::utils::parse_decimal;

/// Tables and employer settings shared by every command.
#[derive(Debug, Clone)]
pub struct Session {
    pub tables: TaxTables,
    pub employer: EmployerCostOptions,
}

impl Session {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            tables: config.tax_tables()?,
            employer: config.employer,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            tables: TaxTables::y2025(),
            employer: EmployerCostOptions::default(),
        }
    }
}

fn parse_activity(s: &str) -> Result<ActivityType, String> {
    ActivityType::parse(s)
        .ok_or_else(|| format!("unknown activity '{s}' (expected SOFTWARE_FACTOR_R or NATURAL_ANEXO_III)"))
}

fn parse_risk_level(s: &str) -> Result<RiskLevel, String> {
    RiskLevel::parse(s).ok_or_else(|| format!("unknown risk level '{s}' (expected low, medium or high)"))
}

fn parse_industry(s: &str) -> Result<IndustryType, String> {
    IndustryType::parse(s)
        .ok_or_else(|| format!("unknown industry '{s}' (expected services, commerce or industry)"))
}

// ─── arguments ───────────────────────────────────────────────────────────────

/// CLT fields other than the gross salary.
#[derive(Debug, Clone, Default, Args)]
pub struct CltOptions {
    /// Monthly meal/food allowance
    #[arg(long, value_parser = parse_decimal)]
    pub meal: Option<Decimal>,

    /// Monthly transport allowance (the employee pays up to 6% of gross)
    #[arg(long, value_parser = parse_decimal)]
    pub transport: Option<Decimal>,

    /// Monthly health insurance paid by the employer
    #[arg(long, value_parser = parse_decimal)]
    pub health: Option<Decimal>,

    /// Other monthly benefits
    #[arg(long, value_parser = parse_decimal)]
    pub other_benefits: Option<Decimal>,

    /// Other monthly payroll deductions
    #[arg(long, value_parser = parse_decimal)]
    pub other_expenses: Option<Decimal>,

    /// Years at the company, for the severance estimate
    #[arg(long, value_parser = parse_decimal)]
    pub years: Option<Decimal>,

    /// Annual PLR (profit sharing)
    #[arg(long, value_parser = parse_decimal)]
    pub plr: Option<Decimal>,

    /// Monthly court-ordered alimony
    #[arg(long, value_parser = parse_decimal)]
    pub alimony: Option<Decimal>,

    /// Number of IRRF dependents
    #[arg(long)]
    pub dependents: Option<u32>,

    /// Count FGTS deposits as part of total compensation
    #[arg(long, default_value_t = false)]
    pub fgts: bool,
}

impl CltOptions {
    pub fn to_input(
        &self,
        gross_salary: Decimal,
    ) -> SalaryInput {
        SalaryInput {
            gross_salary,
            meal_allowance: self.meal,
            transport_allowance: self.transport,
            health_insurance: self.health,
            other_benefits: self.other_benefits,
            other_expenses: self.other_expenses,
            years_at_company: self.years,
            plr: self.plr,
            alimony: self.alimony,
            dependents: self.dependents,
            include_fgts: self.fgts,
        }
    }
}

/// PJ fields other than the gross revenue.
#[derive(Debug, Clone, Default, Args)]
pub struct PjOptions {
    /// Monthly accounting fee [default: 189]
    #[arg(long, value_parser = parse_decimal)]
    pub accounting_fee: Option<Decimal>,

    /// Monthly INSS contribution [default: 11% of the reference minimum wage]
    #[arg(long, value_parser = parse_decimal)]
    pub pj_inss: Option<Decimal>,

    /// Flat tax rate as a decimal, e.g. 0.06 [default: 0.10]
    #[arg(long, value_parser = parse_decimal)]
    pub tax_rate: Option<Decimal>,

    /// Other monthly business expenses
    #[arg(long, value_parser = parse_decimal)]
    pub pj_other_expenses: Option<Decimal>,

    /// Monthly benefits that are added to the tax base
    #[arg(long, value_parser = parse_decimal)]
    pub taxable_benefits: Option<Decimal>,

    /// Monthly benefits received tax-free
    #[arg(long, value_parser = parse_decimal)]
    pub non_taxable_benefits: Option<Decimal>,
}

impl PjOptions {
    pub fn to_input(
        &self,
        gross_salary: Decimal,
    ) -> PjInput {
        PjInput {
            gross_salary,
            accounting_fee: self.accounting_fee,
            inss_contribution: self.pj_inss,
            tax_rate: self.tax_rate,
            other_expenses: self.pj_other_expenses,
            taxable_benefits: self.taxable_benefits,
            non_taxable_benefits: self.non_taxable_benefits,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CltArgs {
    /// Monthly gross salary, e.g. 5000 or 5.000,00
    #[arg(long, value_parser = parse_decimal)]
    pub gross: Decimal,

    #[command(flatten)]
    pub options: CltOptions,
}

#[derive(Debug, Clone, Args)]
pub struct PjArgs {
    /// Monthly gross revenue
    #[arg(long, value_parser = parse_decimal)]
    pub gross: Decimal,

    #[command(flatten)]
    pub options: PjOptions,
}

#[derive(Debug, Clone, Args)]
pub struct PjTaxesArgs {
    /// Gross revenue of the last twelve months
    #[arg(long, value_parser = parse_decimal)]
    pub revenue: Decimal,

    /// Monthly pro-labore paid to the partner
    #[arg(long, value_parser = parse_decimal)]
    pub pro_labore: Decimal,

    /// Other monthly payroll counted in Fator R
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub other_payroll: Decimal,

    /// Share of revenue from exports, in percent
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub export_percentage: Decimal,

    /// SOFTWARE_FACTOR_R or NATURAL_ANEXO_III
    #[arg(long, value_parser = parse_activity, default_value = "SOFTWARE_FACTOR_R")]
    pub activity: ActivityType,
}

#[derive(Debug, Clone, Args)]
pub struct EmployerCostArgs {
    #[command(flatten)]
    pub clt: CltArgs,

    /// Workplace risk grade: low, medium or high [default: from config]
    #[arg(long, value_parser = parse_risk_level)]
    pub risk_level: Option<RiskLevel>,

    /// Employer sector: services, commerce or industry [default: from config]
    #[arg(long, value_parser = parse_industry)]
    pub industry: Option<IndustryType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Regime {
    Clt,
    Pj,
}

#[derive(Debug, Clone, Args)]
pub struct EquivalentArgs {
    /// Regime to solve for
    #[arg(long, value_enum)]
    pub to: Regime,

    /// Monthly total compensation to match
    #[arg(long, value_parser = parse_decimal, allow_hyphen_values = true)]
    pub target: Decimal,

    #[command(flatten)]
    pub clt: CltOptions,

    #[command(flatten)]
    pub pj: PjOptions,
}

#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    /// CLT monthly gross salary
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub clt_gross: Decimal,

    /// PJ monthly gross revenue
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub pj_gross: Decimal,

    #[command(flatten)]
    pub clt: CltOptions,

    #[command(flatten)]
    pub pj: PjOptions,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// CSV file with one CLT salary per row
    #[arg(short, long)]
    pub file: PathBuf,
}

// ─── reports ─────────────────────────────────────────────────────────────────

/// A CLT result with its derived totals spelled out.
#[derive(Debug, Clone, Serialize)]
pub struct CltReport {
    #[serde(flatten)]
    pub result: CltResult,
    pub benefits: Decimal,
    pub total: Decimal,
}

impl From<CltResult> for CltReport {
    fn from(result: CltResult) -> Self {
        Self {
            benefits: result.benefits(),
            total: result.total(),
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PjReport {
    #[serde(flatten)]
    pub result: PjResult,
    pub total: Decimal,
}

impl From<PjResult> for PjReport {
    fn from(result: PjResult) -> Self {
        Self {
            total: result.total(),
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct BatchEntry {
    row: usize,
    name: Option<String>,
    #[serde(flatten)]
    report: CltReport,
}

// ─── execution ───────────────────────────────────────────────────────────────

pub fn run_clt(
    session: &Session,
    args: &CltArgs,
) -> Result<Value> {
    let input = args.options.to_input(args.gross);
    let result = CltCalculator::new(&session.tables).calculate(&input);
    Ok(serde_json::to_value(CltReport::from(result))?)
}

pub fn run_pj(
    session: &Session,
    args: &PjArgs,
) -> Result<Value> {
    let input = args.options.to_input(args.gross);
    let result = PjCalculator::new(&session.tables).calculate(&input);
    Ok(serde_json::to_value(PjReport::from(result))?)
}

pub fn run_pj_taxes(
    session: &Session,
    args: &PjTaxesArgs,
) -> Result<Value> {
    let form = PjTaxFormData {
        annual_revenue: args.revenue,
        monthly_pro_labore: args.pro_labore,
        other_monthly_payroll: args.other_payroll,
        export_percentage: args.export_percentage,
        activity_type: args.activity,
    };

    let Some(results) = SimplesNacionalCalculator::new(&session.tables).calculate(&form) else {
        bail!(
            "annual revenue {} is outside the Simples Nacional range (0, {}]",
            args.revenue,
            session.tables.simples_revenue_limit()
        );
    };
    Ok(serde_json::to_value(results)?)
}

pub fn run_employer_cost(
    session: &Session,
    args: &EmployerCostArgs,
) -> Result<Value> {
    let options = EmployerCostOptions {
        risk_level: args.risk_level.unwrap_or(session.employer.risk_level),
        industry_type: args.industry.unwrap_or(session.employer.industry_type),
    };
    debug!(?options, "Employer cost options");

    let input = args.clt.options.to_input(args.clt.gross);
    let clt = CltCalculator::new(&session.tables).calculate(&input);
    Ok(serde_json::to_value(calculate_employer_cost(&clt, &options))?)
}

pub fn run_equivalent(
    session: &Session,
    args: &EquivalentArgs,
) -> Result<Value> {
    match args.to {
        Regime::Clt => {
            let calculator = CltCalculator::new(&session.tables);
            let template = args.clt.to_input(Decimal::ZERO);
            let equivalence = CltEquivalenceSolver::new(calculator).solve(args.target, &template);
            let result = calculator.calculate(&SalaryInput {
                gross_salary: equivalence.gross_salary,
                ..template
            });

            Ok(json!({
                "target_total": args.target,
                "equivalence": equivalence,
                "clt": CltReport::from(result),
            }))
        }
        Regime::Pj => {
            let calculator = PjCalculator::new(&session.tables);
            let template = args.pj.to_input(Decimal::ZERO);
            let gross_salary = pj_gross_for_total(&calculator, args.target, &template);
            let result = calculator.calculate(&PjInput {
                gross_salary,
                ..template
            });

            Ok(json!({
                "target_total": args.target,
                "gross_salary": gross_salary,
                "pj": PjReport::from(result),
            }))
        }
    }
}

pub fn run_compare(
    session: &Session,
    args: &CompareArgs,
) -> Result<Value> {
    let clt = args.clt.to_input(args.clt_gross);
    let pj = args.pj.to_input(args.pj_gross);

    let Some(comparison) = compare_regimes_with(&session.tables, &clt, &pj) else {
        bail!("nothing to compare: give a positive --clt-gross or --pj-gross");
    };
    Ok(serde_json::to_value(comparison)?)
}

pub fn run_batch(
    session: &Session,
    args: &BatchArgs,
) -> Result<Value> {
    let rows = csv_loader::load_from_file(&args.file)
        .with_context(|| format!("Failed to load batch file: {}", args.file.display()))?;
    info!(rows = rows.len(), file = %args.file.display(), "Running batch");

    let calculator = CltCalculator::new(&session.tables);
    let entries: Vec<BatchEntry> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| BatchEntry {
            row: idx + 1,
            name: row.name,
            report: CltReport::from(calculator.calculate(&row.input)),
        })
        .collect();

    Ok(serde_json::to_value(entries)?)
}
