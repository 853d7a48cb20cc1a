use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::commands::{
    self, BatchArgs, CltArgs, CompareArgs, EmployerCostArgs, EquivalentArgs, PjArgs, PjTaxesArgs,
    Session,
};
use crate::output::OutputFormat;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Brazilian payroll and tax calculator.
///
/// Computes CLT net salary, PJ contractor income, Simples Nacional taxes and
/// employer costs with the 2025 tables, or with CSV tables named in the
/// configuration file.
#[derive(Debug, Parser)]
#[command(name = "payroll", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    /// Configuration file [default: ./payroll.toml when present].
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `payroll_core=trace`. Overrides the config.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Hide log output on the terminal (file logging is unaffected).
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Net salary and benefits of a CLT employee
    Clt(CltArgs),
    /// Quick flat-rate estimate for a PJ contractor
    Pj(PjArgs),
    /// Simples Nacional taxes for a PJ company and its partner
    PjTaxes(PjTaxesArgs),
    /// Monthly and annual cost of a CLT employee to the employer
    EmployerCost(EmployerCostArgs),
    /// Gross salary under one regime matching a total under the other
    Equivalent(EquivalentArgs),
    /// CLT and PJ side by side
    Compare(CompareArgs),
    /// One CLT calculation per row of a CSV file
    Batch(BatchArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clt(_) => "clt",
            Self::Pj(_) => "pj",
            Self::PjTaxes(_) => "pj-taxes",
            Self::EmployerCost(_) => "employer-cost",
            Self::Equivalent(_) => "equivalent",
            Self::Compare(_) => "compare",
            Self::Batch(_) => "batch",
        }
    }

    pub fn run(
        &self,
        session: &Session,
    ) -> Result<Value> {
        match self {
            Self::Clt(args) => commands::run_clt(session, args),
            Self::Pj(args) => commands::run_pj(session, args),
            Self::PjTaxes(args) => commands::run_pj_taxes(session, args),
            Self::EmployerCost(args) => commands::run_employer_cost(session, args),
            Self::Equivalent(args) => commands::run_equivalent(session, args),
            Self::Compare(args) => commands::run_compare(session, args),
            Self::Batch(args) => commands::run_batch(session, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::commands::Regime;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_brazilian_amounts() {
        let cli = Cli::try_parse_from(["payroll", "clt", "--gross", "5.000,00", "--fgts"]).unwrap();

        let Command::Clt(args) = cli.command else {
            panic!("expected clt, got {:?}", cli.command);
        };
        assert_eq!(args.gross, dec!(5000));
        assert!(args.options.fgts);
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn dotted_thousands_without_cents_is_not_a_fraction() {
        let cli = Cli::try_parse_from(["payroll", "clt", "--gross", "5.000"]).unwrap();

        let Command::Clt(args) = cli.command else {
            panic!("expected clt, got {:?}", cli.command);
        };
        assert_eq!(args.gross, dec!(5000));
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "payroll", "pj", "--gross", "8000", "--tax-rate", "0.06", "--output", "json",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.command.name(), "pj");
    }

    #[test]
    fn equivalent_accepts_negative_target() {
        let cli = Cli::try_parse_from([
            "payroll", "equivalent", "--to", "clt", "--target", "-5000",
        ])
        .unwrap();

        let Command::Equivalent(args) = cli.command else {
            panic!("expected equivalent");
        };
        assert_eq!(args.to, Regime::Clt);
        assert_eq!(args.target, dec!(-5000));
    }

    #[test]
    fn rejects_unknown_activity() {
        let result = Cli::try_parse_from([
            "payroll", "pj-taxes", "--revenue", "120000", "--pro-labore", "3000", "--activity",
            "mining",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_amount() {
        assert!(Cli::try_parse_from(["payroll", "clt", "--gross", "five"]).is_err());
    }
}
