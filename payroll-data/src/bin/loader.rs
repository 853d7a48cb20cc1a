use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use payroll_core::{TaxBracket, TaxTables};
use payroll_data::TableLoader;

/// Load tax tables from CSV files, validate them and print the result.
///
/// The brackets CSV should have the following columns:
/// - table: inss, irrf or plr
/// - upper_bound: the bracket ceiling (empty for the open-ended top bracket)
/// - rate: the rate as a decimal (e.g., 0.075)
/// - deduction: the "parcela a deduzir" (0 for INSS)
/// - label: optional description
///
/// The Simples CSV has one row per faixa:
/// annex,max_revenue,nominal_rate,deduction,irpj,csll,cofins,pis_pasep,cpp,iss
///
/// Tables missing from the files are taken from the built-in 2025 set.
#[derive(Parser, Debug)]
#[command(name = "payroll-tables")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file with INSS, IRRF and PLR brackets
    #[arg(short, long)]
    brackets: PathBuf,

    /// Path to the CSV file with Simples Nacional annexes
    #[arg(short, long)]
    simples: Option<PathBuf>,

    /// Tax year to stamp on the loaded tables
    #[arg(short, long)]
    year: Option<i32>,

    /// Print the validated tables as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn print_brackets(
    name: &str,
    brackets: &[TaxBracket],
) {
    println!("{name}: {} brackets", brackets.len());
    for bracket in brackets {
        let ceiling = bracket
            .upper_bound
            .map_or_else(|| "open".to_string(), |b| b.to_string());
        println!(
            "  up to {ceiling:>10}  rate {:>6}  deduction {:>8}  {}",
            bracket.rate,
            bracket.deduction,
            bracket.label.as_deref().unwrap_or("")
        );
    }
}

fn print_summary(tables: &TaxTables) {
    println!("Tax year {}", tables.year);
    print_brackets("INSS", &tables.inss);
    print_brackets("IRRF", &tables.irrf);
    print_brackets("PLR", &tables.plr);
    println!("Anexo III: {} faixas", tables.anexo_iii.len());
    println!("Anexo V: {} faixas", tables.anexo_v.len());
    println!("Simples revenue limit: {}", tables.simples_revenue_limit());
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Progress goes to stderr so `--json` output stays parseable.
    eprintln!("Loading brackets from: {}", args.brackets.display());
    if let Some(simples) = &args.simples {
        eprintln!("Loading Simples annexes from: {}", simples.display());
    }

    let mut tables = TableLoader::load_files(
        TaxTables::y2025(),
        Some(&args.brackets),
        args.simples.as_deref(),
    )
    .with_context(|| format!("Failed to load tables from: {}", args.brackets.display()))?;

    if let Some(year) = args.year {
        tables.year = year;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&tables).context("Failed to serialize tables")?;
        println!("{json}");
    } else {
        print_summary(&tables);
        println!("Tables are valid.");
    }

    Ok(())
}
