//! Integration tests for loading table CSVs into engine-ready tax tables.

use std::path::Path;

use payroll_core::calculations::common::round_half_up;
use payroll_core::calculations::CltCalculator;
use payroll_core::{SalaryInput, TableError, TableKind, TaxTables};
use payroll_data::{TableLoader, TableLoaderError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const BRACKETS_2025: &str = include_str!("../test-data/brackets_2025.csv");
const SIMPLES_2025: &str = include_str!("../test-data/simples_2025.csv");

fn empty_base() -> TaxTables {
    TaxTables {
        inss: Vec::new(),
        irrf: Vec::new(),
        plr: Vec::new(),
        anexo_iii: Vec::new(),
        anexo_v: Vec::new(),
        ..TaxTables::y2025()
    }
}

#[test]
fn test_csv_reproduces_built_in_2025_tables() {
    let brackets = TableLoader::parse_brackets(BRACKETS_2025.as_bytes()).expect("brackets");
    let simples = TableLoader::parse_simples(SIMPLES_2025.as_bytes()).expect("simples");

    let tables = TableLoader::apply(empty_base(), &brackets, &simples).expect("apply");

    assert_eq!(brackets.len(), 14);
    assert_eq!(simples.len(), 12);
    assert_eq!(tables, TaxTables::y2025());
}

#[test]
fn test_brackets_alone_are_not_enough_for_an_empty_base() {
    let brackets = TableLoader::parse_brackets(BRACKETS_2025.as_bytes()).expect("brackets");

    let err = TableLoader::apply(empty_base(), &brackets, &[]).unwrap_err();

    assert!(
        matches!(
            err,
            TableLoaderError::InvalidTables(TableError::Empty(TableKind::AnexoIII))
        ),
        "got: {err:?}"
    );
}

#[test]
fn test_load_files_from_disk() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data");

    let tables = TableLoader::load_files(
        empty_base(),
        Some(&dir.join("brackets_2025.csv")),
        Some(&dir.join("simples_2025.csv")),
    )
    .expect("load");

    assert_eq!(tables.simples_revenue_limit(), dec!(4800000));
}

#[test]
fn test_loaded_irrf_flows_through_clt_calculator() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data/irrf_only.csv");

    let tables = TableLoader::load_files(TaxTables::y2025(), Some(&path), None).expect("load");
    let calculator = CltCalculator::new(&tables);

    // IRRF base 4490.40 is below the loaded 5000 exemption.
    let exempt = calculator.calculate(&SalaryInput::new(dec!(5000)));
    assert_eq!(exempt.deductions.income_tax, dec!(0));
    assert_eq!(round_half_up(exempt.deductions.inss), dec!(509.60));

    // 10000 − 951.6344 = 9048.3656 × 27.5% − 1375
    let taxed = calculator.calculate(&SalaryInput::new(dec!(10000)));
    assert_eq!(round_half_up(taxed.deductions.income_tax), dec!(1113.30));
}
