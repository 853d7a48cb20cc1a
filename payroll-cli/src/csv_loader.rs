//! CSV loader for batch CLT salary input.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Only
//! `gross_salary` is required; any other column may be left out entirely or
//! left empty per row.
//!
//! | Column | Type | Notes |
//! |-----------------------|---------|-------------------------------------------|
//! | `name` | string | Free-form label echoed in the output |
//! | `gross_salary` | decimal | Required |
//! | `meal_allowance` | decimal | |
//! | `transport_allowance` | decimal | |
//! | `health_insurance` | decimal | |
//! | `other_benefits` | decimal | |
//! | `other_expenses` | decimal | |
//! | `years_at_company` | decimal | |
//! | `plr` | decimal | Annual profit sharing |
//! | `alimony` | decimal | |
//! | `dependents` | integer | |
//! | `include_fgts` | flag | `true`/`false`, `sim`/`não`, `yes`/`no`, `1`/`0` |
//!
//! Decimals accept `5000.00`, `5,000.00` and `5.000,00` (quote values that
//! contain a comma).
//!
//! ### Example
//!
//! ```csv
//! name,gross_salary,meal_allowance,dependents,include_fgts
//! Ana,"5.000,00",800,1,sim
//! Bruno,12000,,,
//! ```

use std::path::Path;

use payroll_core::SalaryInput;
use serde::{Deserialize, Serialize};

use crate::utils::{ParseDecimalError, parse_decimal, parse_optional_decimal};

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: Option<String>,
    gross_salary: String,
    meal_allowance: Option<String>,
    transport_allowance: Option<String>,
    health_insurance: Option<String>,
    other_benefits: Option<String>,
    other_expenses: Option<String>,
    years_at_company: Option<String>,
    plr: Option<String>,
    alimony: Option<String>,
    dependents: Option<String>,
    include_fgts: Option<String>,
}

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// `gross_salary` column, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("column '{column}' on row {row}: {source}")]
    InvalidDecimal {
        column: &'static str,
        row: usize,
        #[source]
        source: ParseDecimalError,
    },

    #[error("invalid dependents count '{value}' on row {row}")]
    InvalidDependents { value: String, row: usize },

    #[error("invalid include_fgts flag '{value}' on row {row}")]
    InvalidFlag { value: String, row: usize },
}

/// One batch entry: an optional label and the calculator input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    pub name: Option<String>,
    pub input: SalaryInput,
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "não" | "nao" | "n" | "0" => Some(false),
        "true" | "yes" | "sim" | "s" | "y" | "1" => Some(true),
        _ => None,
    }
}

/// Convert a single CSV row into a [`BatchRow`].
///
/// `row` is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchRow, CsvLoadError> {
    let optional = |column: &'static str, cell: &Option<String>| {
        cell.as_deref()
            .map(parse_optional_decimal)
            .transpose()
            .map(Option::flatten)
            .map_err(|source| CsvLoadError::InvalidDecimal {
                column,
                row: row_number,
                source,
            })
    };

    let gross_salary =
        parse_decimal(&row.gross_salary).map_err(|source| CsvLoadError::InvalidDecimal {
            column: "gross_salary",
            row: row_number,
            source,
        })?;

    let dependents = match row.dependents.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(value.parse::<u32>().map_err(|_| {
            CsvLoadError::InvalidDependents {
                value: value.to_string(),
                row: row_number,
            }
        })?),
    };

    let include_fgts = match row.include_fgts.as_deref() {
        None => false,
        Some(value) => parse_flag(value).ok_or_else(|| CsvLoadError::InvalidFlag {
            value: value.to_string(),
            row: row_number,
        })?,
    };

    Ok(BatchRow {
        name: row.name.filter(|n| !n.trim().is_empty()),
        input: SalaryInput {
            gross_salary,
            meal_allowance: optional("meal_allowance", &row.meal_allowance)?,
            transport_allowance: optional("transport_allowance", &row.transport_allowance)?,
            health_insurance: optional("health_insurance", &row.health_insurance)?,
            other_benefits: optional("other_benefits", &row.other_benefits)?,
            other_expenses: optional("other_expenses", &row.other_expenses)?,
            years_at_company: optional("years_at_company", &row.years_at_company)?,
            plr: optional("plr", &row.plr)?,
            alimony: optional("alimony", &row.alimony)?,
            dependents,
            include_fgts,
        },
    })
}

/// Parse CSV text and return one [`BatchRow`] per record, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or lacks
///   `gross_salary`.
/// * [`CsvLoadError::InvalidDecimal`], [`CsvLoadError::InvalidDependents`] or
///   [`CsvLoadError::InvalidFlag`] for the first bad cell.
pub fn load_from_str(input: &str) -> Result<Vec<BatchRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
gross_salary
5000
";

    const FULL_CSV: &str = "\
name,gross_salary,meal_allowance,transport_allowance,health_insurance,other_benefits,other_expenses,years_at_company,plr,alimony,dependents,include_fgts
Ana,\"5.000,00\",800,200,350,100,50,2.5,12000,300,2,sim
";

    #[test]
    fn test_minimal_csv_parses_gross_only() {
        let rows = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(
            rows,
            vec![BatchRow {
                name: None,
                input: SalaryInput::new(dec!(5000)),
            }]
        );
    }

    #[test]
    fn test_full_csv_all_fields_populated() {
        let rows = load_from_str(FULL_CSV).expect("should parse full CSV");
        let row = &rows[0];

        assert_eq!(row.name.as_deref(), Some("Ana"));
        assert_eq!(
            row.input,
            SalaryInput {
                gross_salary: dec!(5000),
                meal_allowance: Some(dec!(800)),
                transport_allowance: Some(dec!(200)),
                health_insurance: Some(dec!(350)),
                other_benefits: Some(dec!(100)),
                other_expenses: Some(dec!(50)),
                years_at_company: Some(dec!(2.5)),
                plr: Some(dec!(12000)),
                alimony: Some(dec!(300)),
                dependents: Some(2),
                include_fgts: true,
            }
        );
    }

    #[test]
    fn test_empty_cells_are_none() {
        let csv = "name,gross_salary,meal_allowance,dependents,include_fgts\nBruno,12000,,,\n";

        let rows = load_from_str(csv).expect("should parse");

        assert_eq!(rows[0].input, SalaryInput::new(dec!(12000)));
    }

    #[test]
    fn test_missing_gross_salary_column() {
        let err = load_from_str("name\nAna\n").unwrap_err();

        assert!(matches!(err, CsvLoadError::Parse(_)), "got: {err:?}");
    }

    #[test]
    fn test_invalid_decimal_reports_column_and_row() {
        let csv = "gross_salary,plr\n5000,\n6000,lots\n";

        let err = load_from_str(csv).unwrap_err();

        match err {
            CsvLoadError::InvalidDecimal { column, row, .. } => {
                assert_eq!(column, "plr");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidDecimal, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_dependents() {
        let err = load_from_str("gross_salary,dependents\n5000,-1\n").unwrap_err();

        assert!(matches!(err, CsvLoadError::InvalidDependents { row: 1, .. }));
    }

    #[test]
    fn test_invalid_flag() {
        let err = load_from_str("gross_salary,include_fgts\n5000,maybe\n").unwrap_err();

        assert!(matches!(err, CsvLoadError::InvalidFlag { row: 1, .. }));
    }

    #[test]
    fn test_flag_spellings() {
        for (value, expected) in [("SIM", true), ("1", true), ("não", false), ("", false)] {
            assert_eq!(parse_flag(value), Some(expected), "{value}");
        }
    }
}
