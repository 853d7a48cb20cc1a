use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use payroll_core::{ComponentRates, SimplesBracket, TableError, TableKind, TaxBracket, TaxTables};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading tax table data.
#[derive(Debug, Error)]
pub enum TableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown bracket table '{0}' (expected inss, irrf or plr)")]
    UnknownTable(String),

    #[error("Unknown Simples annex '{0}' (expected III or V)")]
    UnknownAnnex(String),

    #[error("Loaded tables are invalid: {0}")]
    InvalidTables(#[from] TableError),
}

impl From<csv::Error> for TableLoaderError {
    fn from(err: csv::Error) -> Self {
        TableLoaderError::CsvParse(err.to_string())
    }
}

/// Maps the `table` column to the progressive table it replaces.
fn bracket_table_kind(table: &str) -> Result<TableKind, TableLoaderError> {
    match table.trim().to_ascii_lowercase().as_str() {
        "inss" => Ok(TableKind::Inss),
        "irrf" => Ok(TableKind::Irrf),
        "plr" => Ok(TableKind::Plr),
        _ => Err(TableLoaderError::UnknownTable(table.to_string())),
    }
}

/// Maps the `annex` column to the Simples Nacional annex it replaces.
fn simples_table_kind(annex: &str) -> Result<TableKind, TableLoaderError> {
    match annex.trim().to_ascii_uppercase().as_str() {
        "III" => Ok(TableKind::AnexoIII),
        "V" => Ok(TableKind::AnexoV),
        _ => Err(TableLoaderError::UnknownAnnex(annex.to_string())),
    }
}

/// A single record from the progressive brackets CSV file.
///
/// - `table`: `inss`, `irrf` or `plr`
/// - `upper_bound`: bracket ceiling (empty for the open-ended top bracket)
/// - `rate`: rate as a decimal (e.g., 0.075 for 7.5%)
/// - `deduction`: "parcela a deduzir" (0 for INSS)
/// - `label`: optional human-readable description
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub table: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
    #[serde(default)]
    pub label: Option<String>,
}

/// A single record from the Simples Nacional CSV file, one row per faixa.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimplesRecord {
    pub annex: String,
    pub max_revenue: Decimal,
    pub nominal_rate: Decimal,
    pub deduction: Decimal,
    pub irpj: Decimal,
    pub csll: Decimal,
    pub cofins: Decimal,
    pub pis_pasep: Decimal,
    pub cpp: Decimal,
    pub iss: Decimal,
}

impl From<&BracketRecord> for TaxBracket {
    fn from(record: &BracketRecord) -> Self {
        TaxBracket {
            upper_bound: record.upper_bound,
            rate: record.rate,
            deduction: record.deduction,
            label: record
                .label
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| Cow::Owned(l.to_string())),
        }
    }
}

impl From<&SimplesRecord> for SimplesBracket {
    fn from(record: &SimplesRecord) -> Self {
        SimplesBracket {
            max_revenue: record.max_revenue,
            nominal_rate: record.nominal_rate,
            deduction: record.deduction,
            component_rates: ComponentRates {
                irpj: record.irpj,
                csll: record.csll,
                cofins: record.cofins,
                pis_pasep: record.pis_pasep,
                cpp: record.cpp,
                iss: record.iss,
            },
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn parse_records<R, T>(reader: R) -> Result<Vec<T>, TableLoaderError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

fn open(path: &Path) -> Result<File, TableLoaderError> {
    File::open(path).map_err(|source| TableLoaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Loader for tax table data from CSV files.
///
/// Records replace whole tables: any table that appears in the CSV is
/// rebuilt from its rows in file order, and tables that do not appear are
/// kept from the base set. The result is validated before it is returned.
pub struct TableLoader;

impl TableLoader {
    /// Parse progressive bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TableLoaderError> {
        parse_records(reader)
    }

    /// Parse Simples Nacional records from a CSV reader.
    pub fn parse_simples<R: Read>(reader: R) -> Result<Vec<SimplesRecord>, TableLoaderError> {
        parse_records(reader)
    }

    /// Replace the tables present in `brackets` and `simples` on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns [`TableLoaderError::UnknownTable`] or
    /// [`TableLoaderError::UnknownAnnex`] for unrecognized names, and
    /// [`TableLoaderError::InvalidTables`] when the combined set fails
    /// [`TaxTables::validate`].
    pub fn apply(
        base: TaxTables,
        brackets: &[BracketRecord],
        simples: &[SimplesRecord],
    ) -> Result<TaxTables, TableLoaderError> {
        let mut tables = base;

        let mut inss = Vec::new();
        let mut irrf = Vec::new();
        let mut plr = Vec::new();
        for record in brackets {
            let target = match bracket_table_kind(&record.table)? {
                TableKind::Inss => &mut inss,
                TableKind::Irrf => &mut irrf,
                _ => &mut plr,
            };
            target.push(TaxBracket::from(record));
        }

        let mut anexo_iii = Vec::new();
        let mut anexo_v = Vec::new();
        for record in simples {
            let target = match simples_table_kind(&record.annex)? {
                TableKind::AnexoIII => &mut anexo_iii,
                _ => &mut anexo_v,
            };
            target.push(SimplesBracket::from(record));
        }

        for (loaded, slot) in [
            (inss, &mut tables.inss),
            (irrf, &mut tables.irrf),
            (plr, &mut tables.plr),
        ] {
            if !loaded.is_empty() {
                *slot = loaded;
            }
        }
        for (loaded, slot) in [
            (anexo_iii, &mut tables.anexo_iii),
            (anexo_v, &mut tables.anexo_v),
        ] {
            if !loaded.is_empty() {
                *slot = loaded;
            }
        }

        tables.validate()?;
        Ok(tables)
    }

    /// Read and apply optional bracket and Simples CSV files on top of `base`.
    pub fn load_files(
        base: TaxTables,
        brackets: Option<&Path>,
        simples: Option<&Path>,
    ) -> Result<TaxTables, TableLoaderError> {
        let bracket_records = match brackets {
            Some(path) => Self::parse_brackets(open(path)?)?,
            None => Vec::new(),
        };
        let simples_records = match simples {
            Some(path) => Self::parse_simples(open(path)?)?,
            None => Vec::new(),
        };

        Self::apply(base, &bracket_records, &simples_records)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const BRACKET_HEADER: &str = "table,upper_bound,rate,deduction,label";
    const SIMPLES_HEADER: &str =
        "annex,max_revenue,nominal_rate,deduction,irpj,csll,cofins,pis_pasep,cpp,iss";

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = format!("{BRACKET_HEADER}\nirrf,2826.65,0.075,182.16,Segunda faixa");

        let records = TableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            BracketRecord {
                table: "irrf".to_string(),
                upper_bound: Some(dec!(2826.65)),
                rate: dec!(0.075),
                deduction: dec!(182.16),
                label: Some("Segunda faixa".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_csv_unbounded_and_unlabelled() {
        let csv = format!("{BRACKET_HEADER}\nirrf,,0.275,908.73,");

        let records = TableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_bound, None);
        assert_eq!(TaxBracket::from(&records[0]).label, None);
    }

    #[test]
    fn test_parse_quoted_label_with_comma() {
        let csv = format!("{BRACKET_HEADER}\ninss,1518.00,0.075,0,\"Até R$ 1.518,00\"");

        let records = TableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].label.as_deref(), Some("Até R$ 1.518,00"));
    }

    #[test]
    fn test_parse_simples_row() {
        let csv = format!(
            "{SIMPLES_HEADER}\nIII,180000,0.06,0,0.04,0.035,0.1282,0.0278,0.434,0.335"
        );

        let records = TableLoader::parse_simples(csv.as_bytes()).expect("Failed to parse CSV");
        let bracket = SimplesBracket::from(&records[0]);

        assert_eq!(bracket.max_revenue, dec!(180000));
        assert_eq!(bracket.component_rates.sum(), dec!(1));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "table,upper_bound\ninss,1518";

        let err = TableLoader::parse_brackets(csv.as_bytes()).expect_err("Should fail");

        let TableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {msg}");
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = format!("{BRACKET_HEADER}\ninss,abc,0.075,0,");

        let err = TableLoader::parse_brackets(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, TableLoaderError::CsvParse(_)), "got: {err:?}");
    }

    #[test]
    fn test_parse_empty_csv() {
        let records =
            TableLoader::parse_brackets(format!("{BRACKET_HEADER}\n").as_bytes()).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn test_apply_replaces_only_present_tables() {
        let csv = format!(
            "{BRACKET_HEADER}\n\
             plr,8000,0,0,\n\
             plr,,0.10,800,\n"
        );
        let records = TableLoader::parse_brackets(csv.as_bytes()).unwrap();

        let tables = TableLoader::apply(TaxTables::y2025(), &records, &[]).unwrap();

        assert_eq!(tables.plr.len(), 2);
        assert_eq!(tables.plr[1].deduction, dec!(800));
        assert_eq!(tables.irrf, TaxTables::y2025().irrf);
        assert_eq!(tables.anexo_v, TaxTables::y2025().anexo_v);
    }

    #[test]
    fn test_apply_unknown_table() {
        let csv = format!("{BRACKET_HEADER}\nfgts,,0.08,0,");
        let records = TableLoader::parse_brackets(csv.as_bytes()).unwrap();

        let err = TableLoader::apply(TaxTables::y2025(), &records, &[]).unwrap_err();

        match err {
            TableLoaderError::UnknownTable(ref name) => assert_eq!(name, "fgts"),
            other => panic!("expected UnknownTable, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_unknown_annex() {
        let csv = format!("{SIMPLES_HEADER}\nIV,180000,0.045,0,0.188,0.152,0.1767,0.0383,0,0.445");
        let records = TableLoader::parse_simples(csv.as_bytes()).unwrap();

        let err = TableLoader::apply(TaxTables::y2025(), &[], &records).unwrap_err();

        assert!(matches!(err, TableLoaderError::UnknownAnnex(ref a) if a == "IV"));
    }

    #[test]
    fn test_apply_rejects_unordered_brackets() {
        let csv = format!(
            "{BRACKET_HEADER}\n\
             irrf,3000,0,0,\n\
             irrf,2000,0.075,150,\n\
             irrf,,0.15,300,\n"
        );
        let records = TableLoader::parse_brackets(csv.as_bytes()).unwrap();

        let err = TableLoader::apply(TaxTables::y2025(), &records, &[]).unwrap_err();

        assert!(
            matches!(
                err,
                TableLoaderError::InvalidTables(TableError::Unordered {
                    table: TableKind::Irrf,
                    index: 1
                })
            ),
            "got: {err:?}"
        );
    }

    #[test]
    fn test_load_files_reports_missing_path() {
        let err = TableLoader::load_files(
            TaxTables::y2025(),
            Some(Path::new("does/not/exist.csv")),
            None,
        )
        .unwrap_err();

        assert!(matches!(err, TableLoaderError::Io { .. }));
    }
}
