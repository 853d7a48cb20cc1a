use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{SimplesBracket, TaxBracket};

/// Names of the tables held by [`TaxTables`], used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    Inss,
    Irrf,
    Plr,
    AnexoIII,
    AnexoV,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inss => "inss",
            Self::Irrf => "irrf",
            Self::Plr => "plr",
            Self::AnexoIII => "anexo_iii",
            Self::AnexoV => "anexo_v",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural problems found by [`TaxTables::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("{0} table has no brackets")]
    Empty(TableKind),

    #[error("{table} bracket {index} is not above the previous bracket")]
    Unordered { table: TableKind, index: usize },

    #[error("{table} bracket {index} is unbounded but is not the last bracket")]
    UnboundedNotLast { table: TableKind, index: usize },

    #[error("{0} table must end with an unbounded bracket")]
    MissingOpenBracket(TableKind),

    #[error("{table} bracket {index} has rate {rate} outside [0, 1]")]
    InvalidRate {
        table: TableKind,
        index: usize,
        rate: Decimal,
    },

    #[error("{table} bracket {index} component rates sum to {sum}, expected 1")]
    ComponentRatesSum {
        table: TableKind,
        index: usize,
        sum: Decimal,
    },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: Decimal },

    #[error("fator R threshold must be between 0 and 1, got {0}")]
    InvalidFatorRThreshold(Decimal),
}

/// A complete, versioned set of the legal constants the engine needs.
///
/// Future changes in the law are expressed as a new `TaxTables` value (built in
/// [`crate::tables`] or loaded from CSV), never as changes to the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTables {
    pub year: i32,

    /// Employee INSS contribution, applied cumulatively. The last bracket is
    /// bounded by the contribution ceiling.
    pub inss: Vec<TaxBracket>,

    /// Monthly IRRF table with "parcela a deduzir" constants.
    pub irrf: Vec<TaxBracket>,

    /// Exclusive PLR (profit sharing) table, also single-lookup.
    pub plr: Vec<TaxBracket>,

    /// Fixed monthly IRRF deduction per dependent.
    pub irrf_dependent_deduction: Decimal,

    /// Minimum wage the PJ default INSS contribution is based on.
    pub reference_minimum_wage: Decimal,

    /// Default PJ contribution rate over [`Self::reference_minimum_wage`].
    pub pj_inss_rate: Decimal,

    /// Fator R at or above which software activities use Anexo III.
    pub fator_r_threshold: Decimal,

    pub anexo_iii: Vec<SimplesBracket>,
    pub anexo_v: Vec<SimplesBracket>,
}

impl TaxTables {
    /// Checks ordering, open-ended brackets, rate ranges and component sums.
    ///
    /// # Errors
    ///
    /// Returns the first [`TableError`] found.
    pub fn validate(&self) -> Result<(), TableError> {
        validate_progressive(TableKind::Inss, &self.inss, false)?;
        validate_progressive(TableKind::Irrf, &self.irrf, true)?;
        validate_progressive(TableKind::Plr, &self.plr, true)?;
        validate_simples(TableKind::AnexoIII, &self.anexo_iii)?;
        validate_simples(TableKind::AnexoV, &self.anexo_v)?;

        if self.irrf_dependent_deduction < Decimal::ZERO {
            return Err(TableError::Negative {
                name: "irrf_dependent_deduction",
                value: self.irrf_dependent_deduction,
            });
        }
        if self.reference_minimum_wage < Decimal::ZERO {
            return Err(TableError::Negative {
                name: "reference_minimum_wage",
                value: self.reference_minimum_wage,
            });
        }
        if self.pj_inss_rate < Decimal::ZERO {
            return Err(TableError::Negative {
                name: "pj_inss_rate",
                value: self.pj_inss_rate,
            });
        }
        if self.fator_r_threshold < Decimal::ZERO || self.fator_r_threshold > Decimal::ONE {
            return Err(TableError::InvalidFatorRThreshold(self.fator_r_threshold));
        }
        Ok(())
    }

    /// Highest annual revenue any Simples annex accepts.
    pub fn simples_revenue_limit(&self) -> Decimal {
        self.anexo_iii
            .iter()
            .chain(self.anexo_v.iter())
            .map(|b| b.max_revenue)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

fn validate_rate(
    table: TableKind,
    index: usize,
    rate: Decimal,
) -> Result<(), TableError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(TableError::InvalidRate { table, index, rate });
    }
    Ok(())
}

fn validate_progressive(
    table: TableKind,
    brackets: &[TaxBracket],
    open_ended: bool,
) -> Result<(), TableError> {
    let Some(last) = brackets.last() else {
        return Err(TableError::Empty(table));
    };

    let mut previous: Option<Decimal> = None;
    for (index, bracket) in brackets.iter().enumerate() {
        validate_rate(table, index, bracket.rate)?;

        match bracket.upper_bound {
            None if index + 1 != brackets.len() => {
                return Err(TableError::UnboundedNotLast { table, index });
            }
            None => {}
            Some(bound) => {
                if previous.is_some_and(|p| bound <= p) {
                    return Err(TableError::Unordered { table, index });
                }
                previous = Some(bound);
            }
        }
    }

    if open_ended && last.upper_bound.is_some() {
        return Err(TableError::MissingOpenBracket(table));
    }
    Ok(())
}

fn validate_simples(
    table: TableKind,
    brackets: &[SimplesBracket],
) -> Result<(), TableError> {
    if brackets.is_empty() {
        return Err(TableError::Empty(table));
    }

    let mut previous = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        validate_rate(table, index, bracket.nominal_rate)?;
        if bracket.max_revenue <= previous {
            return Err(TableError::Unordered { table, index });
        }
        previous = bracket.max_revenue;

        let sum = bracket.component_rates.sum();
        if sum != Decimal::ONE {
            return Err(TableError::ComponentRatesSum { table, index, sum });
        }
    }
    Ok(())
}
