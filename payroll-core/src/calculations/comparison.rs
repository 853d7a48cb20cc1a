use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::clt::CltCalculator;
use crate::calculations::pj::PjCalculator;
use crate::models::{PjInput, RegimeComparison, SalaryInput, TaxTables};
use crate::tables;

/// Runs both calculators with the 2025 tables.
///
/// Returns `None` when neither regime has a positive gross salary, since
/// there is nothing meaningful to compare.
pub fn compare_regimes(
    clt: &SalaryInput,
    pj: &PjInput,
) -> Option<RegimeComparison> {
    compare_regimes_with(tables::current(), clt, pj)
}

pub fn compare_regimes_with(
    tables: &TaxTables,
    clt: &SalaryInput,
    pj: &PjInput,
) -> Option<RegimeComparison> {
    if clt.gross_salary <= Decimal::ZERO && pj.gross_salary <= Decimal::ZERO {
        debug!("Nothing to compare: both gross salaries are zero or negative");
        return None;
    }

    let clt = CltCalculator::new(tables).calculate(clt);
    let pj = PjCalculator::new(tables).calculate(pj);
    let clt_total = clt.total();
    let pj_total = pj.total();

    Some(RegimeComparison {
        clt,
        pj,
        clt_total,
        pj_total,
        difference: pj_total - clt_total,
    })
}
