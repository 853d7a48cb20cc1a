//! Payroll and tax calculators for CLT employees and PJ contractors.
//!
//! Each calculator is a small struct borrowing a [`TaxTables`](crate::TaxTables)
//! with a free-function shortcut bound to the built-in 2025 tables:
//!
//! | Module | Shortcut |
//! |--------|----------|
//! | [`progressive`] | [`calculate_inss`], [`calculate_irrf`], [`calculate_plr_tax`] |
//! | [`clt`] | [`calculate_clt`] |
//! | [`pj`] | [`calculate_pj`] |
//! | [`simples_nacional`] | [`calculate_pj_taxes`] |
//! | [`equivalence`] | [`find_clt_equivalent_for_pj`], [`find_pj_equivalent_for_clt`] |
//! | [`employer_cost`] | [`calculate_employer_cost`] |
//! | [`comparison`] | [`compare_regimes`] |

pub mod clt;
pub mod common;
pub mod comparison;
pub mod employer_cost;
pub mod equivalence;
pub mod pj;
pub mod progressive;
pub mod simples_nacional;

pub use clt::{CltCalculator, calculate_clt};
pub use comparison::{compare_regimes, compare_regimes_with};
pub use employer_cost::calculate_employer_cost;
pub use equivalence::{
    CltEquivalenceSolver, Equivalence, find_clt_equivalent_for_pj, find_pj_equivalent_for_clt,
};
pub use pj::{PjCalculator, calculate_pj};
pub use progressive::{calculate_inss, calculate_irrf, calculate_plr_tax};
pub use simples_nacional::{SimplesNacionalCalculator, calculate_pj_taxes, fator_r};
