//! 2025 tables.
//!
//! - INSS: Portaria Interministerial MPS/MF nº 6/2025.
//! - IRRF: Lei nº 15.191/2025 table, in force from May 2025.
//! - PLR: exclusive profit-sharing table for 2025.
//! - Simples Nacional: LC nº 123/2006, Anexos III and V (LC nº 155/2016 wording).

use std::borrow::Cow;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{ComponentRates, SimplesBracket, TaxBracket, TaxTables};

fn bracket(
    upper_bound: Option<Decimal>,
    rate: Decimal,
    deduction: Decimal,
    label: &'static str,
) -> TaxBracket {
    TaxBracket {
        upper_bound,
        rate,
        deduction,
        label: Some(Cow::Borrowed(label)),
    }
}

#[allow(clippy::too_many_arguments)]
fn faixa(
    max_revenue: Decimal,
    nominal_rate: Decimal,
    deduction: Decimal,
    irpj: Decimal,
    csll: Decimal,
    cofins: Decimal,
    pis_pasep: Decimal,
    cpp: Decimal,
    iss: Decimal,
) -> SimplesBracket {
    SimplesBracket {
        max_revenue,
        nominal_rate,
        deduction,
        component_rates: ComponentRates {
            irpj,
            csll,
            cofins,
            pis_pasep,
            cpp,
            iss,
        },
    }
}

fn inss() -> Vec<TaxBracket> {
    vec![
        bracket(Some(dec!(1518.00)), dec!(0.075), dec!(0), "Até R$ 1.518,00"),
        bracket(Some(dec!(2793.88)), dec!(0.09), dec!(0), "De R$ 1.518,01 até R$ 2.793,88"),
        bracket(Some(dec!(4190.83)), dec!(0.12), dec!(0), "De R$ 2.793,89 até R$ 4.190,83"),
        bracket(Some(dec!(8157.41)), dec!(0.14), dec!(0), "De R$ 4.190,84 até R$ 8.157,41"),
    ]
}

fn irrf() -> Vec<TaxBracket> {
    vec![
        bracket(Some(dec!(2428.80)), dec!(0), dec!(0), "Até R$ 2.428,80"),
        bracket(Some(dec!(2826.65)), dec!(0.075), dec!(182.16), "De R$ 2.428,81 até R$ 2.826,65"),
        bracket(Some(dec!(3751.05)), dec!(0.15), dec!(394.16), "De R$ 2.826,66 até R$ 3.751,05"),
        bracket(Some(dec!(4664.68)), dec!(0.225), dec!(675.49), "De R$ 3.751,06 até R$ 4.664,68"),
        bracket(None, dec!(0.275), dec!(908.73), "Acima de R$ 4.664,68"),
    ]
}

fn plr() -> Vec<TaxBracket> {
    vec![
        bracket(Some(dec!(7640.80)), dec!(0), dec!(0), "Até R$ 7.640,80"),
        bracket(Some(dec!(9922.28)), dec!(0.075), dec!(573.06), "De R$ 7.640,81 até R$ 9.922,28"),
        bracket(Some(dec!(13167.00)), dec!(0.15), dec!(1317.23), "De R$ 9.922,29 até R$ 13.167,00"),
        bracket(Some(dec!(16380.38)), dec!(0.225), dec!(2304.76), "De R$ 13.167,01 até R$ 16.380,38"),
        bracket(None, dec!(0.275), dec!(3123.78), "Acima de R$ 16.380,38"),
    ]
}

#[rustfmt::skip]
fn anexo_iii() -> Vec<SimplesBracket> {
    vec![
        faixa(dec!(180000),  dec!(0.06),  dec!(0),      dec!(0.04), dec!(0.035), dec!(0.1282), dec!(0.0278), dec!(0.434), dec!(0.335)),
        faixa(dec!(360000),  dec!(0.112), dec!(9360),   dec!(0.04), dec!(0.035), dec!(0.1405), dec!(0.0305), dec!(0.434), dec!(0.32)),
        faixa(dec!(720000),  dec!(0.135), dec!(17640),  dec!(0.04), dec!(0.035), dec!(0.1364), dec!(0.0296), dec!(0.434), dec!(0.325)),
        faixa(dec!(1800000), dec!(0.16),  dec!(35640),  dec!(0.04), dec!(0.035), dec!(0.1364), dec!(0.0296), dec!(0.434), dec!(0.325)),
        faixa(dec!(3600000), dec!(0.21),  dec!(125640), dec!(0.04), dec!(0.035), dec!(0.1282), dec!(0.0278), dec!(0.434), dec!(0.335)),
        faixa(dec!(4800000), dec!(0.33),  dec!(648000), dec!(0.35), dec!(0.15),  dec!(0.1603), dec!(0.0347), dec!(0.305), dec!(0)),
    ]
}

#[rustfmt::skip]
fn anexo_v() -> Vec<SimplesBracket> {
    vec![
        faixa(dec!(180000),  dec!(0.155), dec!(0),      dec!(0.25), dec!(0.15),  dec!(0.141),  dec!(0.0305), dec!(0.2885), dec!(0.14)),
        faixa(dec!(360000),  dec!(0.18),  dec!(4500),   dec!(0.23), dec!(0.15),  dec!(0.141),  dec!(0.0305), dec!(0.2785), dec!(0.17)),
        faixa(dec!(720000),  dec!(0.195), dec!(9900),   dec!(0.24), dec!(0.15),  dec!(0.1492), dec!(0.0323), dec!(0.2385), dec!(0.19)),
        faixa(dec!(1800000), dec!(0.205), dec!(17100),  dec!(0.21), dec!(0.15),  dec!(0.1574), dec!(0.0341), dec!(0.2385), dec!(0.21)),
        faixa(dec!(3600000), dec!(0.23),  dec!(62100),  dec!(0.23), dec!(0.125), dec!(0.141),  dec!(0.0305), dec!(0.2385), dec!(0.235)),
        faixa(dec!(4800000), dec!(0.305), dec!(540000), dec!(0.35), dec!(0.155), dec!(0.1644), dec!(0.0356), dec!(0.295),  dec!(0)),
    ]
}

impl TaxTables {
    /// Tables in force for 2025.
    pub fn y2025() -> Self {
        Self {
            year: 2025,
            inss: inss(),
            irrf: irrf(),
            plr: plr(),
            irrf_dependent_deduction: dec!(189.59),
            // Kept at the 2024 minimum wage; the quick PJ estimate has always
            // used this base for the default contribution.
            reference_minimum_wage: dec!(1412.00),
            pj_inss_rate: dec!(0.11),
            fator_r_threshold: dec!(0.28),
            anexo_iii: anexo_iii(),
            anexo_v: anexo_v(),
        }
    }
}
