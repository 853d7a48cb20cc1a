use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CltResult, PjResult};

/// Side-by-side monthly view of the same job under CLT and PJ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub clt: CltResult,
    pub pj: PjResult,
    pub clt_total: Decimal,
    pub pj_total: Decimal,
    /// `pj_total - clt_total`; positive when PJ pays more.
    pub difference: Decimal,
}
