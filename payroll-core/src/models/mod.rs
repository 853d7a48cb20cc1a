mod comparison;
mod contractor;
mod employer_cost;
mod salary;
mod simples;
mod tax_bracket;
mod tax_tables;

pub use comparison::RegimeComparison;
pub use contractor::{PjDeductions, PjInput, PjResult};
pub use employer_cost::{
    EmployerBenefitCosts, EmployerContributions, EmployerCostOptions, EmployerCostResult,
    EmployerProvisions, IndustryType, RiskLevel,
};
pub(crate) use salary::ResolvedSalaryInput;
pub use salary::{CltBenefits, CltDeductions, CltResult, FgtsBreakdown, SalaryInput};
pub use simples::{
    ActivityType, MonthlyIncome, PjTaxCalculationResults, PjTaxFormData, ProLaboreTaxes,
    SimplesAnnex, TaxComponents,
};
pub use tax_bracket::{ComponentRates, SimplesBracket, TaxBracket};
pub use tax_tables::{TableError, TableKind, TaxTables};
