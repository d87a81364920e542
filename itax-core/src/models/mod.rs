mod income_source;
mod international;
mod result;
mod snapshot;
mod tax_slab;
mod taxpayer;
mod year_config;

pub use income_source::{AdditionItem, IncomeLocation, IncomeSource, MAX_INPUT_AMOUNT, amount_or_zero};
pub use international::{
    ComplianceStatus, IncomeNature, InternationalIncomeItem, SpecialSection, TransferPricing,
};
pub use result::{
    Breakdown, CapitalGainsBuckets, ComputationResult, HeadBreakdown, IncomeBreakdown, IncomeHead,
    InterestResult, InternationalItemComputation, InternationalSummary, LossCategory, LossOrigin,
    LossBalances, LossSource, PropertyComputation, QuarterMonths, SetOffEntry,
    SurchargeBreakdown, TaxBreakdown, TrustComputation,
};
pub use snapshot::{
    AdvanceTaxInstallments, AssessmentType, BroughtForwardLosses, CapitalGains,
    CurrentYearLosses, DeemedIncome, Deductions, EmployeeType, HouseProperty, InterestFacts,
    Losses, OtherSources, Perquisites, Pgbp, PgbpAdditions, PresumptiveScheme, ProfitsInLieu,
    Salary, SalaryDeductions, SalaryExemptions, TaxpayerSnapshot, TrustData, Vehicle44AE,
    VehicleKind,
};
pub use tax_slab::{AgeSlabs, RebateRule, SurchargeTier, TaxSlab};
pub use taxpayer::{AgeBand, CompanyType, ResidentialStatus, TaxRegime, TaxpayerType};
pub use year_config::{
    CompanyConfig, CompanyRate, DeductionLimits, FlatEntityConfig, SlabEntityConfig, SpecialRates,
    YearConfig,
};
