//! One calculator per head of income.
//!
//! Each calculator reads its slice of the snapshot through the
//! [`ResidencyFilter`](super::residency::ResidencyFilter) and returns the
//! assessed amount with enough detail for the breakdown. Set-off happens
//! later, on the pooled amounts.

mod capital_gains;
mod house_property;
mod other_sources;
mod pgbp;
mod salary;

pub use capital_gains::{CapitalGainsCalculator, CapitalGainsResult};
pub use house_property::{HousePropertyCalculator, HousePropertyResult};
pub use other_sources::{
    OtherSourcesCalculator, OtherSourcesResult, deemed_income, disallowed_deductions,
};
pub use pgbp::{PgbpCalculator, PgbpResult};
pub use salary::{SalaryCalculator, SalaryResult};
