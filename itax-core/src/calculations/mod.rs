//! Calculators for each stage of an income-tax computation.
//!
//! The stages run in this order: head calculators, loss set-off, base tax,
//! surcharge, rebate and cess, foreign tax credit, interest. Trusts replace
//! the base-tax through rebate stages with a flat-rate computation.
//! [`crate::engine`] wires them together.

pub mod common;
pub mod heads;
pub mod interest;
pub mod international;
pub mod rebate;
pub mod residency;
pub mod set_off;
pub mod slabs;
pub mod surcharge;
pub mod trust;

pub use interest::{InterestBase, InterestCalculator};
pub use international::{ForeignIncome, ForeignTaxCreditCalculator};
pub use rebate::{RebateCessResult, apply_cess, rebate_87a};
pub use residency::{IncomeKind, ResidencyFilter};
pub use set_off::{IncomePool, LossPool, SetOffEngine, SetOffOutcome};
pub use slabs::{BaseTax, BaseTaxCalculator, NormalRate, SpecialIncome, TaxSchedule, slab_tax};
pub use surcharge::{SurchargeCalculator, SurchargeResult};
pub use trust::{TrustCalculator, TrustOutcome};
