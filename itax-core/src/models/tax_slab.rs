use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::taxpayer::AgeBand;

/// One marginal bracket. `upper_limit` of `None` is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxSlab {
    pub fn new(upper_limit: Decimal, rate: Decimal) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_limit: None,
            rate,
        }
    }
}

/// Surcharge applies at `rate` once income exceeds `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl SurchargeTier {
    pub fn new(threshold: Decimal, rate: Decimal) -> Self {
        Self { threshold, rate }
    }
}

/// Section 87A eligibility and cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRule {
    pub income_ceiling: Decimal,
    pub max_rebate: Decimal,
    #[serde(default)]
    pub exclude_super_senior: bool,
}

/// Slab tables per age band. Only individuals are taxed by age; other slab
/// entities use `below_60`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AgeSlabs {
    pub below_60: Vec<TaxSlab>,
    #[serde(default)]
    pub from_60_to_80: Option<Vec<TaxSlab>>,
    #[serde(default)]
    pub above_80: Option<Vec<TaxSlab>>,
}

impl AgeSlabs {
    /// Same table for every age band.
    pub fn uniform(slabs: Vec<TaxSlab>) -> Self {
        Self {
            below_60: slabs,
            from_60_to_80: None,
            above_80: None,
        }
    }

    /// Falls back to the below-60 table when a band has none of its own.
    pub fn for_age(&self, age: AgeBand) -> &[TaxSlab] {
        let band = match age {
            AgeBand::Below60 => None,
            AgeBand::From60To80 => self.from_60_to_80.as_deref(),
            AgeBand::Above80 => self.above_80.as_deref(),
        };
        band.unwrap_or(&self.below_60)
    }

    pub fn set(&mut self, age: AgeBand, slabs: Vec<TaxSlab>) {
        match age {
            AgeBand::Below60 => self.below_60 = slabs,
            AgeBand::From60To80 => self.from_60_to_80 = Some(slabs),
            AgeBand::Above80 => self.above_80 = Some(slabs),
        }
    }
}
