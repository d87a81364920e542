//! Trusts taxed as an AOP at the maximum marginal rate.
//!
//! Replaces the slab, surcharge and rebate steps for taxpayer type trust.
//! Receipts denied exemption are added to gross total income and the whole
//! is taxed flat. Surcharge uses the AOP tiers with no marginal relief.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::calculations::residency::ResidencyFilter;
use crate::calculations::surcharge::applicable_tier;
use crate::models::{SurchargeTier, TrustComputation, TrustData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustOutcome {
    pub computation: TrustComputation,
    pub surcharge: Decimal,
}

#[derive(Debug, Clone)]
pub struct TrustCalculator<'a> {
    filter: ResidencyFilter,
    rate: Decimal,
    surcharge: &'a [SurchargeTier],
}

impl<'a> TrustCalculator<'a> {
    pub fn new(filter: ResidencyFilter, rate: Decimal, surcharge: &'a [SurchargeTier]) -> Self {
        Self {
            filter,
            rate,
            surcharge,
        }
    }

    pub fn calculate(&self, trust: &TrustData, gross_total_income: Decimal) -> TrustOutcome {
        let disallowed_12a = self.filter.taxable_value(&trust.disallowed_receipts_12a);
        let disallowed_10_23c = self.filter.taxable_value(&trust.disallowed_receipts_10_23c);
        let taxable_income = gross_total_income + disallowed_12a + disallowed_10_23c;
        let final_tax = taxable_income * self.rate;

        let mut violation_flags = Vec::new();
        if disallowed_12a > Decimal::ZERO {
            violation_flags.push(format!(
                "Receipts disallowed u/s 12A/12AA/12AB: {:.2}",
                round_half_up(disallowed_12a)
            ));
        }
        if disallowed_10_23c > Decimal::ZERO {
            violation_flags.push(format!(
                "Receipts disallowed u/s 10(23C): {:.2}",
                round_half_up(disallowed_10_23c)
            ));
        }

        let surcharge_rate = applicable_tier(self.surcharge, taxable_income)
            .map(|t| t.rate)
            .unwrap_or(Decimal::ZERO);

        TrustOutcome {
            computation: TrustComputation {
                type_of_trust: "Trust / Institution".to_string(),
                section_applied: "Taxable as AOP".to_string(),
                total_income_before_exemption: gross_total_income,
                exempt_income: Decimal::ZERO,
                taxable_income,
                applicable_rate: self.rate,
                applicable_rate_display: "MMR".to_string(),
                violation_flags,
                final_tax,
            },
            surcharge: final_tax * surcharge_rate,
        }
    }
}
