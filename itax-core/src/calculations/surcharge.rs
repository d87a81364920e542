//! Surcharge with marginal relief.
//!
//! The applicable tier is the highest one whose threshold net taxable income
//! exceeds. Surcharge is levied on tax other than deemed-income tax, which
//! carries its own fixed surcharge. Marginal relief caps the total so that
//! crossing a threshold never costs more than the income above it.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{min, non_negative};
use crate::calculations::slabs::{BaseTax, NormalRate, TaxSchedule, slab_tax};
use crate::models::SurchargeTier;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurchargeResult {
    /// Surcharge on tax other than deemed-income tax, before relief.
    pub gross: Decimal,
    pub marginal_relief: Decimal,
    pub on_deemed_income: Decimal,
}

impl SurchargeResult {
    pub fn net_on_other_income(&self) -> Decimal {
        self.gross - self.marginal_relief
    }

    pub fn total(&self) -> Decimal {
        self.net_on_other_income() + self.on_deemed_income
    }
}

/// Highest tier whose threshold `income` exceeds.
pub fn applicable_tier(tiers: &[SurchargeTier], income: Decimal) -> Option<&SurchargeTier> {
    tiers.iter().filter(|t| income > t.threshold).max_by_key(|t| t.threshold)
}

#[derive(Debug, Clone)]
pub struct SurchargeCalculator<'a> {
    schedule: &'a TaxSchedule<'a>,
}

impl<'a> SurchargeCalculator<'a> {
    pub fn new(schedule: &'a TaxSchedule<'a>) -> Self {
        Self { schedule }
    }

    /// `special_income` is the total specially rated income, deemed income
    /// included, that was taken out of normal income.
    pub fn calculate(
        &self,
        net_taxable_income: Decimal,
        base: &BaseTax,
        special_income: Decimal,
    ) -> SurchargeResult {
        let mut result = SurchargeResult {
            on_deemed_income: base.deemed_income_surcharge,
            ..Default::default()
        };

        if net_taxable_income <= Decimal::ZERO {
            return result;
        }
        let Some(tier) = applicable_tier(self.schedule.surcharge, net_taxable_income) else {
            return result;
        };
        if tier.rate <= Decimal::ZERO {
            return result;
        }

        let on_other_income = base.before_surcharge() - base.on_deemed_income;
        result.gross = on_other_income * tier.rate;

        let with_surcharge = on_other_income + result.gross + base.deemed_income_with_surcharge();
        let at_threshold = self.tax_at_threshold(tier.threshold, base, special_income);
        let lower_rate = self.rate_below(tier.threshold);
        let capped = at_threshold
            + at_threshold * lower_rate
            + (net_taxable_income - tier.threshold)
            + base.deemed_income_with_surcharge();

        result.marginal_relief = min(non_negative(with_surcharge - capped), result.gross);

        debug!(
            threshold = %tier.threshold,
            rate = %tier.rate,
            gross = %result.gross,
            marginal_relief = %result.marginal_relief,
            "surcharge computed"
        );
        result
    }

    /// Tax other than deemed-income tax had income been exactly `threshold`.
    /// Flat-rate taxpayers apply their rate to the whole threshold.
    fn tax_at_threshold(&self, threshold: Decimal, base: &BaseTax, special_income: Decimal) -> Decimal {
        match self.schedule.normal {
            NormalRate::Slabs(slabs) => {
                slab_tax(threshold - special_income, slabs) + base.special_excluding_deemed()
            }
            NormalRate::Flat(rate) => threshold * rate,
        }
    }

    fn rate_below(&self, threshold: Decimal) -> Decimal {
        applicable_tier(self.schedule.surcharge, threshold)
            .map(|t| t.rate)
            .unwrap_or(Decimal::ZERO)
    }
}
