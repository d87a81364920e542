use rust_decimal::Decimal;

use crate::calculations::residency::ResidencyFilter;
use crate::models::CapitalGains;

/// The four capital gains buckets before set-off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapitalGainsResult {
    pub stcg_111a: Decimal,
    /// Includes every adjustment and disallowed exemption.
    pub stcg_other: Decimal,
    pub ltcg_112a: Decimal,
    pub ltcg_other: Decimal,
    pub total_additions: Decimal,
}

#[derive(Debug, Clone)]
pub struct CapitalGainsCalculator {
    filter: ResidencyFilter,
}

impl CapitalGainsCalculator {
    pub fn new(filter: ResidencyFilter) -> Self {
        Self { filter }
    }

    /// Adjustments under sections 50, 50C, 50CA, 50D and disallowed 54-series
    /// exemptions all land in the other-STCG bucket.
    pub fn calculate(&self, gains: &CapitalGains) -> CapitalGainsResult {
        let total_additions = self.filter.sum(gains.additions());

        CapitalGainsResult {
            stcg_111a: self.filter.taxable_value(&gains.stcg_111a),
            stcg_other: self.filter.taxable_value(&gains.stcg_other) + total_additions,
            ltcg_112a: self.filter.taxable_value(&gains.ltcg_112a),
            ltcg_other: self.filter.taxable_value(&gains.ltcg_other),
            total_additions,
        }
    }
}
