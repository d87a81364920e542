//! Output of one computation. Built fresh on every call.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::international::IncomeNature;
use super::taxpayer::{TaxRegime, TaxpayerType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub assessment_year: String,
    pub taxpayer_type: TaxpayerType,
    pub tax_regime: TaxRegime,
    pub gross_total_income: Decimal,
    /// Disallowed Chapter VI-A claims added back.
    pub total_deductions: Decimal,
    pub net_taxable_income: Decimal,
    /// Exempt; reported for disclosure only.
    pub agricultural_income: Decimal,
    /// Base tax before surcharge.
    pub tax_liability: Decimal,
    /// Net surcharge after marginal relief, including the deemed-income surcharge.
    pub surcharge: Decimal,
    pub marginal_relief: Decimal,
    pub cess: Decimal,
    pub rebate_87a: Decimal,
    /// Tax payable after foreign tax credit.
    pub total_tax_payable: Decimal,
    /// Foreign tax credit allowed.
    pub relief: Decimal,
    pub tds: Decimal,
    pub advance_tax: Decimal,
    /// Negative when a refund is due.
    pub net_payable: Decimal,
    pub interest: InterestResult,
    pub trust_computation: Option<TrustComputation>,
    pub breakdown: Breakdown,
    pub set_off_summary: Vec<SetOffEntry>,
    pub losses_carried_forward: LossBalances,
}

// =============================================================================
// Interest
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuarterMonths {
    pub q1: u32,
    pub q2: u32,
    pub q3: u32,
    pub q4: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InterestResult {
    pub u_s_234a: Decimal,
    pub u_s_234b: Decimal,
    pub u_s_234c: Decimal,
    /// Sum of the three, rounded to whole rupees.
    pub total_interest: Decimal,
    pub months_234a: u32,
    pub months_234b: u32,
    pub months_234c: QuarterMonths,
}

// =============================================================================
// Trusts
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustComputation {
    pub type_of_trust: String,
    pub section_applied: String,
    pub total_income_before_exemption: Decimal,
    pub exempt_income: Decimal,
    pub taxable_income: Decimal,
    pub applicable_rate: Decimal,
    pub applicable_rate_display: String,
    pub violation_flags: Vec<String>,
    pub final_tax: Decimal,
}

// =============================================================================
// Breakdown
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HeadBreakdown {
    pub base_amount: Decimal,
    pub total_additions: Decimal,
    /// Post set-off income of the head.
    pub assessed: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CapitalGainsBuckets {
    pub stcg_111a: Decimal,
    pub stcg_other: Decimal,
    pub ltcg_112a: Decimal,
    pub ltcg_other: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalItemComputation {
    pub id: String,
    pub country: String,
    pub nature: IncomeNature,
    pub amount_in_inr: Decimal,
    pub tax_paid_in_inr: Decimal,
    pub applicable_rule: String,
    pub indian_tax: Decimal,
    pub ftc_90_90a: Decimal,
    pub ftc_91: Decimal,
    pub total_ftc: Decimal,
    pub net_tax: Decimal,
    pub applicable_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InternationalSummary {
    pub net_income_added: Decimal,
    pub tax_on_income: Decimal,
    pub total_ftc_allowed: Decimal,
    pub itemized: Vec<InternationalItemComputation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IncomeBreakdown {
    pub salary: HeadBreakdown,
    pub house_property: HeadBreakdown,
    pub pgbp: HeadBreakdown,
    pub capital_gains: HeadBreakdown,
    pub capital_gains_buckets: CapitalGainsBuckets,
    pub other_sources: HeadBreakdown,
    pub winnings: HeadBreakdown,
    pub deemed: Decimal,
    pub international: InternationalSummary,
}

/// Tax by component. `on_deemed_income` includes its own surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxBreakdown {
    pub on_normal_income: Decimal,
    pub on_stcg_111a: Decimal,
    pub on_ltcg_112a: Decimal,
    pub on_ltcg_other: Decimal,
    pub on_winnings: Decimal,
    pub on_deemed_income: Decimal,
    pub on_foreign_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SurchargeBreakdown {
    pub on_deemed_income: Decimal,
    /// Gross surcharge on other income, before marginal relief.
    pub on_other_income_gross: Decimal,
    pub on_other_income_net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PropertyComputation {
    pub self_occupied: bool,
    /// Self-occupied beyond the year's limit, taxed as let out.
    pub deemed_let_out: bool,
    pub nav: Decimal,
    pub standard_deduction_24a: Decimal,
    pub interest_24b: Decimal,
    pub income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Breakdown {
    pub income: IncomeBreakdown,
    pub tax: TaxBreakdown,
    pub surcharge: SurchargeBreakdown,
    pub standard_deduction: Decimal,
    /// Totals across properties.
    pub nav: Decimal,
    pub standard_deduction_24a: Decimal,
    pub properties: Vec<PropertyComputation>,
}

// =============================================================================
// Set-off ledger
// =============================================================================

/// The eleven income buckets losses are set off against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeHead {
    Salary,
    HouseProperty,
    BusinessIncome,
    SpeculativeIncome,
    Stcg111a,
    StcgOther,
    Ltcg112a,
    LtcgOther,
    OtherSources,
    RaceHorseIncome,
    Winnings,
}

impl IncomeHead {
    pub const ALL: [IncomeHead; 11] = [
        Self::Salary,
        Self::HouseProperty,
        Self::BusinessIncome,
        Self::SpeculativeIncome,
        Self::Stcg111a,
        Self::StcgOther,
        Self::Ltcg112a,
        Self::LtcgOther,
        Self::OtherSources,
        Self::RaceHorseIncome,
        Self::Winnings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::HouseProperty => "House Property",
            Self::BusinessIncome => "Business Income",
            Self::SpeculativeIncome => "Speculative Income",
            Self::Stcg111a => "STCG (111A)",
            Self::StcgOther => "STCG (Other)",
            Self::Ltcg112a => "LTCG (112A)",
            Self::LtcgOther => "LTCG (Other)",
            Self::OtherSources => "Other Sources",
            Self::RaceHorseIncome => "Race Horse Income",
            Self::Winnings => "Winnings",
        }
    }
}

impl fmt::Display for IncomeHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Loss categories carried between years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossCategory {
    HouseProperty,
    BusinessNonSpeculative,
    BusinessSpeculative,
    Ltcl,
    Stcl,
    RaceHorses,
    UnabsorbedDepreciation,
}

impl LossCategory {
    pub const ALL: [LossCategory; 7] = [
        Self::HouseProperty,
        Self::BusinessNonSpeculative,
        Self::BusinessSpeculative,
        Self::Ltcl,
        Self::Stcl,
        Self::RaceHorses,
        Self::UnabsorbedDepreciation,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossOrigin {
    CurrentYear,
    BroughtForward,
}

/// A loss being absorbed: its category and whether it arose this year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossSource {
    pub origin: LossOrigin,
    pub category: LossCategory,
}

impl LossSource {
    pub const fn current(category: LossCategory) -> Self {
        Self {
            origin: LossOrigin::CurrentYear,
            category,
        }
    }

    pub const fn brought_forward(category: LossCategory) -> Self {
        Self {
            origin: LossOrigin::BroughtForward,
            category,
        }
    }
}

impl fmt::Display for LossSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.origin {
            LossOrigin::CurrentYear => "CY",
            LossOrigin::BroughtForward => "BF",
        };
        let name = match self.category {
            LossCategory::HouseProperty => "HP Loss",
            LossCategory::BusinessNonSpeculative => "Business Loss",
            LossCategory::BusinessSpeculative => "Speculative Loss",
            LossCategory::Ltcl => "LTCL",
            LossCategory::Stcl => "STCL",
            LossCategory::RaceHorses => "Race Horse Loss",
            LossCategory::UnabsorbedDepreciation => "Unabsorbed Depreciation",
        };
        write!(f, "{prefix} {name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOffEntry {
    pub source: LossSource,
    pub against: IncomeHead,
    pub amount: Decimal,
}

/// An amount per loss category; used for running balances and for the
/// losses carried forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LossBalances {
    pub house_property: Decimal,
    pub business_non_speculative: Decimal,
    pub business_speculative: Decimal,
    pub ltcl: Decimal,
    pub stcl: Decimal,
    pub race_horses: Decimal,
    pub unabsorbed_depreciation: Decimal,
}

impl LossBalances {
    pub fn get(&self, category: LossCategory) -> Decimal {
        match category {
            LossCategory::HouseProperty => self.house_property,
            LossCategory::BusinessNonSpeculative => self.business_non_speculative,
            LossCategory::BusinessSpeculative => self.business_speculative,
            LossCategory::Ltcl => self.ltcl,
            LossCategory::Stcl => self.stcl,
            LossCategory::RaceHorses => self.race_horses,
            LossCategory::UnabsorbedDepreciation => self.unabsorbed_depreciation,
        }
    }

    pub fn get_mut(&mut self, category: LossCategory) -> &mut Decimal {
        match category {
            LossCategory::HouseProperty => &mut self.house_property,
            LossCategory::BusinessNonSpeculative => &mut self.business_non_speculative,
            LossCategory::BusinessSpeculative => &mut self.business_speculative,
            LossCategory::Ltcl => &mut self.ltcl,
            LossCategory::Stcl => &mut self.stcl,
            LossCategory::RaceHorses => &mut self.race_horses,
            LossCategory::UnabsorbedDepreciation => &mut self.unabsorbed_depreciation,
        }
    }

    pub fn total(&self) -> Decimal {
        LossCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn loss_source_labels_match_ledger_wording() {
        assert_eq!(
            LossSource::current(LossCategory::HouseProperty).to_string(),
            "CY HP Loss"
        );
        assert_eq!(
            LossSource::brought_forward(LossCategory::UnabsorbedDepreciation).to_string(),
            "BF Unabsorbed Depreciation"
        );
        assert_eq!(IncomeHead::Stcg111a.to_string(), "STCG (111A)");
    }
}
