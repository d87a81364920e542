//! Per-assessment-year rate and limit tables.
//!
//! A [`YearConfig`] is a read-only value; the engine never mutates it. Slab
//! and surcharge tables must be ascending by bound.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax_slab::{AgeSlabs, RebateRule, SurchargeTier, TaxSlab};
use super::taxpayer::{AgeBand, CompanyType, TaxRegime, TaxpayerType};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearConfig {
    pub assessment_year: String,
    pub new_regime_available: bool,
    /// Health and education cess on tax after rebate.
    pub cess_rate: Decimal,
    /// Self-occupied properties allowed a nil annual value.
    pub self_occupied_property_limit: usize,
    pub deduction_limits: DeductionLimits,
    pub special_rates: SpecialRates,
    pub slab_entities: BTreeMap<TaxpayerType, SlabEntityConfig>,
    pub flat_entities: BTreeMap<TaxpayerType, FlatEntityConfig>,
    pub companies: BTreeMap<CompanyType, CompanyConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLimits {
    pub hp_loss_setoff_limit: Decimal,
    pub hp_interest_limit_self_occupied: Decimal,
    /// Salary standard deduction under the old regime; individuals only.
    pub standard_deduction: Decimal,
    /// Salary standard deduction under the new regime; zero where none.
    pub standard_deduction_new_regime: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRates {
    pub winnings: Decimal,
    pub deemed_income_115bbe: Decimal,
    pub deemed_income_surcharge: Decimal,
    pub stcg_111a: Decimal,
    pub ltcg_112a_exemption: Decimal,
    pub ltcg_112a: Decimal,
    pub ltcg_other: Decimal,
    pub foreign_115a_dividend_interest: Decimal,
    pub foreign_115a_royalty_fts: Decimal,
    pub foreign_115bba: Decimal,
    pub fii_interest_115ad: Decimal,
    pub fii_ltcg_115ad: Decimal,
    pub fii_stcg_other_115ad: Decimal,
    pub gdr_income_115ac: Decimal,
    pub gdr_ltcg_115ac: Decimal,
    pub offshore_fund_income_115ab: Decimal,
    pub offshore_fund_ltcg_115ab: Decimal,
    pub specified_fund_income_115ae: Decimal,
    pub aop_mmr: Decimal,
}

/// Entities taxed through slab tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabEntityConfig {
    pub old_regime: AgeSlabs,
    #[serde(default)]
    pub new_regime: Option<AgeSlabs>,
    pub surcharge: Vec<SurchargeTier>,
    #[serde(default)]
    pub surcharge_new_regime: Option<Vec<SurchargeTier>>,
    #[serde(default)]
    pub rebate: Option<RebateRule>,
    #[serde(default)]
    pub rebate_new_regime: Option<RebateRule>,
}

impl SlabEntityConfig {
    pub fn slabs(&self, regime: TaxRegime) -> Option<&AgeSlabs> {
        match regime {
            TaxRegime::Old => Some(&self.old_regime),
            TaxRegime::New => self.new_regime.as_ref(),
        }
    }

    pub fn slabs_mut(&mut self, regime: TaxRegime) -> &mut AgeSlabs {
        match regime {
            TaxRegime::Old => &mut self.old_regime,
            TaxRegime::New => self.new_regime.get_or_insert_with(AgeSlabs::default),
        }
    }

    /// New-regime tiers where configured, else the old-regime tiers.
    pub fn surcharge_tiers(&self, regime: TaxRegime) -> &[SurchargeTier] {
        match (regime, &self.surcharge_new_regime) {
            (TaxRegime::New, Some(tiers)) => tiers,
            _ => &self.surcharge,
        }
    }

    /// New-regime rule where configured, else the old-regime rule.
    pub fn rebate_rule(&self, regime: TaxRegime) -> Option<&RebateRule> {
        match (regime, &self.rebate_new_regime) {
            (TaxRegime::New, Some(rule)) => Some(rule),
            _ => self.rebate.as_ref(),
        }
    }
}

/// Firms, LLPs, local authorities and co-operative societies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntityConfig {
    pub rate: Decimal,
    pub surcharge: Vec<SurchargeTier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompanyRate {
    Flat {
        rate: Decimal,
    },
    /// Lower rate when previous-year turnover is at or below `threshold`.
    TurnoverBased {
        threshold: Decimal,
        rate_at_or_below: Decimal,
        rate_above: Decimal,
    },
}

impl CompanyRate {
    pub fn rate_for(&self, previous_year_turnover: Decimal) -> Decimal {
        match *self {
            Self::Flat { rate } => rate,
            Self::TurnoverBased {
                threshold,
                rate_at_or_below,
                rate_above,
            } => {
                if previous_year_turnover <= threshold {
                    rate_at_or_below
                } else {
                    rate_above
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub rate: CompanyRate,
    pub surcharge: Vec<SurchargeTier>,
}

impl YearConfig {
    pub fn slab_entity(&self, taxpayer_type: TaxpayerType) -> Result<&SlabEntityConfig, ConfigError> {
        self.slab_entities
            .get(&taxpayer_type)
            .ok_or_else(|| self.entity_not_configured(taxpayer_type.as_str()))
    }

    pub fn flat_entity(&self, taxpayer_type: TaxpayerType) -> Result<&FlatEntityConfig, ConfigError> {
        self.flat_entities
            .get(&taxpayer_type)
            .ok_or_else(|| self.entity_not_configured(taxpayer_type.as_str()))
    }

    pub fn company(&self, company_type: CompanyType) -> Result<&CompanyConfig, ConfigError> {
        self.companies
            .get(&company_type)
            .ok_or_else(|| self.entity_not_configured(&format!("{} company", company_type.as_str())))
    }

    /// The slab table a slab-based taxpayer is taxed on.
    pub fn slabs_for(
        &self,
        taxpayer_type: TaxpayerType,
        regime: TaxRegime,
        age: AgeBand,
    ) -> Result<&[TaxSlab], ConfigError> {
        let entity = self.slab_entity(taxpayer_type)?;
        let tables = entity
            .slabs(regime)
            .ok_or_else(|| ConfigError::RegimeNotAvailable(self.assessment_year.clone()))?;
        let age = if taxpayer_type == TaxpayerType::Individual {
            age
        } else {
            AgeBand::Below60
        };
        Ok(tables.for_age(age))
    }

    fn entity_not_configured(&self, entity: &str) -> ConfigError {
        ConfigError::EntityNotConfigured {
            year: self.assessment_year.clone(),
            entity: entity.to_string(),
        }
    }
}
