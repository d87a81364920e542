//! Tax on normal income and on specially rated components.
//!
//! Normal income is net taxable income less every specially rated component.
//! How it is taxed depends on the taxpayer type:
//!
//! | Taxpayer type                              | Normal income taxed by          |
//! |--------------------------------------------|---------------------------------|
//! | Individual, HUF, AOP, BOI, AJP             | regime and age-band slab table  |
//! | Firm, LLP, local authority, co-op society  | flat rate                       |
//! | Company                                    | flat or turnover-based rate     |
//! | Trust                                      | AOP maximum marginal rate       |
//!
//! Specially rated components are taxed at their own rates regardless of type:
//! STCG u/s 111A, LTCG u/s 112A above the exemption, other LTCG, winnings and
//! deemed income u/s 115BBE. Deemed income carries its own surcharge.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::calculations::slab_tax;
//! use itax_core::models::TaxSlab;
//!
//! let slabs = vec![
//!     TaxSlab::new(dec!(250000), dec!(0)),
//!     TaxSlab::new(dec!(500000), dec!(0.05)),
//!     TaxSlab::new(dec!(1000000), dec!(0.20)),
//!     TaxSlab::unbounded(dec!(0.30)),
//! ];
//!
//! assert_eq!(slab_tax(dec!(1000000), &slabs), dec!(112500));
//! assert_eq!(slab_tax(dec!(1200000), &slabs), dec!(172500));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{max, min, non_negative};
use crate::error::ConfigError;
use crate::models::{
    CompanyType, SpecialRates, SurchargeTier, TaxSlab, TaxpayerSnapshot, TaxpayerType, YearConfig,
    amount_or_zero,
};

/// Cumulative marginal tax on `income`. Non-positive income yields zero.
pub fn slab_tax(income: Decimal, slabs: &[TaxSlab]) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut remaining = income;
    let mut lower = Decimal::ZERO;

    for slab in slabs {
        if remaining <= Decimal::ZERO {
            break;
        }
        let in_slab = match slab.upper_limit {
            Some(upper) => min(remaining, non_negative(upper - lower)),
            None => remaining,
        };
        tax += in_slab * slab.rate;
        remaining -= in_slab;
        if let Some(upper) = slab.upper_limit {
            lower = upper;
        }
    }

    tax
}

fn is_ascending(slabs: &[TaxSlab]) -> bool {
    let mut previous: Option<Decimal> = None;
    let mut seen_unbounded = false;
    for slab in slabs {
        match slab.upper_limit {
            Some(_) if seen_unbounded => return false,
            Some(upper) => {
                if previous.is_some_and(|p| upper <= p) {
                    return false;
                }
                previous = Some(upper);
            }
            None => seen_unbounded = true,
        }
    }
    true
}

/// How normal income is taxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalRate<'a> {
    Slabs(&'a [TaxSlab]),
    Flat(Decimal),
}

impl NormalRate<'_> {
    pub fn tax_on(&self, income: Decimal) -> Decimal {
        match *self {
            Self::Slabs(slabs) => slab_tax(income, slabs),
            Self::Flat(rate) => non_negative(income) * rate,
        }
    }
}

/// The normal-income rate and surcharge tiers that apply to one taxpayer
/// in one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSchedule<'a> {
    pub normal: NormalRate<'a>,
    pub surcharge: &'a [SurchargeTier],
}

impl<'a> TaxSchedule<'a> {
    pub fn resolve(config: &'a YearConfig, snapshot: &TaxpayerSnapshot) -> Result<Self, ConfigError> {
        let taxpayer_type = snapshot.taxpayer_type;
        let schedule = match taxpayer_type {
            t if t.is_slab_based() => {
                let slabs = config.slabs_for(t, snapshot.tax_regime, snapshot.age)?;
                if !is_ascending(slabs) {
                    warn!(
                        assessment_year = %config.assessment_year,
                        taxpayer_type = t.as_str(),
                        "slab table is not ascending by upper limit"
                    );
                }
                Self {
                    normal: NormalRate::Slabs(slabs),
                    surcharge: config.slab_entity(t)?.surcharge_tiers(snapshot.tax_regime),
                }
            }
            TaxpayerType::Company => {
                let company = config.company(snapshot.company_type.unwrap_or(CompanyType::Domestic))?;
                let turnover = amount_or_zero(snapshot.previous_year_turnover);
                Self {
                    normal: NormalRate::Flat(company.rate.rate_for(turnover)),
                    surcharge: &company.surcharge,
                }
            }
            TaxpayerType::Trust => Self {
                normal: NormalRate::Flat(config.special_rates.aop_mmr),
                surcharge: &config.slab_entity(TaxpayerType::Aop)?.surcharge,
            },
            t => {
                let entity = config.flat_entity(t)?;
                Self {
                    normal: NormalRate::Flat(entity.rate),
                    surcharge: &entity.surcharge,
                }
            }
        };
        Ok(schedule)
    }
}

/// Post set-off amounts taxed at their own rates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecialIncome {
    pub stcg_111a: Decimal,
    pub ltcg_112a: Decimal,
    pub ltcg_other: Decimal,
    pub winnings: Decimal,
    pub deemed: Decimal,
}

impl SpecialIncome {
    pub fn total(&self) -> Decimal {
        self.stcg_111a + self.ltcg_112a + self.ltcg_other + self.winnings + self.deemed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BaseTax {
    pub normal_income: Decimal,
    pub on_normal_income: Decimal,
    pub on_stcg_111a: Decimal,
    pub on_ltcg_112a: Decimal,
    pub on_ltcg_other: Decimal,
    pub on_winnings: Decimal,
    /// Deemed-income tax before its own surcharge.
    pub on_deemed_income: Decimal,
    pub deemed_income_surcharge: Decimal,
}

impl BaseTax {
    /// Every component, deemed-income tax included but not its surcharge.
    pub fn before_surcharge(&self) -> Decimal {
        self.on_normal_income + self.special_excluding_deemed() + self.on_deemed_income
    }

    pub fn special_excluding_deemed(&self) -> Decimal {
        self.on_stcg_111a + self.on_ltcg_112a + self.on_ltcg_other + self.on_winnings
    }

    pub fn on_capital_gains(&self) -> Decimal {
        self.on_stcg_111a + self.on_ltcg_112a + self.on_ltcg_other
    }

    pub fn deemed_income_with_surcharge(&self) -> Decimal {
        self.on_deemed_income + self.deemed_income_surcharge
    }
}

#[derive(Debug, Clone)]
pub struct BaseTaxCalculator<'a> {
    schedule: &'a TaxSchedule<'a>,
    rates: &'a SpecialRates,
}

impl<'a> BaseTaxCalculator<'a> {
    pub fn new(schedule: &'a TaxSchedule<'a>, rates: &'a SpecialRates) -> Self {
        Self { schedule, rates }
    }

    pub fn calculate(&self, net_taxable_income: Decimal, special: &SpecialIncome) -> BaseTax {
        let rates = self.rates;
        let normal_income = max(Decimal::ZERO, net_taxable_income - special.total());
        let on_deemed_income = special.deemed * rates.deemed_income_115bbe;

        let tax = BaseTax {
            normal_income,
            on_normal_income: self.schedule.normal.tax_on(normal_income),
            on_stcg_111a: special.stcg_111a * rates.stcg_111a,
            on_ltcg_112a: non_negative(special.ltcg_112a - rates.ltcg_112a_exemption)
                * rates.ltcg_112a,
            on_ltcg_other: special.ltcg_other * rates.ltcg_other,
            on_winnings: special.winnings * rates.winnings,
            on_deemed_income,
            deemed_income_surcharge: on_deemed_income * rates.deemed_income_surcharge,
        };

        debug!(
            normal_income = %tax.normal_income,
            base_tax = %tax.before_surcharge(),
            "base tax computed"
        );
        tax
    }
}
