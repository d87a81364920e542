//! Built-in year configurations for AY 2015-16 through AY 2024-25.
//!
//! Each year starts from the shared `common` values and overrides only what changed that
//! year:
//!
//! | AY      | Cess | Std. deduction | 87A (old)        | New regime | Domestic company rate            |
//! |---------|------|----------------|------------------|------------|----------------------------------|
//! | 2015-16 | 3%   | -              | 2,000 / 5 lakh   | -          | 30%                              |
//! | 2016-17 | 3%   | -              | 5,000 / 5 lakh   | -          | 30%                              |
//! | 2017-18 | 3%   | -              | 5,000 / 5 lakh   | -          | 29% up to 5 cr turnover          |
//! | 2018-19 | 4%   | -              | 2,500 / 3.5 lakh | -          | 25% up to 50 cr turnover         |
//! | 2019-20 | 4%   | 40,000         | 2,500 / 3.5 lakh | -          | 25% up to 250 cr turnover        |
//! | 2020-21 | 4%   | 50,000         | 12,500 / 5 lakh  | -          | 25% up to 400 cr turnover        |
//! | 2021-22 | 4%   | 50,000         | 12,500 / 5 lakh  | yes        | 25% up to 400 cr turnover        |
//! | 2022-23 | 4%   | 50,000         | 12,500 / 5 lakh  | yes        | 25% up to 400 cr turnover        |
//! | 2023-24 | 4%   | 50,000         | 12,500 / 5 lakh  | yes        | 25% up to 400 cr turnover        |
//! | 2024-25 | 4%   | 50,000 (both)  | 12,500 / 5 lakh  | yes        | 25% up to 400 cr turnover        |

use std::collections::BTreeMap;

use itax_core::{
    AgeSlabs, CompanyConfig, CompanyRate, CompanyType, DeductionLimits, FlatEntityConfig,
    InMemoryConfigStore, RebateRule, SlabEntityConfig, SpecialRates, SurchargeTier, TaxSlab,
    TaxpayerType, YearConfig,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Assessment years with built-in tables, most recent first.
pub const ASSESSMENT_YEARS: [&str; 10] = [
    "2024-25", "2023-24", "2022-23", "2021-22", "2020-21", "2019-20", "2018-19", "2017-18",
    "2016-17", "2015-16",
];

/// Return filing due dates as `(non-audit, audit)`.
const FILING_DUE_DATES: [(&str, &str, &str); 10] = [
    ("2024-25", "2024-07-31", "2024-10-31"),
    ("2023-24", "2023-07-31", "2023-10-31"),
    ("2022-23", "2022-07-31", "2022-10-31"),
    ("2021-22", "2021-07-31", "2021-10-31"),
    ("2020-21", "2020-11-30", "2021-01-31"),
    ("2019-20", "2019-08-31", "2019-10-31"),
    ("2018-19", "2018-07-31", "2018-10-31"),
    ("2017-18", "2017-07-31", "2017-10-31"),
    ("2016-17", "2016-07-31", "2016-10-31"),
    ("2015-16", "2015-08-31", "2015-09-30"),
];

/// The return filing due date for `taxpayer_type` in `assessment_year`.
///
/// Companies, firms, LLPs and local authorities get the audit due date.
pub fn filing_due_date(assessment_year: &str, taxpayer_type: TaxpayerType) -> Option<&'static str> {
    FILING_DUE_DATES
        .iter()
        .find(|(year, _, _)| *year == assessment_year)
        .map(|&(_, non_audit, audit)| {
            if taxpayer_type.is_audit_case() {
                audit
            } else {
                non_audit
            }
        })
}

/// The built-in configuration for one assessment year.
pub fn year_config(assessment_year: &str) -> Option<YearConfig> {
    let config = match assessment_year {
        "2015-16" => ay_2015_16(),
        "2016-17" => ay_2016_17(),
        "2017-18" => ay_2017_18(),
        "2018-19" => ay_2018_19(),
        "2019-20" => ay_2019_20(),
        "2020-21" => ay_2020_21(),
        "2021-22" => ay_2021_22(),
        "2022-23" => ay_2022_23(),
        "2023-24" => ay_2023_24(),
        "2024-25" => ay_2024_25(),
        _ => return None,
    };
    Some(config)
}

/// A store holding every built-in year.
pub fn builtin_store() -> InMemoryConfigStore {
    ASSESSMENT_YEARS.iter().filter_map(|year| year_config(year)).collect()
}

// =============================================================================
// Table builders
// =============================================================================

fn table(bounds: &[(Decimal, Decimal)], top_rate: Decimal) -> Vec<TaxSlab> {
    bounds
        .iter()
        .map(|&(limit, rate)| TaxSlab::new(limit, rate))
        .chain(std::iter::once(TaxSlab::unbounded(top_rate)))
        .collect()
}

fn tiers(bounds: &[(Decimal, Decimal)]) -> Vec<SurchargeTier> {
    bounds
        .iter()
        .map(|&(threshold, rate)| SurchargeTier::new(threshold, rate))
        .collect()
}

fn rebate(max_rebate: Decimal, income_ceiling: Decimal) -> RebateRule {
    RebateRule {
        income_ceiling,
        max_rebate,
        exclude_super_senior: false,
    }
}

/// Old-regime slabs before the 5% band (AY 2015-16, 2016-17).
fn slabs_pre_2017() -> AgeSlabs {
    AgeSlabs {
        below_60: table(
            &[(dec!(250000), dec!(0)), (dec!(500000), dec!(0.10)), (dec!(1000000), dec!(0.20))],
            dec!(0.30),
        ),
        from_60_to_80: Some(table(
            &[(dec!(300000), dec!(0)), (dec!(500000), dec!(0.10)), (dec!(1000000), dec!(0.20))],
            dec!(0.30),
        )),
        above_80: Some(table(&[(dec!(500000), dec!(0)), (dec!(1000000), dec!(0.20))], dec!(0.30))),
    }
}

/// Old-regime slabs from AY 2017-18.
fn slabs_from_2017() -> AgeSlabs {
    AgeSlabs {
        below_60: table(
            &[(dec!(250000), dec!(0)), (dec!(500000), dec!(0.05)), (dec!(1000000), dec!(0.20))],
            dec!(0.30),
        ),
        from_60_to_80: Some(table(
            &[(dec!(300000), dec!(0)), (dec!(500000), dec!(0.05)), (dec!(1000000), dec!(0.20))],
            dec!(0.30),
        )),
        above_80: Some(table(&[(dec!(500000), dec!(0)), (dec!(1000000), dec!(0.20))], dec!(0.30))),
    }
}

/// New-regime slabs for AY 2021-22 to 2023-24; the same for every age.
fn new_regime_2021() -> AgeSlabs {
    AgeSlabs::uniform(table(
        &[
            (dec!(250000), dec!(0)),
            (dec!(500000), dec!(0.05)),
            (dec!(750000), dec!(0.10)),
            (dec!(1000000), dec!(0.15)),
            (dec!(1250000), dec!(0.20)),
            (dec!(1500000), dec!(0.25)),
        ],
        dec!(0.30),
    ))
}

fn new_regime_2024() -> AgeSlabs {
    AgeSlabs::uniform(table(
        &[
            (dec!(300000), dec!(0)),
            (dec!(600000), dec!(0.05)),
            (dec!(900000), dec!(0.10)),
            (dec!(1200000), dec!(0.15)),
            (dec!(1500000), dec!(0.20)),
        ],
        dec!(0.30),
    ))
}

fn surcharge_single(rate: Decimal) -> Vec<SurchargeTier> {
    tiers(&[(dec!(10000000), rate)])
}

fn surcharge_two_tier() -> Vec<SurchargeTier> {
    tiers(&[(dec!(5000000), dec!(0.10)), (dec!(10000000), dec!(0.15))])
}

fn surcharge_four_tier() -> Vec<SurchargeTier> {
    tiers(&[
        (dec!(5000000), dec!(0.10)),
        (dec!(10000000), dec!(0.15)),
        (dec!(20000000), dec!(0.25)),
        (dec!(50000000), dec!(0.37)),
    ])
}

/// Rates and limits shared by every slab entity in a year. Individuals get
/// every age band and the rebate; HUFs, AOPs, BOIs and artificial juridical
/// persons are taxed on the below-60 table with the old-regime tiers.
struct SlabRates {
    old_regime: AgeSlabs,
    new_regime: Option<AgeSlabs>,
    surcharge: Vec<SurchargeTier>,
    surcharge_new_regime: Option<Vec<SurchargeTier>>,
    rebate: Option<RebateRule>,
    rebate_new_regime: Option<RebateRule>,
}

impl SlabRates {
    fn old_regime_only(old_regime: AgeSlabs, surcharge: Vec<SurchargeTier>, rebate: RebateRule) -> Self {
        Self {
            old_regime,
            new_regime: None,
            surcharge,
            surcharge_new_regime: None,
            rebate: Some(rebate),
            rebate_new_regime: None,
        }
    }

    fn into_entities(self) -> BTreeMap<TaxpayerType, SlabEntityConfig> {
        let other = SlabEntityConfig {
            old_regime: AgeSlabs::uniform(self.old_regime.below_60.clone()),
            new_regime: self
                .new_regime
                .as_ref()
                .map(|slabs| AgeSlabs::uniform(slabs.below_60.clone())),
            surcharge: self.surcharge.clone(),
            surcharge_new_regime: None,
            rebate: None,
            rebate_new_regime: None,
        };

        let mut entities = BTreeMap::new();
        for taxpayer_type in [
            TaxpayerType::Huf,
            TaxpayerType::Aop,
            TaxpayerType::Boi,
            TaxpayerType::ArtificialJuridicalPerson,
        ] {
            entities.insert(taxpayer_type, other.clone());
        }
        entities.insert(
            TaxpayerType::Individual,
            SlabEntityConfig {
                old_regime: self.old_regime,
                new_regime: self.new_regime,
                surcharge: self.surcharge,
                surcharge_new_regime: self.surcharge_new_regime,
                rebate: self.rebate,
                rebate_new_regime: self.rebate_new_regime,
            },
        );
        entities
    }
}

/// Firms, LLPs, local authorities and co-operative societies at 30%.
fn flat_entities(surcharge_rate: Decimal) -> BTreeMap<TaxpayerType, FlatEntityConfig> {
    [
        TaxpayerType::Firm,
        TaxpayerType::Llp,
        TaxpayerType::LocalAuthority,
        TaxpayerType::CooperativeSociety,
    ]
    .into_iter()
    .map(|taxpayer_type| {
        (
            taxpayer_type,
            FlatEntityConfig {
                rate: dec!(0.30),
                surcharge: surcharge_single(surcharge_rate),
            },
        )
    })
    .collect()
}

fn companies(domestic_rate: CompanyRate, domestic_surcharge: (Decimal, Decimal)) -> BTreeMap<CompanyType, CompanyConfig> {
    let mut companies = BTreeMap::new();
    companies.insert(
        CompanyType::Domestic,
        CompanyConfig {
            rate: domestic_rate,
            surcharge: tiers(&[
                (dec!(10000000), domestic_surcharge.0),
                (dec!(100000000), domestic_surcharge.1),
            ]),
        },
    );
    companies.insert(
        CompanyType::Foreign,
        CompanyConfig {
            rate: CompanyRate::Flat { rate: dec!(0.40) },
            surcharge: tiers(&[(dec!(10000000), dec!(0.02)), (dec!(100000000), dec!(0.05))]),
        },
    );
    companies
}

fn turnover_based(threshold: Decimal, rate_at_or_below: Decimal) -> CompanyRate {
    CompanyRate::TurnoverBased {
        threshold,
        rate_at_or_below,
        rate_above: dec!(0.30),
    }
}

// =============================================================================
// Common configuration
// =============================================================================

fn special_rates() -> SpecialRates {
    SpecialRates {
        winnings: dec!(0.30),
        deemed_income_115bbe: dec!(0.60),
        deemed_income_surcharge: dec!(0.25),
        stcg_111a: dec!(0.15),
        ltcg_112a_exemption: dec!(100000),
        ltcg_112a: dec!(0.10),
        ltcg_other: dec!(0.20),
        foreign_115a_dividend_interest: dec!(0.20),
        foreign_115a_royalty_fts: dec!(0.10),
        foreign_115bba: dec!(0.20),
        fii_interest_115ad: dec!(0.20),
        fii_ltcg_115ad: dec!(0.10),
        fii_stcg_other_115ad: dec!(0.30),
        gdr_income_115ac: dec!(0.10),
        gdr_ltcg_115ac: dec!(0.10),
        offshore_fund_income_115ab: dec!(0.10),
        offshore_fund_ltcg_115ab: dec!(0.10),
        specified_fund_income_115ae: dec!(0.10),
        aop_mmr: dec!(0.30),
    }
}

/// Values every year shares. Entity tables are empty; each year supplies
/// its own.
fn common(assessment_year: &str) -> YearConfig {
    YearConfig {
        assessment_year: assessment_year.to_string(),
        new_regime_available: false,
        cess_rate: dec!(0.04),
        self_occupied_property_limit: 2,
        deduction_limits: deduction_limits(Decimal::ZERO, Decimal::ZERO),
        special_rates: special_rates(),
        slab_entities: BTreeMap::new(),
        flat_entities: flat_entities(dec!(0.12)),
        companies: BTreeMap::new(),
    }
}

fn deduction_limits(standard_deduction: Decimal, standard_deduction_new_regime: Decimal) -> DeductionLimits {
    DeductionLimits {
        hp_loss_setoff_limit: dec!(200000),
        hp_interest_limit_self_occupied: dec!(200000),
        standard_deduction,
        standard_deduction_new_regime,
    }
}

// =============================================================================
// Assessment years
// =============================================================================

fn ay_2015_16() -> YearConfig {
    YearConfig {
        cess_rate: dec!(0.03),
        self_occupied_property_limit: 1,
        slab_entities: SlabRates::old_regime_only(
            slabs_pre_2017(),
            surcharge_single(dec!(0.10)),
            RebateRule {
                exclude_super_senior: true,
                ..rebate(dec!(2000), dec!(500000))
            },
        )
        .into_entities(),
        flat_entities: flat_entities(dec!(0.10)),
        companies: companies(CompanyRate::Flat { rate: dec!(0.30) }, (dec!(0.05), dec!(0.10))),
        ..common("2015-16")
    }
}

fn ay_2016_17() -> YearConfig {
    YearConfig {
        cess_rate: dec!(0.03),
        self_occupied_property_limit: 1,
        slab_entities: SlabRates::old_regime_only(
            slabs_pre_2017(),
            surcharge_single(dec!(0.12)),
            rebate(dec!(5000), dec!(500000)),
        )
        .into_entities(),
        companies: companies(CompanyRate::Flat { rate: dec!(0.30) }, (dec!(0.07), dec!(0.12))),
        ..common("2016-17")
    }
}

fn ay_2017_18() -> YearConfig {
    YearConfig {
        cess_rate: dec!(0.03),
        self_occupied_property_limit: 1,
        slab_entities: SlabRates::old_regime_only(
            slabs_from_2017(),
            surcharge_single(dec!(0.15)),
            rebate(dec!(5000), dec!(500000)),
        )
        .into_entities(),
        companies: companies(turnover_based(dec!(50000000), dec!(0.29)), (dec!(0.07), dec!(0.12))),
        ..common("2017-18")
    }
}

fn ay_2018_19() -> YearConfig {
    YearConfig {
        self_occupied_property_limit: 1,
        slab_entities: SlabRates::old_regime_only(
            slabs_from_2017(),
            surcharge_two_tier(),
            rebate(dec!(2500), dec!(350000)),
        )
        .into_entities(),
        companies: companies(turnover_based(dec!(500000000), dec!(0.25)), (dec!(0.07), dec!(0.12))),
        ..common("2018-19")
    }
}

fn ay_2019_20() -> YearConfig {
    YearConfig {
        self_occupied_property_limit: 1,
        deduction_limits: deduction_limits(dec!(40000), Decimal::ZERO),
        slab_entities: SlabRates::old_regime_only(
            slabs_from_2017(),
            surcharge_two_tier(),
            rebate(dec!(2500), dec!(350000)),
        )
        .into_entities(),
        companies: companies(turnover_based(dec!(2500000000), dec!(0.25)), (dec!(0.07), dec!(0.12))),
        ..common("2019-20")
    }
}

fn ay_2020_21() -> YearConfig {
    YearConfig {
        deduction_limits: deduction_limits(dec!(50000), Decimal::ZERO),
        slab_entities: SlabRates::old_regime_only(
            slabs_from_2017(),
            surcharge_four_tier(),
            rebate(dec!(12500), dec!(500000)),
        )
        .into_entities(),
        companies: companies(turnover_based(dec!(4000000000), dec!(0.25)), (dec!(0.07), dec!(0.12))),
        ..common("2020-21")
    }
}

/// AY 2021-22 to 2023-24 differ only in the year label.
fn with_new_regime_2021(assessment_year: &str) -> YearConfig {
    YearConfig {
        new_regime_available: true,
        deduction_limits: deduction_limits(dec!(50000), Decimal::ZERO),
        slab_entities: SlabRates {
            old_regime: slabs_from_2017(),
            new_regime: Some(new_regime_2021()),
            surcharge: surcharge_four_tier(),
            surcharge_new_regime: Some(surcharge_four_tier()),
            rebate: Some(rebate(dec!(12500), dec!(500000))),
            rebate_new_regime: Some(rebate(dec!(12500), dec!(500000))),
        }
        .into_entities(),
        companies: companies(turnover_based(dec!(4000000000), dec!(0.25)), (dec!(0.07), dec!(0.12))),
        ..common(assessment_year)
    }
}

fn ay_2021_22() -> YearConfig {
    with_new_regime_2021("2021-22")
}

fn ay_2022_23() -> YearConfig {
    with_new_regime_2021("2022-23")
}

fn ay_2023_24() -> YearConfig {
    with_new_regime_2021("2023-24")
}

fn ay_2024_25() -> YearConfig {
    YearConfig {
        new_regime_available: true,
        deduction_limits: deduction_limits(dec!(50000), dec!(50000)),
        slab_entities: SlabRates {
            old_regime: slabs_from_2017(),
            new_regime: Some(new_regime_2024()),
            surcharge: surcharge_four_tier(),
            // The new regime caps surcharge at 25%.
            surcharge_new_regime: Some(tiers(&[
                (dec!(5000000), dec!(0.10)),
                (dec!(10000000), dec!(0.15)),
                (dec!(20000000), dec!(0.25)),
            ])),
            rebate: Some(rebate(dec!(12500), dec!(500000))),
            rebate_new_regime: Some(rebate(dec!(25000), dec!(700000))),
        }
        .into_entities(),
        companies: companies(turnover_based(dec!(4000000000), dec!(0.25)), (dec!(0.07), dec!(0.12))),
        ..common("2024-25")
    }
}

#[cfg(test)]
mod tests {
    use itax_core::{AgeBand, ConfigError, ConfigSource, TaxRegime};
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // builtin_store tests
    // =========================================================================

    #[test]
    fn store_holds_every_year_most_recent_first() {
        let store = builtin_store();

        assert_eq!(store.assessment_years(), ASSESSMENT_YEARS.to_vec());
    }

    #[test]
    fn unknown_year_is_not_substituted() {
        let store = builtin_store();

        assert_eq!(year_config("2025-26"), None);
        assert_eq!(
            store.year_config("2025-26").map(|c| c.assessment_year.clone()),
            Err(ConfigError::YearNotFound("2025-26".to_string()))
        );
    }

    #[test]
    fn every_year_configures_every_taxpayer_type() {
        for year in ASSESSMENT_YEARS {
            let config = year_config(year).expect("built-in year");
            assert_eq!(config.assessment_year, year);
            assert_eq!(config.slab_entities.len(), 5, "{year}");
            assert_eq!(config.flat_entities.len(), 4, "{year}");
            assert_eq!(config.companies.len(), 2, "{year}");
        }
    }

    #[test]
    fn slab_tables_are_ascending() {
        for year in ASSESSMENT_YEARS {
            let config = year_config(year).expect("built-in year");
            for entity in config.slab_entities.values() {
                for regime in [TaxRegime::Old, TaxRegime::New] {
                    let Some(tables) = entity.slabs(regime) else {
                        continue;
                    };
                    for age in [AgeBand::Below60, AgeBand::From60To80, AgeBand::Above80] {
                        let slabs = tables.for_age(age);
                        let bounded: Vec<Decimal> = slabs.iter().filter_map(|s| s.upper_limit).collect();
                        assert!(bounded.windows(2).all(|w| w[0] < w[1]), "{year} {age:?}");
                        assert_eq!(slabs.last().and_then(|s| s.upper_limit), None, "{year}");
                    }
                }
            }
        }
    }

    // =========================================================================
    // Year override tests
    // =========================================================================

    #[test]
    fn new_regime_from_2021_22() {
        for year in ASSESSMENT_YEARS {
            let config = year_config(year).expect("built-in year");
            let individual = &config.slab_entities[&TaxpayerType::Individual];
            let expected = year >= "2021-22";
            assert_eq!(config.new_regime_available, expected, "{year}");
            assert_eq!(individual.new_regime.is_some(), expected, "{year}");
        }
    }

    #[test]
    fn ay_2015_16_rebate_excludes_super_seniors() {
        let config = ay_2015_16();
        let rule = config.slab_entities[&TaxpayerType::Individual]
            .rebate_rule(TaxRegime::Old)
            .cloned();

        assert_eq!(
            rule,
            Some(RebateRule {
                income_ceiling: dec!(500000),
                max_rebate: dec!(2000),
                exclude_super_senior: true,
            })
        );
        assert_eq!(config.cess_rate, dec!(0.03));
        assert_eq!(config.flat_entities[&TaxpayerType::Firm].surcharge[0].rate, dec!(0.10));
    }

    #[test]
    fn ay_2024_25_new_regime_overrides() {
        let config = ay_2024_25();
        let individual = &config.slab_entities[&TaxpayerType::Individual];

        assert_eq!(individual.surcharge_tiers(TaxRegime::New).len(), 3);
        assert_eq!(individual.surcharge_tiers(TaxRegime::Old).len(), 4);
        assert_eq!(
            individual.rebate_rule(TaxRegime::New).map(|r| (r.max_rebate, r.income_ceiling)),
            Some((dec!(25000), dec!(700000)))
        );
        assert_eq!(config.deduction_limits.standard_deduction_new_regime, dec!(50000));
        assert_eq!(
            config.slabs_for(TaxpayerType::Huf, TaxRegime::New, AgeBand::Above80).map(|s| s[0].upper_limit),
            Ok(Some(dec!(300000)))
        );
    }

    #[test]
    fn self_occupied_limit_rises_in_2020_21() {
        assert_eq!(ay_2019_20().self_occupied_property_limit, 1);
        assert_eq!(ay_2020_21().self_occupied_property_limit, 2);
    }

    #[test]
    fn domestic_company_turnover_thresholds() {
        let rate = |config: YearConfig| config.companies[&CompanyType::Domestic].rate.clone();

        assert_eq!(rate(ay_2016_17()), CompanyRate::Flat { rate: dec!(0.30) });
        assert_eq!(rate(ay_2017_18()).rate_for(dec!(50000000)), dec!(0.29));
        assert_eq!(rate(ay_2019_20()).rate_for(dec!(2500000001)), dec!(0.30));
        assert_eq!(rate(ay_2024_25()).rate_for(dec!(4000000000)), dec!(0.25));
    }

    // =========================================================================
    // filing_due_date tests
    // =========================================================================

    #[test]
    fn audit_types_get_the_later_date() {
        assert_eq!(filing_due_date("2024-25", TaxpayerType::Individual), Some("2024-07-31"));
        assert_eq!(filing_due_date("2024-25", TaxpayerType::Company), Some("2024-10-31"));
        assert_eq!(filing_due_date("2020-21", TaxpayerType::LocalAuthority), Some("2021-01-31"));
        assert_eq!(filing_due_date("2015-16", TaxpayerType::Trust), Some("2015-08-31"));
        assert_eq!(filing_due_date("2014-15", TaxpayerType::Individual), None);
    }
}
