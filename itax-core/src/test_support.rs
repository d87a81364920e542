//! Year configuration fixture for unit tests: AY 2024-25 rates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    AgeSlabs, CompanyConfig, CompanyRate, CompanyType, DeductionLimits, FlatEntityConfig,
    RebateRule, SlabEntityConfig, SpecialRates, SurchargeTier, TaxSlab, TaxpayerType, YearConfig,
};

pub(crate) fn slabs(bounds: &[(Decimal, Decimal)], top_rate: Decimal) -> Vec<TaxSlab> {
    let mut slabs: Vec<TaxSlab> = bounds.iter().map(|&(limit, rate)| TaxSlab::new(limit, rate)).collect();
    slabs.push(TaxSlab::unbounded(top_rate));
    slabs
}

pub(crate) fn old_slabs_below_60() -> Vec<TaxSlab> {
    slabs(
        &[(dec!(250000), dec!(0)), (dec!(500000), dec!(0.05)), (dec!(1000000), dec!(0.20))],
        dec!(0.30),
    )
}

pub(crate) fn new_slabs_2425() -> Vec<TaxSlab> {
    slabs(
        &[
            (dec!(300000), dec!(0)),
            (dec!(600000), dec!(0.05)),
            (dec!(900000), dec!(0.10)),
            (dec!(1200000), dec!(0.15)),
            (dec!(1500000), dec!(0.20)),
        ],
        dec!(0.30),
    )
}

pub(crate) fn individual_surcharge() -> Vec<SurchargeTier> {
    vec![
        SurchargeTier::new(dec!(5000000), dec!(0.10)),
        SurchargeTier::new(dec!(10000000), dec!(0.15)),
        SurchargeTier::new(dec!(20000000), dec!(0.25)),
        SurchargeTier::new(dec!(50000000), dec!(0.37)),
    ]
}

fn slab_entity(old: AgeSlabs, new: AgeSlabs) -> SlabEntityConfig {
    SlabEntityConfig {
        old_regime: old,
        new_regime: Some(new),
        surcharge: individual_surcharge(),
        surcharge_new_regime: None,
        rebate: None,
        rebate_new_regime: None,
    }
}

pub(crate) fn year_2024_25() -> YearConfig {
    let mut individual_old = AgeSlabs::uniform(old_slabs_below_60());
    individual_old.from_60_to_80 = Some(slabs(
        &[(dec!(300000), dec!(0)), (dec!(500000), dec!(0.05)), (dec!(1000000), dec!(0.20))],
        dec!(0.30),
    ));
    individual_old.above_80 = Some(slabs(&[(dec!(500000), dec!(0)), (dec!(1000000), dec!(0.20))], dec!(0.30)));

    let individual = SlabEntityConfig {
        surcharge_new_regime: Some(vec![
            SurchargeTier::new(dec!(5000000), dec!(0.10)),
            SurchargeTier::new(dec!(10000000), dec!(0.15)),
            SurchargeTier::new(dec!(20000000), dec!(0.25)),
        ]),
        rebate: Some(RebateRule {
            income_ceiling: dec!(500000),
            max_rebate: dec!(12500),
            exclude_super_senior: false,
        }),
        rebate_new_regime: Some(RebateRule {
            income_ceiling: dec!(700000),
            max_rebate: dec!(25000),
            exclude_super_senior: false,
        }),
        ..slab_entity(individual_old, AgeSlabs::uniform(new_slabs_2425()))
    };

    let mut slab_entities = BTreeMap::new();
    slab_entities.insert(TaxpayerType::Individual, individual);
    for t in [
        TaxpayerType::Huf,
        TaxpayerType::Aop,
        TaxpayerType::Boi,
        TaxpayerType::ArtificialJuridicalPerson,
    ] {
        slab_entities.insert(
            t,
            slab_entity(
                AgeSlabs::uniform(old_slabs_below_60()),
                AgeSlabs::uniform(new_slabs_2425()),
            ),
        );
    }

    let mut flat_entities = BTreeMap::new();
    for t in [TaxpayerType::Firm, TaxpayerType::Llp, TaxpayerType::LocalAuthority] {
        flat_entities.insert(
            t,
            FlatEntityConfig {
                rate: dec!(0.30),
                surcharge: vec![SurchargeTier::new(dec!(10000000), dec!(0.12))],
            },
        );
    }

    let mut companies = BTreeMap::new();
    companies.insert(
        CompanyType::Domestic,
        CompanyConfig {
            rate: CompanyRate::TurnoverBased {
                threshold: dec!(4000000000),
                rate_at_or_below: dec!(0.25),
                rate_above: dec!(0.30),
            },
            surcharge: vec![
                SurchargeTier::new(dec!(10000000), dec!(0.07)),
                SurchargeTier::new(dec!(100000000), dec!(0.12)),
            ],
        },
    );
    companies.insert(
        CompanyType::Foreign,
        CompanyConfig {
            rate: CompanyRate::Flat { rate: dec!(0.40) },
            surcharge: vec![
                SurchargeTier::new(dec!(10000000), dec!(0.02)),
                SurchargeTier::new(dec!(100000000), dec!(0.05)),
            ],
        },
    );

    YearConfig {
        assessment_year: "2024-25".to_string(),
        new_regime_available: true,
        cess_rate: dec!(0.04),
        self_occupied_property_limit: 2,
        deduction_limits: DeductionLimits {
            hp_loss_setoff_limit: dec!(200000),
            hp_interest_limit_self_occupied: dec!(200000),
            standard_deduction: dec!(50000),
            standard_deduction_new_regime: dec!(50000),
        },
        special_rates: special_rates(),
        slab_entities,
        flat_entities,
        companies,
    }
}

pub(crate) fn special_rates() -> SpecialRates {
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

/// Tracing subscriber for tests that exercise warning paths.
pub(crate) fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}
