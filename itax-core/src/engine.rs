//! The computation pipeline.
//!
//! Every call builds its own income pool, loss pool and ledgers, so
//! computing the same snapshot twice gives identical results. Comparing
//! regimes is two calls on snapshots that differ only in `tax_regime`.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, non_negative};
use crate::calculations::heads::{
    CapitalGainsCalculator, HousePropertyCalculator, OtherSourcesCalculator, PgbpCalculator,
    SalaryCalculator, deemed_income, disallowed_deductions,
};
use crate::calculations::{
    BaseTax, BaseTaxCalculator, ForeignIncome, ForeignTaxCreditCalculator, IncomePool,
    InterestBase, InterestCalculator, LossPool, ResidencyFilter, SetOffEngine,
    SpecialIncome, SurchargeCalculator, SurchargeResult, TaxSchedule, TrustCalculator,
    apply_cess, rebate_87a,
};
use crate::config::ConfigSource;
use crate::error::{ComputationError, ConfigError};
use crate::models::{
    Breakdown, CapitalGainsBuckets, ComputationResult, HeadBreakdown, IncomeBreakdown,
    SurchargeBreakdown, TaxBreakdown, TaxRegime, TaxpayerSnapshot, TaxpayerType, TrustComputation,
    YearConfig, amount_or_zero,
};

/// Looks up the snapshot's year in `source` and computes it.
pub fn compute_with<S>(source: &S, snapshot: &TaxpayerSnapshot) -> Result<ComputationResult, ComputationError>
where
    S: ConfigSource + ?Sized,
{
    let config = source.year_config(&snapshot.assessment_year)?;
    compute(snapshot, config)
}

/// Computes `snapshot` against `config`, which must be for the same year.
pub fn compute(snapshot: &TaxpayerSnapshot, config: &YearConfig) -> Result<ComputationResult, ComputationError> {
    if snapshot.assessment_year != config.assessment_year {
        return Err(ComputationError::YearMismatch {
            snapshot: snapshot.assessment_year.clone(),
            config: config.assessment_year.clone(),
        });
    }
    TaxEngine::new(config).compute(snapshot)
}

/// Runs the pipeline for one year's configuration.
#[derive(Debug, Clone)]
pub struct TaxEngine<'a> {
    config: &'a YearConfig,
}

/// Tax through rebate and cess, before foreign tax credit.
struct DomesticTax {
    net_taxable_income: Decimal,
    base: BaseTax,
    surcharge: SurchargeResult,
    rebate: Decimal,
    trust: Option<TrustComputation>,
}

impl<'a> TaxEngine<'a> {
    pub fn new(config: &'a YearConfig) -> Self {
        Self { config }
    }

    pub fn compute(&self, snapshot: &TaxpayerSnapshot) -> Result<ComputationResult, ComputationError> {
        let config = self.config;
        if snapshot.taxpayer_type.is_slab_based()
            && snapshot.tax_regime == TaxRegime::New
            && !config.new_regime_available
        {
            return Err(ConfigError::RegimeNotAvailable(config.assessment_year.clone()).into());
        }
        let schedule = TaxSchedule::resolve(config, snapshot)?;
        let filter = ResidencyFilter::new(snapshot.residential_status);

        // Heads of income.
        let salary = SalaryCalculator::new(&config.deduction_limits, filter).calculate(
            &snapshot.salary,
            snapshot.taxpayer_type,
            snapshot.tax_regime,
        );
        let house_property = HousePropertyCalculator::new(config, filter).calculate(&snapshot.house_properties);
        let pgbp = PgbpCalculator::new(filter).calculate(&snapshot.pgbp, &snapshot.capital_gains.adjustment_43ca);
        let capital_gains = CapitalGainsCalculator::new(filter).calculate(&snapshot.capital_gains);
        let other = OtherSourcesCalculator::new(filter).calculate(&snapshot.other_sources);
        let deemed = deemed_income(&filter, &snapshot.deemed_income);
        let disallowed = disallowed_deductions(&filter, &snapshot.deductions);
        let foreign = ForeignIncome::assess(
            &snapshot.international_income,
            snapshot.residential_status,
            snapshot.pgbp.is_controlled_from_india,
        );

        // Set-off.
        let mut pool = IncomePool {
            salary: salary.gross,
            house_property: house_property.income,
            business: pgbp.non_speculative,
            speculative: pgbp.speculative,
            stcg_111a: capital_gains.stcg_111a,
            stcg_other: capital_gains.stcg_other,
            ltcg_112a: capital_gains.ltcg_112a,
            ltcg_other: capital_gains.ltcg_other,
            other_sources: other.other_sources,
            race_horse: other.race_horse_income,
            winnings: other.winnings,
        };
        foreign.add_to_pool(&mut pool);
        let mut losses = LossPool::from_snapshot(&snapshot.losses);
        pool.move_negatives_into(&mut losses);
        let set_off = SetOffEngine::new(config.deduction_limits.hp_loss_setoff_limit).run(pool, losses);
        let income = &set_off.income;

        let earlier_income = amount_or_zero(snapshot.interest_calc.income_as_per_earlier_assessment);
        let gross_total_income = income.total() + deemed + earlier_income;
        let net_taxable_income = gross_total_income - salary.standard_deduction + disallowed;
        debug!(
            gross_total_income = %gross_total_income,
            net_taxable_income = %net_taxable_income,
            "income assessed"
        );

        // Tax.
        let domestic = if snapshot.taxpayer_type == TaxpayerType::Trust {
            self.trust_tax(snapshot, &schedule, filter, gross_total_income)
        } else {
            let special = SpecialIncome {
                stcg_111a: income.stcg_111a,
                ltcg_112a: income.ltcg_112a,
                ltcg_other: income.ltcg_other,
                winnings: income.winnings,
                deemed,
            };
            self.standard_tax(snapshot, &schedule, net_taxable_income, &special)?
        };

        let tax_before_rebate = domestic.base.before_surcharge() + domestic.surcharge.total();
        let after_rebate = apply_cess(tax_before_rebate, domestic.rebate, config.cess_rate);
        let total_before_relief = after_rebate.total();
        let average_rate = if domestic.net_taxable_income > Decimal::ZERO {
            total_before_relief / domestic.net_taxable_income
        } else {
            Decimal::ZERO
        };

        let international = ForeignTaxCreditCalculator::new(&config.special_rates, schedule.normal)
            .calculate(&foreign, domestic.base.normal_income, average_rate);
        let relief = international.total_ftc_allowed;
        let total_tax_payable = max(Decimal::ZERO, total_before_relief - relief);

        let interest = InterestCalculator::new(snapshot).calculate(&InterestBase {
            tax_payable: total_tax_payable,
            tax_on_excluded_income: domestic.base.on_capital_gains()
                + domestic.base.on_winnings
                + international.tax_on_income,
        });

        let tds = snapshot.tds_paid();
        let advance_tax = snapshot.advance_tax_paid();
        let net_payable = total_tax_payable + interest.total_interest - tds - advance_tax;
        debug!(
            total_tax_payable = %total_tax_payable,
            interest = %interest.total_interest,
            net_payable = %net_payable,
            "computation complete"
        );

        let base = &domestic.base;
        let surcharge = &domestic.surcharge;
        let breakdown = Breakdown {
            income: IncomeBreakdown {
                salary: HeadBreakdown {
                    base_amount: Decimal::ZERO,
                    total_additions: salary.gross,
                    assessed: income.salary,
                },
                house_property: HeadBreakdown {
                    base_amount: Decimal::ZERO,
                    total_additions: house_property.income,
                    assessed: income.house_property,
                },
                pgbp: HeadBreakdown {
                    base_amount: pgbp.base_amount,
                    total_additions: pgbp.total_additions + pgbp.speculative,
                    assessed: income.business + income.speculative,
                },
                capital_gains: HeadBreakdown {
                    base_amount: Decimal::ZERO,
                    total_additions: capital_gains.total_additions,
                    assessed: income.stcg_111a + income.stcg_other + income.ltcg_112a + income.ltcg_other,
                },
                capital_gains_buckets: CapitalGainsBuckets {
                    stcg_111a: income.stcg_111a,
                    stcg_other: income.stcg_other,
                    ltcg_112a: income.ltcg_112a,
                    ltcg_other: income.ltcg_other,
                },
                other_sources: HeadBreakdown {
                    base_amount: Decimal::ZERO,
                    total_additions: other.other_sources,
                    assessed: income.other_sources + income.race_horse,
                },
                winnings: HeadBreakdown {
                    base_amount: Decimal::ZERO,
                    total_additions: income.winnings,
                    assessed: income.winnings,
                },
                deemed,
                international: international.clone(),
            },
            tax: TaxBreakdown {
                on_normal_income: base.on_normal_income,
                on_stcg_111a: base.on_stcg_111a,
                on_ltcg_112a: base.on_ltcg_112a,
                on_ltcg_other: base.on_ltcg_other,
                on_winnings: base.on_winnings,
                on_deemed_income: base.deemed_income_with_surcharge(),
                on_foreign_income: international.tax_on_income,
            },
            surcharge: SurchargeBreakdown {
                on_deemed_income: surcharge.on_deemed_income,
                on_other_income_gross: surcharge.gross,
                on_other_income_net: surcharge.net_on_other_income(),
            },
            standard_deduction: salary.standard_deduction,
            nav: house_property.nav,
            standard_deduction_24a: house_property.standard_deduction_24a,
            properties: house_property.properties,
        };

        Ok(ComputationResult {
            assessment_year: snapshot.assessment_year.clone(),
            taxpayer_type: snapshot.taxpayer_type,
            tax_regime: snapshot.tax_regime,
            gross_total_income,
            total_deductions: disallowed,
            net_taxable_income: non_negative(domestic.net_taxable_income),
            agricultural_income: other.agricultural_income,
            tax_liability: base.before_surcharge(),
            surcharge: surcharge.total(),
            marginal_relief: surcharge.marginal_relief,
            cess: after_rebate.cess,
            rebate_87a: after_rebate.rebate_87a,
            total_tax_payable,
            relief,
            tds,
            advance_tax,
            net_payable,
            interest,
            trust_computation: domestic.trust,
            breakdown,
            set_off_summary: set_off.ledger,
            losses_carried_forward: set_off.carried_forward,
        })
    }

    fn standard_tax(
        &self,
        snapshot: &TaxpayerSnapshot,
        schedule: &TaxSchedule<'_>,
        net_taxable_income: Decimal,
        special: &SpecialIncome,
    ) -> Result<DomesticTax, ConfigError> {
        let base = BaseTaxCalculator::new(schedule, &self.config.special_rates)
            .calculate(net_taxable_income, special);
        let surcharge = SurchargeCalculator::new(schedule).calculate(net_taxable_income, &base, special.total());

        let rebate = if snapshot.taxpayer_type == TaxpayerType::Individual {
            let rule = self
                .config
                .slab_entity(TaxpayerType::Individual)?
                .rebate_rule(snapshot.tax_regime);
            rebate_87a(
                rule,
                net_taxable_income,
                snapshot.age,
                base.before_surcharge() + surcharge.total(),
            )
        } else {
            Decimal::ZERO
        };

        Ok(DomesticTax {
            net_taxable_income,
            base,
            surcharge,
            rebate,
            trust: None,
        })
    }

    fn trust_tax(
        &self,
        snapshot: &TaxpayerSnapshot,
        schedule: &TaxSchedule<'_>,
        filter: ResidencyFilter,
        gross_total_income: Decimal,
    ) -> DomesticTax {
        let outcome = TrustCalculator::new(filter, self.config.special_rates.aop_mmr, schedule.surcharge)
            .calculate(&snapshot.trust_data, gross_total_income);
        let computation = outcome.computation;

        DomesticTax {
            net_taxable_income: computation.taxable_income,
            base: BaseTax {
                on_normal_income: computation.final_tax,
                ..Default::default()
            },
            surcharge: SurchargeResult {
                gross: outcome.surcharge,
                ..Default::default()
            },
            rebate: Decimal::ZERO,
            trust: Some(computation),
        }
    }
}
