//! Loss set-off and carry-forward.
//!
//! Losses are absorbed in a fixed statutory order:
//!
//! 1. Current-year losses within their own head (speculative, race horses,
//!    short-term and long-term capital losses).
//! 2. Current-year house-property loss, up to the yearly cap, and business
//!    loss across heads. Business loss never touches salary.
//! 3. Brought-forward unabsorbed depreciation, then business, speculative,
//!    house-property, race-horse, short-term and long-term capital losses.
//!
//! Each absorption takes `min(remaining loss, remaining income)` from one
//! bucket and records a [`SetOffEntry`]. No bucket goes below zero.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{min, non_negative};
use crate::models::{
    IncomeHead, LossBalances, LossCategory, LossOrigin, LossSource, Losses, SetOffEntry,
    amount_or_zero,
};

use IncomeHead::*;

const HOUSE_PROPERTY_ORDER: [IncomeHead; 10] = [
    BusinessIncome,
    SpeculativeIncome,
    StcgOther,
    LtcgOther,
    OtherSources,
    RaceHorseIncome,
    Salary,
    Stcg111a,
    Ltcg112a,
    Winnings,
];

const BUSINESS_ORDER: [IncomeHead; 9] = [
    HouseProperty,
    SpeculativeIncome,
    StcgOther,
    LtcgOther,
    OtherSources,
    RaceHorseIncome,
    Stcg111a,
    Ltcg112a,
    Winnings,
];

const UNABSORBED_DEPRECIATION_ORDER: [IncomeHead; 10] = [
    HouseProperty,
    BusinessIncome,
    SpeculativeIncome,
    StcgOther,
    LtcgOther,
    OtherSources,
    RaceHorseIncome,
    Stcg111a,
    Ltcg112a,
    Winnings,
];

const STCL_ORDER: [IncomeHead; 4] = [StcgOther, Stcg111a, LtcgOther, Ltcg112a];
const LTCL_ORDER: [IncomeHead; 2] = [LtcgOther, Ltcg112a];

/// Pending income per bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncomePool {
    pub salary: Decimal,
    pub house_property: Decimal,
    pub business: Decimal,
    pub speculative: Decimal,
    pub stcg_111a: Decimal,
    pub stcg_other: Decimal,
    pub ltcg_112a: Decimal,
    pub ltcg_other: Decimal,
    pub other_sources: Decimal,
    pub race_horse: Decimal,
    pub winnings: Decimal,
}

impl IncomePool {
    pub fn get(&self, head: IncomeHead) -> Decimal {
        match head {
            Salary => self.salary,
            HouseProperty => self.house_property,
            BusinessIncome => self.business,
            SpeculativeIncome => self.speculative,
            Stcg111a => self.stcg_111a,
            StcgOther => self.stcg_other,
            Ltcg112a => self.ltcg_112a,
            LtcgOther => self.ltcg_other,
            OtherSources => self.other_sources,
            RaceHorseIncome => self.race_horse,
            Winnings => self.winnings,
        }
    }

    fn get_mut(&mut self, head: IncomeHead) -> &mut Decimal {
        match head {
            Salary => &mut self.salary,
            HouseProperty => &mut self.house_property,
            BusinessIncome => &mut self.business,
            SpeculativeIncome => &mut self.speculative,
            Stcg111a => &mut self.stcg_111a,
            StcgOther => &mut self.stcg_other,
            Ltcg112a => &mut self.ltcg_112a,
            LtcgOther => &mut self.ltcg_other,
            OtherSources => &mut self.other_sources,
            RaceHorseIncome => &mut self.race_horse,
            Winnings => &mut self.winnings,
        }
    }

    pub fn add(&mut self, head: IncomeHead, amount: Decimal) {
        *self.get_mut(head) += amount;
    }

    pub fn total(&self) -> Decimal {
        IncomeHead::ALL.iter().map(|h| self.get(*h)).sum()
    }

    /// Clamps negative buckets to zero, moving the magnitude into the
    /// matching current-year loss. Salary, other sources and winnings have
    /// no loss category; their negatives are dropped.
    pub fn move_negatives_into(&mut self, losses: &mut LossPool) {
        for head in IncomeHead::ALL {
            let amount = self.get(head);
            if amount >= Decimal::ZERO {
                continue;
            }
            *self.get_mut(head) = Decimal::ZERO;
            match loss_category_of(head) {
                Some(category) => *losses.current.get_mut(category) += -amount,
                None => warn!(
                    head = %head,
                    amount = %amount,
                    "negative income has no loss category; treated as zero"
                ),
            }
        }
    }
}

fn loss_category_of(head: IncomeHead) -> Option<LossCategory> {
    match head {
        HouseProperty => Some(LossCategory::HouseProperty),
        BusinessIncome => Some(LossCategory::BusinessNonSpeculative),
        SpeculativeIncome => Some(LossCategory::BusinessSpeculative),
        RaceHorseIncome => Some(LossCategory::RaceHorses),
        Stcg111a | StcgOther => Some(LossCategory::Stcl),
        Ltcg112a | LtcgOther => Some(LossCategory::Ltcl),
        Salary | OtherSources | Winnings => None,
    }
}

/// Unabsorbed losses, current-year and brought-forward.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LossPool {
    pub current: LossBalances,
    pub brought_forward: LossBalances,
}

impl LossPool {
    /// Current-year house-property loss is not entered; it comes from the
    /// head computation via [`IncomePool::move_negatives_into`].
    pub fn from_snapshot(losses: &Losses) -> Self {
        let cy = &losses.current_year;
        let bf = &losses.brought_forward;
        let amount = |v: Option<Decimal>| non_negative(amount_or_zero(v));

        Self {
            current: LossBalances {
                house_property: Decimal::ZERO,
                business_non_speculative: amount(cy.business_non_speculative),
                business_speculative: amount(cy.business_speculative),
                ltcl: amount(cy.ltcl),
                stcl: amount(cy.stcl),
                race_horses: amount(cy.race_horses),
                unabsorbed_depreciation: Decimal::ZERO,
            },
            brought_forward: LossBalances {
                house_property: amount(bf.house_property),
                business_non_speculative: amount(bf.business_non_speculative),
                business_speculative: amount(bf.business_speculative),
                ltcl: amount(bf.ltcl),
                stcl: amount(bf.stcl),
                race_horses: amount(bf.race_horses),
                unabsorbed_depreciation: amount(bf.unabsorbed_depreciation),
            },
        }
    }

    fn balance_mut(&mut self, source: LossSource) -> &mut Decimal {
        match source.origin {
            LossOrigin::CurrentYear => self.current.get_mut(source.category),
            LossOrigin::BroughtForward => self.brought_forward.get_mut(source.category),
        }
    }

    /// Current-year plus brought-forward, per category.
    pub fn carried_forward(&self) -> LossBalances {
        let mut total = LossBalances::default();
        for category in LossCategory::ALL {
            *total.get_mut(category) = self.current.get(category) + self.brought_forward.get(category);
        }
        total
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOffOutcome {
    pub income: IncomePool,
    pub ledger: Vec<SetOffEntry>,
    pub carried_forward: LossBalances,
}

/// Runs the full set-off sequence over `income` and `losses`.
#[derive(Debug, Clone)]
pub struct SetOffEngine {
    house_property_limit: Decimal,
}

impl SetOffEngine {
    pub fn new(house_property_limit: Decimal) -> Self {
        Self {
            house_property_limit,
        }
    }

    pub fn run(&self, income: IncomePool, losses: LossPool) -> SetOffOutcome {
        let mut state = SetOffState {
            income,
            losses,
            ledger: Vec::new(),
        };

        state.current_year_intra_head();
        state.current_year_inter_head(self.house_property_limit);
        state.brought_forward();

        debug!(
            entries = state.ledger.len(),
            remaining_income = %state.income.total(),
            "loss set-off complete"
        );

        let carried_forward = state.losses.carried_forward();
        SetOffOutcome {
            income: state.income,
            ledger: state.ledger,
            carried_forward,
        }
    }
}

struct SetOffState {
    income: IncomePool,
    losses: LossPool,
    ledger: Vec<SetOffEntry>,
}

impl SetOffState {
    fn current_year_intra_head(&mut self) {
        use LossCategory::*;
        self.absorb(LossSource::current(BusinessSpeculative), &[SpeculativeIncome]);
        self.absorb(LossSource::current(RaceHorses), &[RaceHorseIncome]);
        self.absorb(LossSource::current(Stcl), &STCL_ORDER);
        self.absorb(LossSource::current(Ltcl), &LTCL_ORDER);
    }

    fn current_year_inter_head(&mut self, house_property_limit: Decimal) {
        let hp = LossSource::current(LossCategory::HouseProperty);
        let available = min(self.losses.current.house_property, house_property_limit);
        self.absorb_up_to(hp, available, &HOUSE_PROPERTY_ORDER);

        self.absorb(
            LossSource::current(LossCategory::BusinessNonSpeculative),
            &BUSINESS_ORDER,
        );
    }

    fn brought_forward(&mut self) {
        use LossCategory::*;
        self.absorb(
            LossSource::brought_forward(UnabsorbedDepreciation),
            &UNABSORBED_DEPRECIATION_ORDER,
        );
        self.absorb(LossSource::brought_forward(BusinessNonSpeculative), &[BusinessIncome]);
        self.absorb(LossSource::brought_forward(BusinessSpeculative), &[SpeculativeIncome]);
        self.absorb(LossSource::brought_forward(HouseProperty), &[IncomeHead::HouseProperty]);
        self.absorb(LossSource::brought_forward(RaceHorses), &[RaceHorseIncome]);
        self.absorb(LossSource::brought_forward(Stcl), &STCL_ORDER);
        self.absorb(LossSource::brought_forward(Ltcl), &LTCL_ORDER);
    }

    fn absorb(&mut self, source: LossSource, heads: &[IncomeHead]) {
        let available = *self.losses.balance_mut(source);
        self.absorb_up_to(source, available, heads);
    }

    /// Sets off at most `available` of `source` against `heads` in order and
    /// deducts what was used from the loss balance.
    fn absorb_up_to(&mut self, source: LossSource, available: Decimal, heads: &[IncomeHead]) {
        let mut remaining = available;
        for &head in heads {
            if remaining <= Decimal::ZERO {
                break;
            }
            let bucket = self.income.get_mut(head);
            let used = min(remaining, *bucket);
            if used <= Decimal::ZERO {
                continue;
            }
            *bucket -= used;
            remaining -= used;
            *self.losses.balance_mut(source) -= used;
            self.ledger.push(SetOffEntry {
                source,
                against: head,
                amount: used,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BroughtForwardLosses, CurrentYearLosses};

    fn engine() -> SetOffEngine {
        SetOffEngine::new(dec!(200000))
    }

    fn absorbed(ledger: &[SetOffEntry], category: LossCategory) -> Decimal {
        ledger
            .iter()
            .filter(|e| e.source.category == category)
            .map(|e| e.amount)
            .sum()
    }

    fn against(ledger: &[SetOffEntry], head: IncomeHead) -> Decimal {
        ledger.iter().filter(|e| e.against == head).map(|e| e.amount).sum()
    }

    // =========================================================================
    // IncomePool::move_negatives_into tests
    // =========================================================================

    #[test]
    fn negative_buckets_become_current_year_losses() {
        let mut income = IncomePool {
            house_property: dec!(-300000),
            business: dec!(-50000),
            stcg_111a: dec!(-10000),
            ltcg_other: dec!(-20000),
            salary: dec!(1000000),
            ..Default::default()
        };
        let mut losses = LossPool::default();

        income.move_negatives_into(&mut losses);

        assert_eq!(income.house_property, Decimal::ZERO);
        assert_eq!(income.salary, dec!(1000000));
        assert_eq!(losses.current.house_property, dec!(300000));
        assert_eq!(losses.current.business_non_speculative, dec!(50000));
        assert_eq!(losses.current.stcl, dec!(10000));
        assert_eq!(losses.current.ltcl, dec!(20000));
    }

    #[test]
    fn negative_salary_is_dropped_with_warning() {
        let _guard = crate::test_support::init_test_tracing();
        let mut income = IncomePool {
            salary: dec!(-5),
            ..Default::default()
        };
        let mut losses = LossPool::default();

        income.move_negatives_into(&mut losses);

        assert_eq!(income.salary, Decimal::ZERO);
        assert_eq!(losses.current.total(), Decimal::ZERO);
    }

    // =========================================================================
    // current-year set-off tests
    // =========================================================================

    #[test]
    fn house_property_loss_is_capped_and_rest_carried_forward() {
        let income = IncomePool {
            salary: dec!(1000000),
            ..Default::default()
        };
        let mut losses = LossPool::default();
        losses.current.house_property = dec!(300000);

        let outcome = engine().run(income, losses);

        assert_eq!(
            outcome.ledger,
            vec![SetOffEntry {
                source: LossSource::current(LossCategory::HouseProperty),
                against: Salary,
                amount: dec!(200000),
            }]
        );
        assert_eq!(outcome.income.salary, dec!(800000));
        assert_eq!(outcome.carried_forward.house_property, dec!(100000));
    }

    #[test]
    fn house_property_loss_below_cap_with_little_income_carries_remainder() {
        let income = IncomePool {
            salary: dec!(50000),
            ..Default::default()
        };
        let mut losses = LossPool::default();
        losses.current.house_property = dec!(150000);

        let outcome = engine().run(income, losses);

        assert_eq!(outcome.income.salary, Decimal::ZERO);
        assert_eq!(outcome.carried_forward.house_property, dec!(100000));
    }

    #[test]
    fn house_property_loss_hits_business_before_salary() {
        let income = IncomePool {
            salary: dec!(500000),
            business: dec!(120000),
            ..Default::default()
        };
        let mut losses = LossPool::default();
        losses.current.house_property = dec!(150000);

        let outcome = engine().run(income, losses);

        assert_eq!(outcome.income.business, Decimal::ZERO);
        assert_eq!(outcome.income.salary, dec!(470000));
    }

    #[test]
    fn business_loss_never_reduces_salary() {
        let income = IncomePool {
            salary: dec!(900000),
            other_sources: dec!(30000),
            ..Default::default()
        };
        let mut losses = LossPool::default();
        losses.current.business_non_speculative = dec!(100000);

        let outcome = engine().run(income, losses);

        assert_eq!(outcome.income.salary, dec!(900000));
        assert_eq!(outcome.income.other_sources, Decimal::ZERO);
        assert_eq!(outcome.carried_forward.business_non_speculative, dec!(70000));
    }

    #[test]
    fn short_term_loss_runs_through_all_gain_buckets_in_order() {
        let income = IncomePool {
            stcg_other: dec!(10000),
            stcg_111a: dec!(10000),
            ltcg_other: dec!(10000),
            ltcg_112a: dec!(10000),
            ..Default::default()
        };
        let mut losses = LossPool::default();
        losses.current.stcl = dec!(35000);

        let outcome = engine().run(income, losses);

        let heads: Vec<IncomeHead> = outcome.ledger.iter().map(|e| e.against).collect();
        assert_eq!(heads, vec![StcgOther, Stcg111a, LtcgOther, Ltcg112a]);
        assert_eq!(outcome.income.ltcg_112a, dec!(5000));
    }

    #[test]
    fn long_term_loss_never_reduces_short_term_gain() {
        let income = IncomePool {
            stcg_other: dec!(50000),
            ..Default::default()
        };
        let mut losses = LossPool::default();
        losses.current.ltcl = dec!(20000);

        let outcome = engine().run(income, losses);

        assert_eq!(outcome.income.stcg_other, dec!(50000));
        assert_eq!(outcome.carried_forward.ltcl, dec!(20000));
        assert!(outcome.ledger.is_empty());
    }

    #[test]
    fn speculative_loss_stays_within_speculative_income() {
        let income = IncomePool {
            business: dec!(100000),
            speculative: dec!(10000),
            ..Default::default()
        };
        let mut losses = LossPool::default();
        losses.current.business_speculative = dec!(25000);

        let outcome = engine().run(income, losses);

        assert_eq!(outcome.income.business, dec!(100000));
        assert_eq!(outcome.carried_forward.business_speculative, dec!(15000));
    }

    // =========================================================================
    // brought-forward set-off tests
    // =========================================================================

    #[test]
    fn brought_forward_order_and_targets() {
        let income = IncomePool {
            house_property: dec!(40000),
            business: dec!(100000),
            salary: dec!(500000),
            ..Default::default()
        };
        let losses = LossPool::from_snapshot(&Losses {
            brought_forward: BroughtForwardLosses {
                unabsorbed_depreciation: Some(dec!(50000)),
                business_non_speculative: Some(dec!(80000)),
                house_property: Some(dec!(10000)),
                ..Default::default()
            },
            current_year: CurrentYearLosses::default(),
        });

        let outcome = engine().run(income, losses);

        assert_eq!(
            outcome.ledger.iter().map(|e| (e.source.to_string(), e.against, e.amount)).collect::<Vec<_>>(),
            vec![
                ("BF Unabsorbed Depreciation".to_string(), HouseProperty, dec!(40000)),
                ("BF Unabsorbed Depreciation".to_string(), BusinessIncome, dec!(10000)),
                ("BF Business Loss".to_string(), BusinessIncome, dec!(80000)),
            ]
        );
        assert_eq!(outcome.income.salary, dec!(500000));
        assert_eq!(outcome.income.business, dec!(10000));
        assert_eq!(outcome.carried_forward.house_property, dec!(10000));
        assert!(outcome.ledger.iter().all(|e| e.source.origin == LossOrigin::BroughtForward));
    }

    #[test]
    fn from_snapshot_ignores_blank_and_negative_entries() {
        let losses = LossPool::from_snapshot(&Losses {
            brought_forward: BroughtForwardLosses {
                stcl: Some(dec!(-100)),
                ..Default::default()
            },
            current_year: CurrentYearLosses {
                race_horses: Some(dec!(700)),
                ..Default::default()
            },
        });

        assert_eq!(losses.brought_forward.stcl, Decimal::ZERO);
        assert_eq!(losses.current.race_horses, dec!(700));
    }

    // =========================================================================
    // conservation
    // =========================================================================

    #[test]
    fn set_off_conserves_income_and_losses() {
        let income = IncomePool {
            salary: dec!(600000),
            house_property: dec!(20000),
            business: dec!(75000),
            speculative: dec!(5000),
            stcg_111a: dec!(12000),
            stcg_other: dec!(8000),
            ltcg_112a: dec!(130000),
            ltcg_other: dec!(9000),
            other_sources: dec!(15000),
            race_horse: dec!(3000),
            winnings: dec!(40000),
        };
        let mut losses = LossPool::from_snapshot(&Losses {
            brought_forward: BroughtForwardLosses {
                house_property: Some(dec!(30000)),
                business_non_speculative: Some(dec!(20000)),
                business_speculative: Some(dec!(9000)),
                ltcl: Some(dec!(60000)),
                stcl: Some(dec!(4000)),
                race_horses: Some(dec!(1000)),
                unabsorbed_depreciation: Some(dec!(25000)),
            },
            current_year: CurrentYearLosses {
                business_non_speculative: Some(dec!(90000)),
                business_speculative: Some(dec!(2000)),
                ltcl: Some(dec!(5000)),
                stcl: Some(dec!(15000)),
                race_horses: Some(dec!(6000)),
            },
        });
        losses.current.house_property = dec!(250000);
        let before_income = income.clone();
        let before_losses = losses.carried_forward();

        let outcome = engine().run(income, losses);

        for head in IncomeHead::ALL {
            let after = outcome.income.get(head);
            assert!(after >= Decimal::ZERO, "{head} went negative");
            assert_eq!(before_income.get(head) - against(&outcome.ledger, head), after, "{head}");
        }
        for category in LossCategory::ALL {
            let left = outcome.carried_forward.get(category);
            assert!(left >= Decimal::ZERO);
            assert_eq!(
                before_losses.get(category) - absorbed(&outcome.ledger, category),
                left,
                "{category:?}"
            );
        }
    }
}
