//! Foreign income: taxability, Indian tax and foreign tax credit.
//!
//! Taxability is decided per item before set-off so that taxable foreign
//! income joins the domestic income pool. Tax and credit are worked out
//! after the base tax is known.
//!
//! | Status | Taxable when                                        |
//! |--------|-----------------------------------------------------|
//! | ROR    | always                                              |
//! | RNOR   | business income of a business controlled from India |
//! | NR     | never                                               |
//!
//! A taxable item under a treaty with a negotiated rate of zero is exempt.
//! Credit needs Form 67: under a treaty it is the lower of foreign tax and
//! Indian tax on the item (s. 90/90A); without one it is the lower of
//! foreign tax and the item taxed at the average rate (s. 91).

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::min;
use crate::calculations::set_off::IncomePool;
use crate::calculations::slabs::{NormalRate, slab_tax};
use crate::models::{
    IncomeHead, IncomeNature, InternationalIncomeItem, InternationalItemComputation,
    InternationalSummary, ResidentialStatus, SpecialRates, SpecialSection,
};

/// Head a taxable foreign item is pooled into.
pub fn target_head(nature: IncomeNature) -> IncomeHead {
    match nature {
        IncomeNature::Salary => IncomeHead::Salary,
        IncomeNature::BusinessProfessionalIncome => IncomeHead::BusinessIncome,
        IncomeNature::LongTermCapitalGain => IncomeHead::LtcgOther,
        IncomeNature::ShortTermCapitalGain => IncomeHead::StcgOther,
        _ => IncomeHead::OtherSources,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessedItem<'a> {
    pub item: &'a InternationalIncomeItem,
    pub taxable: bool,
    pub amount: Decimal,
    pub rule: String,
}

/// Foreign income items with their taxability decided.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForeignIncome<'a> {
    items: Vec<AssessedItem<'a>>,
}

impl<'a> ForeignIncome<'a> {
    pub fn assess(
        items: &'a [InternationalIncomeItem],
        status: ResidentialStatus,
        controlled_from_india: bool,
    ) -> Self {
        let items = items
            .iter()
            .map(|item| Self::assess_item(item, status, controlled_from_india))
            .collect();
        Self { items }
    }

    fn assess_item(
        item: &'a InternationalIncomeItem,
        status: ResidentialStatus,
        controlled_from_india: bool,
    ) -> AssessedItem<'a> {
        let (mut taxable, mut rule) = match status {
            ResidentialStatus::ResidentOrdinarilyResident => (true, String::new()),
            ResidentialStatus::ResidentNotOrdinarilyResident => {
                if item.nature == IncomeNature::BusinessProfessionalIncome && controlled_from_india {
                    (true, "Taxable (Business controlled from India)".to_string())
                } else {
                    (false, "Not Taxable (RNOR - Assumed received outside India)".to_string())
                }
            }
            ResidentialStatus::NonResident => (false, "Not Taxable (NR)".to_string()),
        };

        if taxable && item.is_treaty_exempt() {
            taxable = false;
            rule = format!("Exempt under DTAA Art. {}", article(item));
        }

        AssessedItem {
            item,
            taxable,
            amount: item.assessable_amount(),
            rule,
        }
    }

    pub fn items(&self) -> &[AssessedItem<'a>] {
        &self.items
    }

    fn taxable(&self) -> impl Iterator<Item = &AssessedItem<'a>> {
        self.items.iter().filter(|a| a.taxable)
    }

    pub fn add_to_pool(&self, pool: &mut IncomePool) {
        for assessed in self.taxable() {
            pool.add(target_head(assessed.item.nature), assessed.amount);
        }
    }

    pub fn net_income_added(&self) -> Decimal {
        self.taxable().map(|a| a.amount).sum()
    }

    /// Taxable foreign income with no special section, taxed with normal income.
    pub fn normally_taxed(&self) -> Decimal {
        self.taxable()
            .filter(|a| a.item.special_section == SpecialSection::None)
            .map(|a| a.amount)
            .sum()
    }
}

fn article(item: &InternationalIncomeItem) -> &str {
    if item.applicable_dtaa_article.is_empty() {
        "N/A"
    } else {
        &item.applicable_dtaa_article
    }
}

/// Works out Indian tax and credit for each item once base tax is known.
#[derive(Debug, Clone)]
pub struct ForeignTaxCreditCalculator<'a> {
    rates: &'a SpecialRates,
    normal: NormalRate<'a>,
}

impl<'a> ForeignTaxCreditCalculator<'a> {
    pub fn new(rates: &'a SpecialRates, normal: NormalRate<'a>) -> Self {
        Self { rates, normal }
    }

    /// `normal_income` is the income taxed at normal rates, foreign income
    /// included; `average_rate` is tax before relief over net taxable income.
    pub fn calculate(
        &self,
        foreign: &ForeignIncome<'_>,
        normal_income: Decimal,
        average_rate: Decimal,
    ) -> InternationalSummary {
        let normally_taxed = foreign.normally_taxed();
        let tax_on_normally_taxed = match self.normal {
            NormalRate::Slabs(slabs) if normally_taxed > Decimal::ZERO => {
                slab_tax(normal_income, slabs) - slab_tax(normal_income - normally_taxed, slabs)
            }
            _ => Decimal::ZERO,
        };

        let mut summary = InternationalSummary {
            net_income_added: foreign.net_income_added(),
            ..Default::default()
        };

        for assessed in foreign.items() {
            let computation = if assessed.taxable {
                self.taxable_item(assessed, normally_taxed, tax_on_normally_taxed, average_rate)
            } else {
                untaxed_item(assessed)
            };
            summary.tax_on_income += computation.indian_tax;
            summary.total_ftc_allowed += computation.total_ftc;
            summary.itemized.push(computation);
        }

        debug!(
            items = summary.itemized.len(),
            tax_on_income = %summary.tax_on_income,
            total_ftc = %summary.total_ftc_allowed,
            "foreign tax credit computed"
        );
        summary
    }

    fn taxable_item(
        &self,
        assessed: &AssessedItem<'_>,
        normally_taxed: Decimal,
        tax_on_normally_taxed: Decimal,
        average_rate: Decimal,
    ) -> InternationalItemComputation {
        let item = assessed.item;
        let amount = assessed.amount;

        let (indian_tax, rate) = match (self.special_rate(item), self.normal) {
            (Some(rate), _) => (amount * rate, rate),
            (None, NormalRate::Slabs(_)) => {
                let tax = if normally_taxed > Decimal::ZERO {
                    amount / normally_taxed * tax_on_normally_taxed
                } else {
                    Decimal::ZERO
                };
                let rate = if amount > Decimal::ZERO {
                    tax / amount
                } else {
                    Decimal::ZERO
                };
                (tax, rate)
            }
            (None, NormalRate::Flat(_)) => (amount * average_rate, average_rate),
        };

        let paid = item.foreign_tax_paid();
        let (ftc_90_90a, ftc_91, rule) = match (item.form67_filed, item.dtaa_applicable) {
            (false, _) => (
                Decimal::ZERO,
                Decimal::ZERO,
                "Relief not claimed (Form 67 not filed)".to_string(),
            ),
            (true, true) => (
                min(paid, indian_tax),
                Decimal::ZERO,
                format!("Sec 90/90A (Art. {})", article(item)),
            ),
            (true, false) => (
                Decimal::ZERO,
                min(paid, amount * average_rate),
                "Sec 91".to_string(),
            ),
        };
        let total_ftc = ftc_90_90a + ftc_91;

        InternationalItemComputation {
            id: item.id.clone(),
            country: item.country.clone(),
            nature: item.nature,
            amount_in_inr: item.amount_in_inr.unwrap_or(Decimal::ZERO),
            tax_paid_in_inr: paid,
            applicable_rule: rule,
            indian_tax,
            ftc_90_90a,
            ftc_91,
            total_ftc,
            net_tax: indian_tax - total_ftc,
            applicable_rate: rate,
        }
    }

    fn special_rate(&self, item: &InternationalIncomeItem) -> Option<Decimal> {
        let r = self.rates;
        let rate = match item.special_section {
            SpecialSection::None => return None,
            SpecialSection::S115A => match item.nature {
                IncomeNature::Dividend | IncomeNature::InterestIncome => {
                    r.foreign_115a_dividend_interest
                }
                _ => r.foreign_115a_royalty_fts,
            },
            SpecialSection::S115AB if item.is_ltcg => r.offshore_fund_ltcg_115ab,
            SpecialSection::S115AB => r.offshore_fund_income_115ab,
            SpecialSection::S115AC | SpecialSection::S115ACA if item.is_ltcg => r.gdr_ltcg_115ac,
            SpecialSection::S115AC | SpecialSection::S115ACA => r.gdr_income_115ac,
            SpecialSection::S115AD if item.is_ltcg => r.fii_ltcg_115ad,
            SpecialSection::S115AD if item.nature == IncomeNature::InterestIncome => {
                r.fii_interest_115ad
            }
            SpecialSection::S115AD => r.fii_stcg_other_115ad,
            SpecialSection::S115AE => r.specified_fund_income_115ae,
            SpecialSection::S115BBA => r.foreign_115bba,
        };
        Some(rate)
    }
}

fn untaxed_item(assessed: &AssessedItem<'_>) -> InternationalItemComputation {
    let item = assessed.item;
    InternationalItemComputation {
        id: item.id.clone(),
        country: item.country.clone(),
        nature: item.nature,
        amount_in_inr: item.amount_in_inr.unwrap_or(Decimal::ZERO),
        tax_paid_in_inr: item.foreign_tax_paid(),
        applicable_rule: assessed.rule.clone(),
        indian_tax: Decimal::ZERO,
        ftc_90_90a: Decimal::ZERO,
        ftc_91: Decimal::ZERO,
        total_ftc: Decimal::ZERO,
        net_tax: Decimal::ZERO,
        applicable_rate: Decimal::ZERO,
    }
}
