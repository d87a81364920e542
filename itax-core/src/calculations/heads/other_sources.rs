use rust_decimal::Decimal;

use crate::calculations::residency::ResidencyFilter;
use crate::models::{DeemedIncome, Deductions, OtherSources};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OtherSourcesResult {
    pub other_sources: Decimal,
    /// Taxed at a flat rate.
    pub winnings: Decimal,
    /// Set off only against race-horse losses.
    pub race_horse_income: Decimal,
    /// Exempt; reported only.
    pub agricultural_income: Decimal,
}

#[derive(Debug, Clone)]
pub struct OtherSourcesCalculator {
    filter: ResidencyFilter,
}

impl OtherSourcesCalculator {
    pub fn new(filter: ResidencyFilter) -> Self {
        Self { filter }
    }

    pub fn calculate(&self, other: &OtherSources) -> OtherSourcesResult {
        OtherSourcesResult {
            other_sources: self.filter.sum(other.additions()),
            winnings: self.filter.taxable_value(&other.winnings),
            race_horse_income: self.filter.taxable_value(&other.race_horse_income),
            agricultural_income: self.filter.taxable_value(&other.agricultural_income),
        }
    }
}

/// Unexplained credits, money, investments and expenditure (sections 68-69D).
pub fn deemed_income(filter: &ResidencyFilter, deemed: &DeemedIncome) -> Decimal {
    filter.sum(deemed.sources())
}

/// Chapter VI-A claims found not allowable, added back to income.
pub fn disallowed_deductions(filter: &ResidencyFilter, deductions: &Deductions) -> Decimal {
    filter.sum(deductions.sources())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{IncomeSource, ResidentialStatus};

    fn ror() -> ResidencyFilter {
        ResidencyFilter::new(ResidentialStatus::ResidentOrdinarilyResident)
    }

    #[test]
    fn winnings_race_horses_and_agriculture_are_kept_apart() {
        let other = OtherSources {
            other_incomes: IncomeSource::india(dec!(40000)),
            gifts_56_2_x: IncomeSource::india(dec!(60000)),
            winnings: IncomeSource::india(dec!(100000)),
            race_horse_income: IncomeSource::india(dec!(30000)),
            agricultural_income: IncomeSource::india(dec!(250000)),
            ..Default::default()
        };

        let result = OtherSourcesCalculator::new(ror()).calculate(&other);

        assert_eq!(
            result,
            OtherSourcesResult {
                other_sources: dec!(100000),
                winnings: dec!(100000),
                race_horse_income: dec!(30000),
                agricultural_income: dec!(250000),
            }
        );
    }

    #[test]
    fn deemed_income_sums_sections_68_to_69d() {
        let deemed = DeemedIncome {
            sec68_cash_credits: IncomeSource::india(dec!(100000)),
            sec69c_unexplained_expenditure: IncomeSource::india(dec!(50000)),
            ..Default::default()
        };

        assert_eq!(deemed_income(&ror(), &deemed), dec!(150000));
    }

    #[test]
    fn disallowed_deductions_respect_residency() {
        let deductions = Deductions {
            c80: IncomeSource::india(dec!(150000)),
            d80: IncomeSource::outside_india(dec!(25000)),
            ..Default::default()
        };

        assert_eq!(disallowed_deductions(&ror(), &deductions), dec!(175000));
        assert_eq!(
            disallowed_deductions(&ResidencyFilter::new(ResidentialStatus::NonResident), &deductions),
            dec!(150000)
        );
    }
}
