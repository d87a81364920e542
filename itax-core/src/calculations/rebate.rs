//! Rebate u/s 87A and health and education cess.

use rust_decimal::Decimal;

use crate::calculations::common::{min, non_negative};
use crate::models::{AgeBand, RebateRule};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RebateCessResult {
    pub rebate_87a: Decimal,
    pub tax_after_rebate: Decimal,
    pub cess: Decimal,
}

impl RebateCessResult {
    /// Tax payable before foreign tax relief.
    pub fn total(&self) -> Decimal {
        self.tax_after_rebate + self.cess
    }
}

/// The rebate is a cliff: full at the ceiling, nothing a rupee above it.
pub fn rebate_87a(
    rule: Option<&RebateRule>,
    net_taxable_income: Decimal,
    age: AgeBand,
    tax_before_rebate: Decimal,
) -> Decimal {
    match rule {
        Some(rule)
            if net_taxable_income <= rule.income_ceiling
                && !(rule.exclude_super_senior && age == AgeBand::Above80) =>
        {
            min(non_negative(tax_before_rebate), rule.max_rebate)
        }
        _ => Decimal::ZERO,
    }
}

pub fn apply_cess(tax_before_rebate: Decimal, rebate: Decimal, cess_rate: Decimal) -> RebateCessResult {
    let tax_after_rebate = non_negative(tax_before_rebate - rebate);
    RebateCessResult {
        rebate_87a: rebate,
        tax_after_rebate,
        cess: tax_after_rebate * cess_rate,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn rule() -> RebateRule {
        RebateRule {
            income_ceiling: dec!(500000),
            max_rebate: dec!(12500),
            exclude_super_senior: false,
        }
    }

    // =========================================================================
    // rebate_87a tests
    // =========================================================================

    #[test]
    fn rebate_at_ceiling_and_cliff_above() {
        assert_eq!(rebate_87a(Some(&rule()), dec!(500000), AgeBand::Below60, dec!(12500)), dec!(12500));
        assert_eq!(rebate_87a(Some(&rule()), dec!(500001), AgeBand::Below60, dec!(12500.05)), Decimal::ZERO);
    }

    #[test]
    fn rebate_limited_to_tax() {
        assert_eq!(rebate_87a(Some(&rule()), dec!(400000), AgeBand::Below60, dec!(7500)), dec!(7500));
    }

    #[test]
    fn rebate_excludes_super_senior_when_configured() {
        let rule = RebateRule {
            income_ceiling: dec!(500000),
            max_rebate: dec!(2000),
            exclude_super_senior: true,
        };

        assert_eq!(rebate_87a(Some(&rule), dec!(450000), AgeBand::Above80, dec!(5000)), Decimal::ZERO);
        assert_eq!(rebate_87a(Some(&rule), dec!(450000), AgeBand::From60To80, dec!(5000)), dec!(2000));
    }

    #[test]
    fn no_rule_no_rebate() {
        assert_eq!(rebate_87a(None, dec!(100000), AgeBand::Below60, dec!(1000)), Decimal::ZERO);
    }

    // =========================================================================
    // apply_cess tests
    // =========================================================================

    #[test]
    fn cess_on_tax_after_rebate() {
        let result = apply_cess(dec!(112500), Decimal::ZERO, dec!(0.04));

        assert_eq!(result.cess, dec!(4500));
        assert_eq!(result.total(), dec!(117000));
    }

    #[test]
    fn full_rebate_leaves_no_cess() {
        let result = apply_cess(dec!(12500), dec!(12500), dec!(0.04));

        assert_eq!(result.total(), Decimal::ZERO);
    }
}
