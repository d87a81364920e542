use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{min, non_negative};
use crate::calculations::residency::ResidencyFilter;
use crate::models::{DeductionLimits, Salary, TaxRegime, TaxpayerType};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalaryResult {
    /// Salary, perquisites and profits in lieu.
    pub components: Decimal,
    /// Disallowed exemptions and deductions added back.
    pub disallowances: Decimal,
    /// `components + disallowances`.
    pub gross: Decimal,
    /// Deducted at the gross-total-income level, not from this head.
    pub standard_deduction: Decimal,
}

/// Salary head. Income is assessed as reported plus disallowances.
#[derive(Debug, Clone)]
pub struct SalaryCalculator<'a> {
    limits: &'a DeductionLimits,
    filter: ResidencyFilter,
}

impl<'a> SalaryCalculator<'a> {
    pub fn new(limits: &'a DeductionLimits, filter: ResidencyFilter) -> Self {
        Self { limits, filter }
    }

    pub fn calculate(
        &self,
        salary: &Salary,
        taxpayer_type: TaxpayerType,
        regime: TaxRegime,
    ) -> SalaryResult {
        let components = self.filter.sum(salary.components());
        let disallowances = self.filter.sum(salary.disallowances());
        let gross = components + disallowances;

        let standard_deduction = if salary.standard_deduction_allowed_previously {
            debug!("standard deduction already allowed in earlier assessment");
            Decimal::ZERO
        } else {
            self.standard_deduction(gross, taxpayer_type, regime)
        };

        SalaryResult {
            components,
            disallowances,
            gross,
            standard_deduction,
        }
    }

    /// Individuals only, capped at gross salary. The new regime allows one
    /// only in years that configure it.
    fn standard_deduction(
        &self,
        gross: Decimal,
        taxpayer_type: TaxpayerType,
        regime: TaxRegime,
    ) -> Decimal {
        if taxpayer_type != TaxpayerType::Individual || gross <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let limit = match regime {
            TaxRegime::Old => self.limits.standard_deduction,
            TaxRegime::New => self.limits.standard_deduction_new_regime,
        };
        non_negative(min(gross, limit))
    }
}
