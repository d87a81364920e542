//! House property head, computed per property and summed.
//!
//! Self-occupied properties, up to the year's limit, have a nil annual value
//! and an interest deduction capped in aggregate. Self-occupied properties
//! beyond the limit are deemed let out. Let-out properties get the 30%
//! deduction under section 24(a) and uncapped interest.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::{min, non_negative, round_to_rupee};
use crate::calculations::residency::ResidencyFilter;
use crate::models::{HouseProperty, PropertyComputation, YearConfig};

const STANDARD_DEDUCTION_24A: Decimal = dec!(0.30);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HousePropertyResult {
    /// Sum of per-property income; negative is a loss.
    pub income: Decimal,
    pub nav: Decimal,
    pub standard_deduction_24a: Decimal,
    pub properties: Vec<PropertyComputation>,
}

#[derive(Debug, Clone)]
pub struct HousePropertyCalculator<'a> {
    config: &'a YearConfig,
    filter: ResidencyFilter,
}

impl<'a> HousePropertyCalculator<'a> {
    pub fn new(config: &'a YearConfig, filter: ResidencyFilter) -> Self {
        Self { config, filter }
    }

    pub fn calculate(&self, properties: &[HouseProperty]) -> HousePropertyResult {
        let mut self_occupied_seen = 0usize;
        let mut interest_cap_left = self.config.deduction_limits.hp_interest_limit_self_occupied;
        let mut result = HousePropertyResult::default();

        for property in properties {
            let computation = if property.is_self_occupied
                && self_occupied_seen < self.config.self_occupied_property_limit
            {
                self_occupied_seen += 1;
                self.self_occupied(property, &mut interest_cap_left)
            } else {
                let deemed = property.is_self_occupied;
                if deemed {
                    debug!(
                        limit = self.config.self_occupied_property_limit,
                        "self-occupied property beyond limit treated as let out"
                    );
                }
                self.let_out(property, deemed)
            };

            result.income += computation.income;
            result.nav += computation.nav;
            result.standard_deduction_24a += computation.standard_deduction_24a;
            result.properties.push(computation);
        }

        result
    }

    fn self_occupied(
        &self,
        property: &HouseProperty,
        interest_cap_left: &mut Decimal,
    ) -> PropertyComputation {
        let interest = self.filter.taxable_value(&property.interest_on_loan);
        let interest_24b = non_negative(min(interest, *interest_cap_left));
        *interest_cap_left -= interest_24b;

        PropertyComputation {
            self_occupied: true,
            deemed_let_out: false,
            nav: Decimal::ZERO,
            standard_deduction_24a: Decimal::ZERO,
            interest_24b,
            income: round_to_rupee(-interest_24b),
        }
    }

    fn let_out(&self, property: &HouseProperty, deemed_let_out: bool) -> PropertyComputation {
        let gross_rent = self.filter.taxable_value(&property.gross_rent);
        let municipal_taxes = self.filter.taxable_value(&property.municipal_taxes);
        let interest_24b = self.filter.taxable_value(&property.interest_on_loan);

        let nav = non_negative(gross_rent - municipal_taxes);
        let standard_deduction_24a = nav * STANDARD_DEDUCTION_24A;
        let income = nav - standard_deduction_24a - interest_24b;

        PropertyComputation {
            self_occupied: property.is_self_occupied,
            deemed_let_out,
            nav: round_to_rupee(nav),
            standard_deduction_24a: round_to_rupee(standard_deduction_24a),
            interest_24b,
            income: round_to_rupee(income),
        }
    }
}
