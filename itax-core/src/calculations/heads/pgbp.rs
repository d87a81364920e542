//! Profits and gains of business or profession.
//!
//! | Scheme | Assessed income |
//! |--------|-----------------|
//! | None   | net profit + disallowances |
//! | 44AD   | 6% of digital turnover + 8% of other turnover |
//! | 44ADA  | 50% of gross receipts |
//! | 44AE   | heavy: tonnage × 1,000 × months; other: 7,500 × months |
//! | 44B    | 7.5% of aggregate receipts |
//! | 44BB   | 10% of aggregate receipts |
//! | 44BBA  | 5% of aggregate receipts |
//! | 44BBB  | 10% of aggregate receipts |
//!
//! The 43CA stamp-duty adjustment is added under every scheme. Speculative
//! income is kept apart.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::residency::{IncomeKind, ResidencyFilter};
use crate::models::{IncomeSource, Pgbp, PresumptiveScheme, Vehicle44AE, VehicleKind, amount_or_zero};

const RATE_44AD_DIGITAL: Decimal = dec!(0.06);
const RATE_44AD_OTHER: Decimal = dec!(0.08);
const RATE_44ADA: Decimal = dec!(0.50);
const PER_TONNE_MONTH_44AE: Decimal = dec!(1000);
const PER_VEHICLE_MONTH_44AE: Decimal = dec!(7500);
const RATE_44B: Decimal = dec!(0.075);
const RATE_44BB: Decimal = dec!(0.10);
const RATE_44BBA: Decimal = dec!(0.05);
const RATE_44BBB: Decimal = dec!(0.10);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PgbpResult {
    /// Net profit, or presumptive income.
    pub base_amount: Decimal,
    /// Disallowances and the 43CA adjustment.
    pub total_additions: Decimal,
    pub non_speculative: Decimal,
    pub speculative: Decimal,
}

#[derive(Debug, Clone)]
pub struct PgbpCalculator {
    filter: ResidencyFilter,
}

impl PgbpCalculator {
    pub fn new(filter: ResidencyFilter) -> Self {
        Self { filter }
    }

    /// `adjustment_43ca` lives with capital gains in the snapshot but is
    /// business income.
    pub fn calculate(&self, pgbp: &Pgbp, adjustment_43ca: &IncomeSource) -> PgbpResult {
        let value = |source: &IncomeSource| {
            self.filter.taxable_value_of(
                source,
                IncomeKind::Business {
                    controlled_from_india: pgbp.is_controlled_from_india,
                },
            )
        };

        let (base_amount, disallowances) = match pgbp.presumptive_scheme {
            PresumptiveScheme::None => {
                let additions: Decimal = pgbp.additions.sources().into_iter().map(|s| value(s)).sum();
                (value(&pgbp.net_profit), additions)
            }
            PresumptiveScheme::Ad => (
                value(&pgbp.turnover_44ad_digital) * RATE_44AD_DIGITAL
                    + value(&pgbp.turnover_44ad_other) * RATE_44AD_OTHER,
                Decimal::ZERO,
            ),
            PresumptiveScheme::Ada => (value(&pgbp.gross_receipts_44ada) * RATE_44ADA, Decimal::ZERO),
            PresumptiveScheme::Ae => (
                pgbp.vehicles_44ae.iter().map(vehicle_income).sum::<Decimal>(),
                Decimal::ZERO,
            ),
            PresumptiveScheme::B => (value(&pgbp.aggregate_receipts_44b) * RATE_44B, Decimal::ZERO),
            PresumptiveScheme::Bb => (value(&pgbp.aggregate_receipts_44bb) * RATE_44BB, Decimal::ZERO),
            PresumptiveScheme::Bba => {
                (value(&pgbp.aggregate_receipts_44bba) * RATE_44BBA, Decimal::ZERO)
            }
            PresumptiveScheme::Bbb => {
                (value(&pgbp.aggregate_receipts_44bbb) * RATE_44BBB, Decimal::ZERO)
            }
        };

        let total_additions = disallowances + value(adjustment_43ca);

        PgbpResult {
            base_amount,
            total_additions,
            non_speculative: base_amount + total_additions,
            speculative: value(&pgbp.speculative_income),
        }
    }
}

/// Section 44AE income for one goods carriage; months clamp to 0..=12.
pub fn vehicle_income(vehicle: &Vehicle44AE) -> Decimal {
    let months = Decimal::from(vehicle.months.unwrap_or(0).clamp(0, 12));
    match vehicle.kind {
        VehicleKind::Heavy => {
            amount_or_zero(vehicle.tonnage) * PER_TONNE_MONTH_44AE * months
        }
        VehicleKind::Other => PER_VEHICLE_MONTH_44AE * months,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{MAX_INPUT_AMOUNT, ResidentialStatus};

    fn ror() -> PgbpCalculator {
        PgbpCalculator::new(ResidencyFilter::new(ResidentialStatus::ResidentOrdinarilyResident))
    }

    fn heavy(tonnage: Decimal, months: i32) -> Vehicle44AE {
        Vehicle44AE {
            id: "v".into(),
            kind: VehicleKind::Heavy,
            tonnage: Some(tonnage),
            months: Some(months),
        }
    }

    // =========================================================================
    // presumptive scheme tests
    // =========================================================================

    #[test]
    fn scheme_44ad_splits_digital_and_other_turnover() {
        let pgbp = Pgbp {
            presumptive_scheme: PresumptiveScheme::Ad,
            turnover_44ad_digital: IncomeSource::india(dec!(1000000)),
            turnover_44ad_other: IncomeSource::india(dec!(500000)),
            ..Default::default()
        };

        let result = ror().calculate(&pgbp, &IncomeSource::default());

        assert_eq!(result.non_speculative, dec!(100000));
        assert_eq!(result.base_amount, dec!(100000));
    }

    #[test]
    fn scheme_44ada_is_half_of_receipts() {
        let pgbp = Pgbp {
            presumptive_scheme: PresumptiveScheme::Ada,
            gross_receipts_44ada: IncomeSource::india(dec!(2000000)),
            ..Default::default()
        };

        assert_eq!(ror().calculate(&pgbp, &IncomeSource::default()).non_speculative, dec!(1000000));
    }

    #[test]
    fn scheme_44ae_single_heavy_vehicle() {
        assert_eq!(vehicle_income(&heavy(dec!(10), 6)), dec!(60000));
    }

    #[test]
    fn scheme_44ae_clamps_months() {
        assert_eq!(vehicle_income(&heavy(dec!(10), 15)), dec!(120000));
        assert_eq!(vehicle_income(&heavy(dec!(10), -3)), Decimal::ZERO);
    }

    #[test]
    fn scheme_44ae_out_of_range_tonnage_counts_as_zero() {
        let absurd = Decimal::from_scientific("1e28").unwrap();

        assert_eq!(vehicle_income(&heavy(absurd, 12)), Decimal::ZERO);
        assert_eq!(vehicle_income(&heavy(MAX_INPUT_AMOUNT, 12)), MAX_INPUT_AMOUNT * dec!(12000));
    }

    #[test]
    fn scheme_44ae_sums_vehicles() {
        let pgbp = Pgbp {
            presumptive_scheme: PresumptiveScheme::Ae,
            vehicles_44ae: vec![
                heavy(dec!(10), 6),
                Vehicle44AE {
                    id: "light".into(),
                    kind: VehicleKind::Other,
                    tonnage: None,
                    months: Some(12),
                },
            ],
            ..Default::default()
        };

        assert_eq!(ror().calculate(&pgbp, &IncomeSource::default()).non_speculative, dec!(150000));
    }

    #[test]
    fn fixed_percentage_schemes() {
        let receipts = IncomeSource::india(dec!(1000000));
        let cases = [
            (PresumptiveScheme::B, dec!(75000)),
            (PresumptiveScheme::Bb, dec!(100000)),
            (PresumptiveScheme::Bba, dec!(50000)),
            (PresumptiveScheme::Bbb, dec!(100000)),
        ];

        for (scheme, expected) in cases {
            let pgbp = Pgbp {
                presumptive_scheme: scheme,
                aggregate_receipts_44b: receipts.clone(),
                aggregate_receipts_44bb: receipts.clone(),
                aggregate_receipts_44bba: receipts.clone(),
                aggregate_receipts_44bbb: receipts.clone(),
                ..Default::default()
            };
            assert_eq!(
                ror().calculate(&pgbp, &IncomeSource::default()).non_speculative,
                expected,
                "{scheme:?}"
            );
        }
    }

    // =========================================================================
    // regular computation tests
    // =========================================================================

    #[test]
    fn regular_adds_disallowances_and_43ca() {
        let mut pgbp = Pgbp {
            net_profit: IncomeSource::india(dec!(400000)),
            speculative_income: IncomeSource::india(dec!(25000)),
            ..Default::default()
        };
        pgbp.additions.disallowance_40a3_cash_payment = IncomeSource::india(dec!(30000));
        pgbp.additions.bogus_purchases = IncomeSource::india(dec!(10000));

        let result = ror().calculate(&pgbp, &IncomeSource::india(dec!(5000)));

        assert_eq!(result.base_amount, dec!(400000));
        assert_eq!(result.total_additions, dec!(45000));
        assert_eq!(result.non_speculative, dec!(445000));
        assert_eq!(result.speculative, dec!(25000));
    }

    #[test]
    fn presumptive_scheme_ignores_net_profit_but_keeps_43ca() {
        let pgbp = Pgbp {
            presumptive_scheme: PresumptiveScheme::Ada,
            net_profit: IncomeSource::india(dec!(999999)),
            gross_receipts_44ada: IncomeSource::india(dec!(100000)),
            ..Default::default()
        };

        let result = ror().calculate(&pgbp, &IncomeSource::india(dec!(1000)));

        assert_eq!(result.non_speculative, dec!(51000));
    }

    #[test]
    fn rnor_foreign_profit_counts_when_controlled_from_india() {
        let filter = ResidencyFilter::new(ResidentialStatus::ResidentNotOrdinarilyResident);
        let mut pgbp = Pgbp {
            net_profit: IncomeSource::outside_india(dec!(100000)),
            ..Default::default()
        };

        let calculator = PgbpCalculator::new(filter);
        assert_eq!(
            calculator.calculate(&pgbp, &IncomeSource::default()).non_speculative,
            Decimal::ZERO
        );

        pgbp.is_controlled_from_india = true;
        assert_eq!(
            calculator.calculate(&pgbp, &IncomeSource::default()).non_speculative,
            dec!(100000)
        );
    }
}
