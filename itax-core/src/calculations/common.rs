//! Rounding and comparison helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole rupees with midpoints going up, so `-2.5` becomes `-2`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_to_rupee;
///
/// assert_eq!(round_to_rupee(dec!(2.5)), dec!(3));
/// assert_eq!(round_to_rupee(dec!(-2.5)), dec!(-2));
/// assert_eq!(round_to_rupee(dec!(-2.51)), dec!(-3));
/// ```
pub fn round_to_rupee(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Returns the larger of two values.
pub fn max(a: Decimal, b: Decimal) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the smaller of two values.
pub fn min(a: Decimal, b: Decimal) -> Decimal {
    if a < b { a } else { b }
}

/// Clamps negatives to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    // =========================================================================
    // round_to_rupee tests
    // =========================================================================

    #[test]
    fn round_to_rupee_rounds_positive_midpoint_up() {
        assert_eq!(round_to_rupee(dec!(104999.5)), dec!(105000));
    }

    #[test]
    fn round_to_rupee_rounds_negative_midpoint_toward_zero() {
        assert_eq!(round_to_rupee(dec!(-150000.5)), dec!(-150000));
    }

    #[test]
    fn round_to_rupee_keeps_whole_values() {
        assert_eq!(round_to_rupee(dec!(-200000)), dec!(-200000));
        assert_eq!(round_to_rupee(dec!(0)), dec!(0));
    }

    #[test]
    fn round_to_rupee_rounds_below_midpoint_down() {
        assert_eq!(round_to_rupee(dec!(10.49)), dec!(10));
    }

    // =========================================================================
    // max / min / non_negative tests
    // =========================================================================

    #[test]
    fn max_and_min_pick_correct_side() {
        assert_eq!(max(dec!(-50.00), dec!(50.00)), dec!(50.00));
        assert_eq!(min(dec!(-50.00), dec!(50.00)), dec!(-50.00));
    }

    #[test]
    fn non_negative_clamps_losses() {
        assert_eq!(non_negative(dec!(-1)), dec!(0));
        assert_eq!(non_negative(dec!(7)), dec!(7));
    }
}
