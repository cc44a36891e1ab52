//! Zero-guarded, overflow-safe ratios and sums.
//!
//! Every total, average and percentage in reports goes through these
//! helpers. A zero denominator produces zero and an out-of-range result
//! saturates at `Decimal::MAX` or `Decimal::MIN`, so no input can panic.

use rust_decimal::Decimal;

fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// Sums decimals, saturating instead of overflowing.
#[must_use]
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `numerator / denominator`, or zero when the denominator is zero.
#[must_use]
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        saturated(numerator.is_sign_negative() != denominator.is_sign_negative())
    })
}

/// `part / whole * 100`, or zero when `whole` is zero.
#[must_use]
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    safe_div(part, whole).saturating_mul(Decimal::ONE_HUNDRED)
}

/// Relative change from `previous` to `current` in percent.
///
/// Returns `None` when `previous` is zero: the change is not a number then.
#[must_use]
pub fn percent_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        None
    } else {
        Some(percentage_of(current.saturating_sub(previous), previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_safe_div_by_zero() {
        assert_eq!(safe_div(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(dec!(10), dec!(4)), dec!(2.5));
    }

    #[test]
    fn test_safe_div_saturates() {
        let tiny = Decimal::new(1, 27);
        assert_eq!(safe_div(Decimal::MAX, tiny), Decimal::MAX);
        assert_eq!(safe_div(Decimal::MIN, tiny), Decimal::MIN);
        assert_eq!(safe_div(Decimal::MAX, -tiny), Decimal::MIN);
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(dec!(85), dec!(100)), dec!(85));
        assert_eq!(percentage_of(dec!(85), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage_of(dec!(80.004), dec!(100)), dec!(80.004));
    }

    #[test]
    fn test_percentage_of_saturates() {
        assert_eq!(percentage_of(dec!(1000), Decimal::new(1, 27)), Decimal::MAX);
        assert_eq!(percentage_of(Decimal::MAX, Decimal::ONE), Decimal::MAX);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(dec!(150), dec!(200)), Some(dec!(-25)));
        assert_eq!(percent_change(dec!(0), dec!(1000)), Some(dec!(-100)));
        assert_eq!(percent_change(dec!(5), Decimal::ZERO), None);
        assert_eq!(percent_change(Decimal::ZERO, Decimal::ZERO), None);
        assert_eq!(percent_change(Decimal::MAX, Decimal::ONE), Some(Decimal::MAX));
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([dec!(1.5), dec!(2.25)]), dec!(3.75));
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
    }
}
