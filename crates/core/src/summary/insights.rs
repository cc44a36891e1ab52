//! Natural-language observations about the current month.

use rust_decimal::{Decimal, RoundingStrategy};

use super::ratio::{percent_change, percentage_of};
use super::types::PeriodStats;

const EXCELLENT_SAVINGS_THRESHOLD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
const GOOD_SAVINGS_THRESHOLD: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Savings tier of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsTier {
    /// More than 20% of income saved.
    Excellent,
    /// More than 10%, up to 20%.
    Good,
    /// Above zero, up to 10%.
    Positive,
    /// Nothing saved.
    Overspent,
}

impl SavingsTier {
    /// Classifies a savings rate. Lower bounds are exclusive.
    #[must_use]
    pub fn classify(savings_rate: Decimal) -> Self {
        if savings_rate > EXCELLENT_SAVINGS_THRESHOLD {
            Self::Excellent
        } else if savings_rate > GOOD_SAVINGS_THRESHOLD {
            Self::Good
        } else if savings_rate > Decimal::ZERO {
            Self::Positive
        } else {
            Self::Overspent
        }
    }

    /// Message shown for the tier.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent savings rate this month (>20%)",
            Self::Good => "Good savings rate this month (10-20%)",
            Self::Positive => "Positive savings this month (<10%)",
            Self::Overspent => "Spending exceeded income this month - consider budget review",
        }
    }
}

/// Builds the insight list from this month's and last month's totals.
///
/// Month-over-month lines are emitted only when both months have
/// transactions. The savings line is always present.
#[must_use]
pub fn generate_insights(this_month: &PeriodStats, last_month: &PeriodStats) -> Vec<String> {
    let mut insights = Vec::with_capacity(3);

    if this_month.count > 0 && last_month.count > 0 {
        insights.push(change_line("Income", this_month.income, last_month.income));
        insights.push(change_line("Expenses", this_month.expense, last_month.expense));
    }

    let savings_rate = percentage_of(
        this_month.income.saturating_sub(this_month.expense),
        this_month.income,
    );
    insights.push(SavingsTier::classify(savings_rate).message().to_string());

    insights
}

fn change_line(label: &str, current: Decimal, previous: Decimal) -> String {
    match percent_change(current, previous) {
        None if current.is_zero() => format!("{label} unchanged vs last month"),
        None => format!("{label} is new this month (none recorded last month)"),
        Some(change) if change.is_zero() => format!("{label} unchanged vs last month"),
        Some(change) => {
            let direction = if change > Decimal::ZERO {
                "increased"
            } else {
                "decreased"
            };
            format!(
                "{label} {direction} by {}% vs last month",
                one_decimal(change.abs())
            )
        }
    }
}

fn one_decimal(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn stats(income: Decimal, expense: Decimal, count: u64) -> PeriodStats {
        PeriodStats {
            income,
            expense,
            net_balance: income - expense,
            count,
            ..Default::default()
        }
    }

    #[rstest]
    #[case(dec!(20.0001), SavingsTier::Excellent)]
    #[case(dec!(20), SavingsTier::Good)]
    #[case(dec!(10.5), SavingsTier::Good)]
    #[case(dec!(10), SavingsTier::Positive)]
    #[case(dec!(0.01), SavingsTier::Positive)]
    #[case(dec!(0), SavingsTier::Overspent)]
    #[case(dec!(-50), SavingsTier::Overspent)]
    fn test_savings_tier_boundaries(#[case] rate: Decimal, #[case] expected: SavingsTier) {
        assert_eq!(SavingsTier::classify(rate), expected);
    }

    #[test]
    fn test_no_comparison_without_last_month() {
        let insights = generate_insights(&stats(dec!(100), dec!(50), 2), &PeriodStats::default());
        assert_eq!(insights, vec!["Excellent savings rate this month (>20%)"]);
    }

    #[test]
    fn test_change_lines() {
        let insights = generate_insights(
            &stats(dec!(1125), dec!(150), 3),
            &stats(dec!(1000), dec!(200), 2),
        );
        assert_eq!(insights[0], "Income increased by 12.5% vs last month");
        assert_eq!(insights[1], "Expenses decreased by 25.0% vs last month");
    }

    #[test]
    fn test_income_new_this_month() {
        let insights = generate_insights(
            &stats(dec!(500), dec!(100), 2),
            &stats(dec!(0), dec!(100), 1),
        );
        assert_eq!(
            insights[0],
            "Income is new this month (none recorded last month)"
        );
        assert_eq!(insights[1], "Expenses unchanged vs last month");
    }

    #[test]
    fn test_zero_over_zero_is_unchanged() {
        let insights = generate_insights(
            &stats(dec!(0), dec!(100), 1),
            &stats(dec!(0), dec!(80), 1),
        );
        assert_eq!(insights[0], "Income unchanged vs last month");
        assert_eq!(insights[1], "Expenses increased by 25.0% vs last month");
        assert_eq!(
            insights[2],
            "Spending exceeded income this month - consider budget review"
        );
    }

    #[test]
    fn test_savings_tier_just_above_threshold() {
        // 20.004% is excellent; exactly 20% is only good
        let above = stats(dec!(100000), dec!(79996), 2);
        let insights = generate_insights(&above, &PeriodStats::default());
        assert_eq!(insights, vec![SavingsTier::Excellent.message()]);

        let at = stats(dec!(100000), dec!(80000), 2);
        let insights = generate_insights(&at, &PeriodStats::default());
        assert_eq!(insights, vec![SavingsTier::Good.message()]);
    }

    #[test]
    fn test_one_decimal_rounding() {
        assert_eq!(one_decimal(dec!(100)).to_string(), "100.0");
        assert_eq!(one_decimal(dec!(33.333)).to_string(), "33.3");
        assert_eq!(one_decimal(dec!(0.05)).to_string(), "0.1");
    }
}
