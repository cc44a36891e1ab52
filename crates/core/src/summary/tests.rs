//! Property-based and scenario tests for the summary module.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_shared::types::{TransactionId, UserId};

use super::period::Month;
use super::service::SummaryService;
use crate::transaction::{Transaction, TransactionKind};

fn tx(kind: TransactionKind, category: &str, amount: Decimal, on: NaiveDate) -> Transaction {
    Transaction {
        id: TransactionId::new(),
        owner_id: UserId::new(),
        kind,
        category: category.to_string(),
        amount,
        occurred_on: on,
        note: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        any::<bool>(),
        0usize..6,
        0i64..10_000_000,
        -900i64..120,
    )
        .prop_map(|(is_income, cat, cents, day_offset)| {
            let kind = if is_income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let on = date(2024, 6, 15) + chrono::Duration::days(day_offset);
            tx(kind, &format!("cat-{cat}"), Decimal::new(cents, 2), on)
        })
}

proptest! {
    /// Net balance is exactly income minus expense.
    #[test]
    fn test_net_balance_is_exact(txs in prop::collection::vec(arb_transaction(), 0..60)) {
        let stats = SummaryService::compute_period_stats(&txs);
        prop_assert_eq!(stats.net_balance, stats.income - stats.expense);
        prop_assert_eq!(stats.count, txs.len() as u64);
    }

    /// Without income the savings rate is zero.
    #[test]
    fn test_savings_rate_zero_without_income(
        txs in prop::collection::vec(arb_transaction(), 1..40),
    ) {
        let expenses: Vec<Transaction> = txs
            .into_iter()
            .map(|mut t| { t.kind = TransactionKind::Expense; t })
            .collect();
        let stats = SummaryService::compute_period_stats(&expenses);
        prop_assert_eq!(stats.income, Decimal::ZERO);
        prop_assert_eq!(stats.savings_rate, Decimal::ZERO);
    }

    /// The trend always has twelve buckets and counts every in-window transaction.
    #[test]
    fn test_trend_has_twelve_buckets(txs in prop::collection::vec(arb_transaction(), 0..80)) {
        let today = date(2024, 6, 15);
        let trend = SummaryService::monthly_trend(&txs, today);

        prop_assert_eq!(trend.len(), 12);

        let first = Month::of(today).offset(-11);
        for (i, point) in trend.iter().enumerate() {
            let expected = first.offset(i32::try_from(i).unwrap());
            prop_assert_eq!((point.year, point.month_index), (expected.year, expected.month0));
        }

        let in_window = txs
            .iter()
            .filter(|t| {
                let m = Month::of(t.occurred_on);
                m >= first && m <= Month::of(today)
            })
            .count() as u64;
        let bucketed: u64 = trend.iter().map(|p| p.stats.count).sum();
        prop_assert_eq!(bucketed, in_window);
    }

    /// Same input and reference instant give the same report.
    #[test]
    fn test_summary_is_deterministic(txs in prop::collection::vec(arb_transaction(), 1..50)) {
        let now = at(2024, 6, 15);
        let first = SummaryService::compute_financial_summary(&txs, now).unwrap();
        let second = SummaryService::compute_financial_summary(&txs, now).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Rankings never exceed five entries and are sorted descending.
    #[test]
    fn test_rankings_sorted(txs in prop::collection::vec(arb_transaction(), 1..80)) {
        let summary = SummaryService::compute_financial_summary(&txs, at(2024, 6, 15)).unwrap();
        for ranking in [&summary.top_expense_categories, &summary.top_income_categories] {
            prop_assert!(ranking.len() <= 5);
            prop_assert!(ranking.windows(2).all(|w| w[0].amount >= w[1].amount));
            prop_assert!(ranking.iter().all(|r| r.amount > Decimal::ZERO));
        }
    }
}

#[test]
fn test_empty_period_has_zero_average() {
    let stats = SummaryService::compute_period_stats(&Vec::<Transaction>::new());
    assert_eq!(stats.count, 0);
    assert_eq!(stats.avg_transaction, Decimal::ZERO);
    assert_eq!(stats.savings_rate, Decimal::ZERO);
}

#[test]
fn test_ratios_are_not_rounded() {
    let txs = vec![
        tx(TransactionKind::Income, "Salary", dec!(100000), date(2024, 3, 1)),
        tx(TransactionKind::Expense, "Rent", dec!(79996), date(2024, 3, 2)),
        tx(TransactionKind::Expense, "Food", dec!(1), date(2024, 3, 3)),
    ];
    let stats = SummaryService::compute_period_stats(&txs);

    assert_eq!(stats.savings_rate, dec!(20.003));
    assert_eq!(stats.avg_transaction, dec!(59999));
}

#[test]
fn test_totals_saturate_instead_of_overflowing() {
    let on = date(2024, 3, 1);
    let txs = vec![
        tx(TransactionKind::Income, "Salary", Decimal::MAX, on),
        tx(TransactionKind::Income, "Bonus", Decimal::MAX, on),
        tx(TransactionKind::Expense, "Rent", Decimal::MAX, on),
    ];
    let stats = SummaryService::compute_period_stats(&txs);

    assert_eq!(stats.income, Decimal::MAX);
    assert_eq!(stats.expense, Decimal::MAX);
    assert_eq!(stats.net_balance, Decimal::ZERO);
    assert_eq!(stats.count, 3);

    let breakdown = SummaryService::category_breakdown(&[
        tx(TransactionKind::Income, "Salary", Decimal::MAX, on),
        tx(TransactionKind::Income, "Salary", Decimal::MAX, on),
    ]);
    assert_eq!(breakdown[0].income, Decimal::MAX);

    let summary = SummaryService::compute_financial_summary(&txs, at(2024, 3, 15)).unwrap();
    assert_eq!(summary.periods.this_month.income, Decimal::MAX);
}

#[test]
fn test_empty_input_has_nothing_to_report() {
    let result = SummaryService::compute_financial_summary(&[], at(2024, 2, 15));
    assert_eq!(result, Err(super::ReportError::NoTransactions));
}

#[test]
fn test_month_over_month_scenario() {
    let txs = vec![
        tx(TransactionKind::Income, "Salary", dec!(1000), date(2024, 1, 5)),
        tx(TransactionKind::Expense, "Food", dec!(200), date(2024, 1, 10)),
        tx(TransactionKind::Expense, "Food", dec!(150), date(2024, 2, 1)),
    ];

    let summary = SummaryService::compute_financial_summary(&txs, at(2024, 2, 15)).unwrap();
    let periods = &summary.periods;

    assert_eq!(periods.this_month.income, dec!(0));
    assert_eq!(periods.this_month.expense, dec!(150));
    assert_eq!(periods.this_month.net_balance, dec!(-150));
    assert_eq!(periods.this_month.count, 1);

    assert_eq!(periods.last_month.income, dec!(1000));
    assert_eq!(periods.last_month.expense, dec!(200));
    assert_eq!(periods.last_month.net_balance, dec!(800));
    assert_eq!(periods.last_month.count, 2);
    assert_eq!(periods.last_month.savings_rate, dec!(80));
    assert_eq!(periods.last_month.avg_transaction, dec!(600));

    assert_eq!(periods.this_year.count, 3);
    assert_eq!(periods.all_time.net_balance, dec!(650));

    assert_eq!(
        summary.insights,
        vec![
            "Income decreased by 100.0% vs last month",
            "Expenses decreased by 25.0% vs last month",
            "Spending exceeded income this month - consider budget review",
        ]
    );
    assert_eq!(summary.total_transactions, 3);
    assert_eq!(summary.report_date, at(2024, 2, 15));
}

#[test]
fn test_windows_at_year_boundary() {
    let txs = vec![
        tx(TransactionKind::Expense, "Gifts", dec!(80), date(2023, 12, 24)),
        tx(TransactionKind::Income, "Salary", dec!(500), date(2024, 1, 1)),
    ];

    let summary = SummaryService::compute_financial_summary(&txs, at(2024, 1, 3)).unwrap();

    assert_eq!(summary.periods.last_month.expense, dec!(80));
    assert_eq!(summary.periods.this_month.income, dec!(500));
    assert_eq!(summary.periods.this_year.count, 1);

    let last = summary.monthly_trends.last().unwrap();
    assert_eq!((last.month.as_str(), last.year), ("Jan", 2024));
    let first = summary.monthly_trends.first().unwrap();
    assert_eq!((first.month.as_str(), first.year), ("Feb", 2023));
}

#[test]
fn test_breakdown_keeps_first_seen_order() {
    let on = date(2024, 3, 3);
    let txs = vec![
        tx(TransactionKind::Expense, "Rent", dec!(900), on),
        tx(TransactionKind::Income, "Salary", dec!(3000), on),
        tx(TransactionKind::Expense, "Food", dec!(45.5), on),
        tx(TransactionKind::Income, "Food", dec!(10), on),
        tx(TransactionKind::Expense, "Rent", dec!(100), on),
    ];

    let breakdown = SummaryService::category_breakdown(&txs);
    let names: Vec<&str> = breakdown.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Salary", "Food"]);

    assert_eq!(breakdown[0].expense, dec!(1000));
    assert_eq!(breakdown[0].count, 2);
    assert_eq!(breakdown[2].income, dec!(10));
    assert_eq!(breakdown[2].expense, dec!(45.5));
}

#[test]
fn test_top_categories_ties_are_stable() {
    let on = date(2024, 3, 3);
    let txs: Vec<Transaction> = ["A", "B", "C", "D", "E", "F", "G"]
        .iter()
        .map(|c| tx(TransactionKind::Expense, c, dec!(10), on))
        .chain(std::iter::once(tx(TransactionKind::Expense, "H", dec!(11), on)))
        .collect();

    let summary = SummaryService::compute_financial_summary(&txs, at(2024, 3, 20)).unwrap();
    let names: Vec<&str> = summary
        .top_expense_categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();

    assert_eq!(names, vec!["H", "A", "B", "C", "D"]);
    assert!(summary.top_income_categories.is_empty());
}

#[test]
fn test_ranking_count_is_category_total() {
    let on = date(2024, 3, 3);
    let txs = vec![
        tx(TransactionKind::Income, "Side", dec!(50), on),
        tx(TransactionKind::Expense, "Side", dec!(20), on),
    ];
    let summary = SummaryService::compute_financial_summary(&txs, at(2024, 3, 20)).unwrap();

    assert_eq!(summary.top_income_categories[0].count, 2);
    assert_eq!(summary.top_expense_categories[0].amount, dec!(20));
}

#[test]
fn test_future_dates_count_in_this_month() {
    let txs = vec![tx(TransactionKind::Expense, "Trip", dec!(300), date(2024, 5, 2))];
    let summary = SummaryService::compute_financial_summary(&txs, at(2024, 3, 20)).unwrap();

    assert_eq!(summary.periods.this_month.count, 1);
    let bucketed: u64 = summary.monthly_trends.iter().map(|p| p.stats.count).sum();
    assert_eq!(bucketed, 0);
}

#[test]
fn test_expense_by_category_skips_income() {
    let on = date(2024, 3, 3);
    let txs = vec![
        tx(TransactionKind::Income, "Salary", dec!(3000), on),
        tx(TransactionKind::Expense, "Food", dec!(20), on),
        tx(TransactionKind::Expense, "Food", dec!(5), on),
    ];

    let chart = SummaryService::expense_by_category(&txs);
    assert_eq!(chart.len(), 1);
    assert_eq!(chart[0].name, "Food");
    assert_eq!(chart[0].value, dec!(25));
}

#[test]
fn test_quick_stats_months() {
    let txs = vec![
        tx(TransactionKind::Income, "Salary", dec!(1000), date(2024, 1, 31)),
        tx(TransactionKind::Expense, "Food", dec!(40), date(2024, 2, 29)),
        tx(TransactionKind::Expense, "Food", dec!(60), date(2023, 12, 1)),
    ];

    let stats = SummaryService::quick_stats(&txs, date(2024, 2, 10));

    assert_eq!(stats.transaction_count, 3);
    assert_eq!(stats.net_balance_all_time, dec!(900));
    assert_eq!(stats.current_month.expenses, dec!(40));
    assert_eq!(stats.current_month.net_balance, dec!(-40));
    assert_eq!(stats.previous_month.income, dec!(1000));
    assert_eq!(stats.previous_month.expenses, dec!(0));
}
