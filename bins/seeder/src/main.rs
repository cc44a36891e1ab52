//! Database seeder for Tally development.
//!
//! Creates a demo user with three months of income, expenses and budget
//! goals ending in the current month. Running it twice is harmless: an
//! existing demo user is left untouched.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use tally_core::auth::hash_password;
use tally_core::budget::BudgetGoalInput;
use tally_core::transaction::{CreateTransactionInput, TransactionKind};
use tally_db::{BudgetGoalRepository, TransactionRepository, UserRepository};
use tally_shared::types::UserId;

const DEMO_USERNAME: &str = "demo";
const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo1234";

/// (day of month, kind, category, amount in cents, description)
const MONTHLY_TEMPLATE: &[(u32, TransactionKind, &str, i64, &str)] = &[
    (1, TransactionKind::Income, "Salary", 420_000, "Monthly salary"),
    (2, TransactionKind::Expense, "Rent", 135_000, "Apartment"),
    (5, TransactionKind::Expense, "Food", 8_640, "Groceries"),
    (9, TransactionKind::Expense, "Transport", 4_500, "Transit pass"),
    (12, TransactionKind::Expense, "Food", 3_275, "Dinner out"),
    (15, TransactionKind::Income, "Freelance", 60_000, "Side project"),
    (18, TransactionKind::Expense, "Utilities", 11_020, "Electricity and water"),
    (22, TransactionKind::Expense, "Entertainment", 2_599, "Streaming"),
    (26, TransactionKind::Expense, "Food", 9_130, "Groceries"),
];

/// (category, target in cents)
const GOALS: &[(&str, i64)] = &[
    ("Food", 25_000),
    ("Transport", 6_000),
    ("Entertainment", 2_000),
    ("Utilities", 12_000),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = tally_db::connect(&database_url).await?;

    let users = UserRepository::new(db.clone());
    if users.find_by_login(DEMO_EMAIL).await?.is_some() {
        println!("Demo user already exists, nothing to do.");
        return Ok(());
    }

    println!("Seeding demo user...");
    let hash = hash_password(DEMO_PASSWORD)?;
    let user = users.create(DEMO_USERNAME, DEMO_EMAIL, &hash).await?;
    let owner = UserId::from_uuid(user.id);

    let today = Utc::now().date_naive();
    let this_month = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .context("first day of the current month")?;

    println!("Seeding transactions...");
    let transactions = TransactionRepository::new(db.clone());
    let mut count = 0;
    for back in (0..3).rev() {
        let first = this_month
            .checked_sub_months(Months::new(back))
            .context("month out of range")?;
        for &(day, kind, category, cents, note) in MONTHLY_TEMPLATE {
            let Some(occurred_on) = first.with_day(day).filter(|d| *d <= today) else {
                continue;
            };
            let input = CreateTransactionInput {
                kind,
                category: category.to_string(),
                amount: Decimal::new(cents, 2),
                occurred_on,
                note: Some(note.to_string()),
            };
            transactions.create(owner, &input).await?;
            count += 1;
        }
    }

    println!("Seeding budget goals...");
    let goals = BudgetGoalRepository::new(db);
    for &(category, cents) in GOALS {
        let input = BudgetGoalInput {
            category: category.to_string(),
            target_amount: Decimal::new(cents, 2),
            month: this_month.month0(),
            year: this_month.year(),
        };
        goals.create(owner, &input).await?;
    }

    println!(
        "Seeding complete: {count} transactions, {} goals. Log in as {DEMO_USERNAME} / {DEMO_PASSWORD}",
        GOALS.len()
    );
    Ok(())
}
