use chrono::{DateTime, Duration, Utc};

use crate::{
    friend::Friend,
    transaction::{Category, NewTransaction, Transaction},
};

/// Balance the wallet starts with after seeding, in sats.
pub const STARTING_BALANCE: i64 = 542_891;

/// Starter dataset consumed by `Ledger::initialize`.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub balance: i64,
    pub friends: Vec<Friend>,

    /// Newest first.
    pub transactions: Vec<Transaction>,
}

impl Seed {
    pub fn generate(now: DateTime<Utc>) -> Self {
        Seed {
            balance: STARTING_BALANCE,
            friends: mock_friends(),
            transactions: mock_transactions(now),
        }
    }
}

pub fn mock_friends() -> Vec<Friend> {
    vec![
        Friend::new(
            "1",
            "Alex B.",
            "AB",
            "bc1q8c6fshw2dhdrhzqndu8hexgzdcmjwqqm9qrqsc",
        ),
        Friend::new(
            "2",
            "Sarah C.",
            "SC",
            "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh",
        ),
        Friend::new(
            "3",
            "John T.",
            "JT",
            "bc1q9h6yzd84en4x0uphwnp9xd5y0y95esjgcq54j6",
        ),
    ]
}

/// Example history spanning every transaction type, timestamped
/// at fixed offsets before `now`.
pub fn mock_transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    let examples = [
        (
            NewTransaction::receive(10_500)
                .with_counterparty("Unknown")
                .with_note("Payment received")
                .with_category(Category::Other),
            Duration::hours(2),
        ),
        (
            NewTransaction::send(2_150)
                .with_counterparty("Coffee Shop")
                .with_note("Morning coffee")
                .with_category(Category::Food),
            Duration::days(1),
        ),
        (
            NewTransaction::send(15_000)
                .with_counterparty("Alex B.")
                .with_note("Dinner split")
                .with_category(Category::Food),
            Duration::days(3),
        ),
        (
            NewTransaction::receive(25_000)
                .with_counterparty("Sarah C.")
                .with_note("Concert tickets")
                .with_category(Category::Services),
            Duration::days(5),
        ),
        (
            NewTransaction::swap(50_000)
                .with_note("Auto DCA Purchase")
                .with_category(Category::Other),
            Duration::days(7),
        ),
    ];

    examples
        .into_iter()
        .enumerate()
        .map(|(i, (tx, age))| tx.stamp((i + 1).to_string(), now - age))
        .collect()
}
