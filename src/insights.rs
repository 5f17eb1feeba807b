use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::transaction::{Category, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub fn lookback(self) -> Duration {
        match self {
            Period::Daily => Duration::days(1),
            Period::Weekly => Duration::days(7),
            Period::Monthly => Duration::days(30),
        }
    }

    /// Start of the period ending at `now`.
    pub fn since(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.lookback()
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            _ => Err(format!("unknown period `{s}`, expected daily, weekly or monthly")),
        }
    }
}

/// Money in and out over a period, in sats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub incoming: u64,
    pub outgoing: u64,
    pub net_flow: i64,
}

impl Summary {
    pub fn from_transactions(transactions: &[Transaction], since: DateTime<Utc>) -> Self {
        let mut summary = Summary::default();

        for tx in transactions.iter().filter(|tx| tx.timestamp >= since) {
            match tx.tx_type {
                TransactionType::Receive => {
                    summary.incoming = summary.incoming.saturating_add(tx.amount);
                }
                TransactionType::Send => {
                    summary.outgoing = summary.outgoing.saturating_add(tx.amount);
                }
                _ => {}
            }
        }
        summary.net_flow = 0_i64
            .saturating_add_unsigned(summary.incoming)
            .saturating_sub_unsigned(summary.outgoing);

        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: Category,
    pub amount: u64,

    /// Share of all spending in the period, rounded down.
    pub percent: u8,
}

/// Spending per category over a period. Sends without a category count as `other`.
pub fn spending_by_category(
    transactions: &[Transaction],
    since: DateTime<Utc>,
) -> Vec<CategorySpend> {
    let mut totals: BTreeMap<Category, u64> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.tx_type == TransactionType::Send && tx.timestamp >= since)
    {
        let total = totals.entry(tx.category.unwrap_or(Category::Other)).or_default();
        *total = total.saturating_add(tx.amount);
    }

    let spent: u128 = totals.values().map(|&amount| u128::from(amount)).sum();
    totals
        .into_iter()
        .filter(|&(_, amount)| amount > 0)
        .map(|(category, amount)| CategorySpend {
            category,
            amount,
            percent: (u128::from(amount) * 100 / spent) as u8,
        })
        .collect()
}
