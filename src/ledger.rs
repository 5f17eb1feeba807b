use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    friend::Friend,
    mock::Seed,
    transaction::{NewTransaction, Transaction},
};

/// In-memory wallet: a running balance, the transaction history
/// (newest first) and the friends list.
///
/// The balance always equals the balance set by the last
/// `initialize` (zero for a fresh ledger) plus every receive
/// and minus every send recorded since. Swaps do not move it.
#[derive(Debug, Default)]
pub struct Ledger {
    balance: i64,
    transactions: Vec<Transaction>,
    friends: Vec<Friend>,
    next_id: u64,
}

impl Ledger {
    /// A ledger populated with the example friends and history.
    pub fn seeded() -> Self {
        let mut ledger = Ledger::default();
        ledger.initialize();
        ledger
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Transactions, most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn friend(&self, id: &str) -> Option<&Friend> {
        self.friends.iter().find(|friend| friend.id == id)
    }

    /// Records a transaction stamped with the current time.
    pub fn record_transaction(&mut self, input: NewTransaction) {
        self.record_transaction_at(input, Utc::now());
    }

    /// Records a transaction as of `now`.
    ///
    /// No validation is performed: any amount, including zero, is accepted
    /// and sends may overdraw the balance. The timestamp is clamped so the
    /// history never goes backwards in time.
    pub fn record_transaction_at(&mut self, input: NewTransaction, now: DateTime<Utc>) {
        let timestamp = match self.transactions.first() {
            Some(newest) => now.max(newest.timestamp),
            None => now,
        };

        self.next_id += 1;
        let tx = input.stamp(self.next_id.to_string(), timestamp);
        self.balance = tx.tx_type.apply(self.balance, tx.amount);

        debug!(
            id = %tx.id,
            tx_type = ?tx.tx_type,
            amount = tx.amount,
            balance = self.balance,
            "Recorded transaction"
        );

        self.transactions.insert(0, tx);
    }

    /// Discards all state and reseeds the ledger with the example data.
    pub fn initialize(&mut self) {
        self.initialize_at(Utc::now());
    }

    pub fn initialize_at(&mut self, now: DateTime<Utc>) {
        let seed = Seed::generate(now);

        self.next_id = seed.transactions.len() as u64;
        self.balance = seed.balance;
        self.transactions = seed.transactions;
        self.friends = seed.friends;

        debug!(
            balance = self.balance,
            transactions = self.transactions.len(),
            friends = self.friends.len(),
            "Initialized ledger"
        );
    }
}
