use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum TransactionType {
    /// A receive is a credit to the wallet, meaning it
    /// should increase the balance by the amount received.
    ///
    /// A receive looks like
    ///
    /// |type     |amount |counterparty |note             |category |
    /// |---------|-------|-------------|-----------------|---------|
    /// |receive  |25000  |Sarah C.     |Concert tickets  |services |
    ///
    /// The counterparty of a receive is the sender.
    Receive,

    /// A send is a debit to the wallet, meaning it should
    /// decrease the balance by the amount sent. Sends are not
    /// checked against the balance, so the balance may go negative.
    ///
    /// A send looks like
    ///
    /// |type     |amount |counterparty |note             |category |
    /// |---------|-------|-------------|-----------------|---------|
    /// |send     |2150   |Coffee Shop  |Morning coffee   |food     |
    ///
    /// The counterparty of a send is the recipient.
    Send,

    /// A swap is recorded in the history but leaves the balance untouched.
    ///
    /// A swap looks like
    ///
    /// |type     |amount |counterparty |note              |category |
    /// |---------|-------|-------------|------------------|---------|
    /// |swap     |50000  |             |Auto DCA Purchase |other    |
    Swap,
}

impl TransactionType {
    /// Signed change to the balance for a transaction of this type.
    pub fn apply(self, balance: i64, amount: u64) -> i64 {
        match self {
            TransactionType::Receive => balance.saturating_add_unsigned(amount),
            TransactionType::Send => balance.saturating_sub_unsigned(amount),
            TransactionType::Swap => balance,
        }
    }
}

/// Descriptive spending category. Has no effect on the balance.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Shopping,
    Tips,
    Services,
    Other,
}

/// A transaction as submitted to the ledger, before it has been
/// given an ID and a timestamp.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Amount in sats.
    pub amount: u64,

    pub counterparty: Option<String>,

    pub note: Option<String>,

    pub category: Option<Category>,
}

impl NewTransaction {
    pub fn receive(amount: u64) -> Self {
        Self::new(TransactionType::Receive, amount)
    }

    pub fn send(amount: u64) -> Self {
        Self::new(TransactionType::Send, amount)
    }

    pub fn swap(amount: u64) -> Self {
        Self::new(TransactionType::Swap, amount)
    }

    fn new(tx_type: TransactionType, amount: u64) -> Self {
        NewTransaction {
            tx_type,
            amount,
            counterparty: None,
            note: None,
            category: None,
        }
    }

    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub(crate) fn stamp(self, id: String, timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            tx_type: self.tx_type,
            amount: self.amount,
            timestamp,
            counterparty: self.counterparty,
            note: self.note,
            category: self.category,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction ID, unique within a ledger.
    pub id: String,

    /// Type of transaction. See `TransactionType` for more information.
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Amount in sats.
    pub amount: u64,

    pub timestamp: DateTime<Utc>,

    /// Sender of a receive or recipient of a send.
    pub counterparty: Option<String>,

    pub note: Option<String>,

    pub category: Option<Category>,
}

impl Transaction {
    pub fn sender(&self) -> Option<&str> {
        match self.tx_type {
            TransactionType::Receive => self.counterparty.as_deref(),
            _ => None,
        }
    }

    pub fn recipient(&self) -> Option<&str> {
        match self.tx_type {
            TransactionType::Send => self.counterparty.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_does_not_move_the_balance() {
        assert_eq!(TransactionType::Receive.apply(100, 50), 150);
        assert_eq!(TransactionType::Send.apply(100, 150), -50);
        assert_eq!(TransactionType::Swap.apply(100, 15_000), 100);
    }

    #[test]
    fn balance_saturates() {
        assert_eq!(TransactionType::Receive.apply(i64::MAX, 1), i64::MAX);
        assert_eq!(TransactionType::Send.apply(i64::MIN, u64::MAX), i64::MIN);
    }

    #[test]
    fn counterparty_role_follows_type() {
        let now = Utc::now();
        let tx = NewTransaction::send(10)
            .with_counterparty("Coffee Shop")
            .stamp("1".into(), now);
        assert_eq!(tx.recipient(), Some("Coffee Shop"));
        assert_eq!(tx.sender(), None);

        let tx = NewTransaction::receive(10)
            .with_counterparty("Unknown")
            .stamp("2".into(), now);
        assert_eq!(tx.sender(), Some("Unknown"));
        assert_eq!(tx.recipient(), None);
    }
}
