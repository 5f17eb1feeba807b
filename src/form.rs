use thiserror::Error;

use crate::{
    friend::Friend,
    transaction::{Category, NewTransaction},
};

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormError {
    #[error("Please enter an address and amount")]
    MissingSendDetails,

    #[error("Please enter a bill amount and select at least one friend.")]
    MissingSplitDetails,

    #[error("Amount is too large: {0}")]
    InvalidAmount(String),
}

/// Strips everything but ASCII digits from an amount field.
pub fn sanitize_amount(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

fn parse_amount(amount: &str) -> Result<u64, FormError> {
    amount
        .parse()
        .map_err(|_| FormError::InvalidAmount(amount.to_owned()))
}

#[derive(Debug, Default, Clone)]
pub struct SendForm {
    pub address: String,
    amount: String,
    pub note: String,
}

impl SendForm {
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn set_amount(&mut self, input: &str) {
        self.amount = sanitize_amount(input);
    }

    /// Fills the amount with the whole balance.
    pub fn set_max(&mut self, balance: i64) {
        self.amount = balance.max(0).to_string();
    }

    /// Turns the form into a send ready to be recorded.
    pub fn validate(&self) -> Result<NewTransaction, FormError> {
        let address = self.address.trim();
        if address.is_empty() || self.amount.is_empty() {
            return Err(FormError::MissingSendDetails);
        }

        let mut tx = NewTransaction::send(parse_amount(&self.amount)?)
            .with_counterparty(address)
            .with_category(Category::Other);
        if !self.note.trim().is_empty() {
            tx = tx.with_note(self.note.trim());
        }

        Ok(tx)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub friend: Friend,
    pub amount: u64,
}

/// Equal split of a bill between the user and the selected friends.
#[derive(Debug, Default, Clone)]
pub struct SplitForm {
    bill: String,
    selected: Vec<Friend>,
}

impl SplitForm {
    pub fn set_bill(&mut self, input: &str) {
        self.bill = sanitize_amount(input);
    }

    pub fn selected(&self) -> &[Friend] {
        &self.selected
    }

    /// Selects the friend, or deselects them if already selected.
    pub fn toggle(&mut self, friend: &Friend) {
        match self.selected.iter().position(|f| f.id == friend.id) {
            Some(i) => {
                self.selected.remove(i);
            }
            None => self.selected.push(friend.clone()),
        }
    }

    /// Each participant's share, rounded down. The user counts as a participant.
    pub fn share(&self) -> u64 {
        let Ok(bill) = self.bill.parse::<u64>() else {
            return 0;
        };

        bill / (self.selected.len() as u64 + 1)
    }

    pub fn payment_requests(&self) -> Result<Vec<PaymentRequest>, FormError> {
        if self.bill.is_empty() || self.selected.is_empty() {
            return Err(FormError::MissingSplitDetails);
        }
        parse_amount(&self.bill)?;

        let amount = self.share();
        Ok(self
            .selected
            .iter()
            .map(|friend| PaymentRequest {
                friend: friend.clone(),
                amount,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::mock_friends;
    use crate::transaction::TransactionType;

    #[test]
    fn amounts_keep_only_digits() {
        assert_eq!(sanitize_amount("1,000 sats"), "1000");
        assert_eq!(sanitize_amount("-12.5"), "125");
        assert_eq!(sanitize_amount("abc"), "");
    }

    #[test]
    fn send_requires_address_and_amount() {
        let mut form = SendForm::default();
        assert_eq!(form.validate(), Err(FormError::MissingSendDetails));

        form.address = "   ".into();
        form.set_amount("2000");
        assert_eq!(form.validate(), Err(FormError::MissingSendDetails));

        form.address = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".into();
        form.set_amount("two thousand");
        assert_eq!(form.validate(), Err(FormError::MissingSendDetails));
        assert_eq!(
            FormError::MissingSendDetails.to_string(),
            "Please enter an address and amount"
        );
    }

    #[test]
    fn valid_send_form() {
        let mut form = SendForm {
            address: " bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh ".into(),
            note: "Lunch".into(),
            ..SendForm::default()
        };
        form.set_amount("2,000");

        let tx = form.validate().unwrap();
        assert_eq!(tx.tx_type, TransactionType::Send);
        assert_eq!(tx.amount, 2_000);
        assert_eq!(
            tx.counterparty.as_deref(),
            Some("bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh")
        );
        assert_eq!(tx.note.as_deref(), Some("Lunch"));
        assert_eq!(tx.category, Some(Category::Other));
    }

    #[test]
    fn oversized_amount_is_rejected() {
        let mut form = SendForm {
            address: "bc1q".into(),
            ..SendForm::default()
        };
        form.set_amount("99999999999999999999999");

        assert!(matches!(form.validate(), Err(FormError::InvalidAmount(_))));
    }

    #[test]
    fn max_uses_the_balance() {
        let mut form = SendForm::default();
        form.set_max(542_891);
        assert_eq!(form.amount(), "542891");

        form.set_max(-10);
        assert_eq!(form.amount(), "0");
    }

    #[test]
    fn split_counts_the_user() {
        let friends = mock_friends();
        let mut form = SplitForm::default();
        form.set_bill("10000");
        assert_eq!(form.share(), 10_000);

        form.toggle(&friends[0]);
        form.toggle(&friends[1]);
        assert_eq!(form.share(), 3_333);

        let requests = form.payment_requests().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].friend.name, "Alex B.");
        assert!(requests.iter().all(|r| r.amount == 3_333));
    }

    #[test]
    fn toggling_twice_deselects() {
        let friends = mock_friends();
        let mut form = SplitForm::default();

        form.toggle(&friends[2]);
        form.toggle(&friends[0]);
        form.toggle(&friends[2]);

        assert_eq!(form.selected(), &friends[..1]);
    }

    #[test]
    fn split_requires_bill_and_friends() {
        let friends = mock_friends();
        let mut form = SplitForm::default();
        assert_eq!(form.share(), 0);
        assert_eq!(form.payment_requests(), Err(FormError::MissingSplitDetails));

        form.set_bill("4500");
        assert_eq!(form.payment_requests(), Err(FormError::MissingSplitDetails));

        form.set_bill("");
        form.toggle(&friends[0]);
        assert_eq!(form.payment_requests(), Err(FormError::MissingSplitDetails));
    }
}
