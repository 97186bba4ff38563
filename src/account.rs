use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::{AccountId, CustomerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Closed,
}

/// A customer account with its current balance in currency minor units.
///
/// The balance is private: it moves only through the crate-internal
/// [`debit`](Account::debit) and [`credit`](Account::credit) methods, which
/// the ledger store calls on behalf of the transaction processor.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub customer_id: CustomerId,
    balance: Decimal,
    pub currency: String,
    pub status: AccountStatus,
}

impl Account {
    pub fn new(
        id: AccountId,
        customer_id: CustomerId,
        balance: Decimal,
        currency: impl Into<String>,
        status: AccountStatus,
    ) -> Self {
        Self {
            id,
            customer_id,
            balance,
            currency: currency.into(),
            status,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Decreases the balance by `amount` and returns the new balance.
    /// `None` means the funds were insufficient and the balance is untouched;
    /// a committed balance can never be negative.
    pub(crate) fn debit(&mut self, amount: Decimal) -> Option<Decimal> {
        if self.balance < amount {
            return None;
        }
        self.balance -= amount;
        Some(self.balance)
    }

    /// Increases the balance by `amount` and returns the new balance.
    pub(crate) fn credit(&mut self, amount: Decimal) -> Decimal {
        self.balance += amount;
        self.balance
    }
}
