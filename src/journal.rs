use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::transaction::{AccountId, Transaction, TransactionKind, TransactionRequest};

#[derive(Debug, Error)]
pub enum JournalError {
    /// The account has no recorded transactions. Distinct from a storage
    /// fault: the query itself succeeded, the result set is just empty.
    #[error("no transactions found for account: {0}")]
    NoTransactionsForAccount(AccountId),
    #[error("no transactions found")]
    NoTransactions,
}

/// Append-only log of committed transactions.
///
/// A record enters the journal exactly once, with a server-generated id and
/// commit timestamp, and is never updated or deleted afterwards. Listings are
/// returned most-recent-first.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<Transaction>,
}

impl Journal {
    /// Persists `request` as a committed transaction and returns the record
    /// with its generated id and commit timestamp.
    pub fn append(&mut self, request: &TransactionRequest) -> Transaction {
        let destination_account_id = match request.kind {
            TransactionKind::Transfer => request.destination_account_id,
            _ => None,
        };
        let transaction = Transaction {
            id: Uuid::new_v4(),
            date: Utc::now(),
            kind: request.kind,
            amount: request.amount,
            account_id: request.account_id,
            destination_account_id,
            note: request.note.clone(),
        };
        self.entries.push(transaction.clone());
        transaction
    }

    /// Every transaction referencing `account_id` as source or destination,
    /// most-recent-first.
    pub fn list_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, JournalError> {
        let transactions: Vec<Transaction> = self
            .entries
            .iter()
            .rev()
            .filter(|tx| {
                tx.account_id == account_id || tx.destination_account_id == Some(account_id)
            })
            .cloned()
            .collect();
        if transactions.is_empty() {
            return Err(JournalError::NoTransactionsForAccount(account_id));
        }
        Ok(transactions)
    }

    /// Every committed transaction, most-recent-first.
    pub fn list_all(&self) -> Result<Vec<Transaction>, JournalError> {
        if self.is_empty() {
            return Err(JournalError::NoTransactions);
        }
        Ok(self.entries.iter().rev().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
