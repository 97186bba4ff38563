use thiserror::Error;

use crate::journal::JournalError;
use crate::ledger::LedgerError;
use crate::transaction::{AccountId, Transaction, TransactionRequest, UnknownTransactionType};

pub mod in_memory_processor;

/// Smallest transfer the bank accepts, in currency minor units.
pub const MIN_TRANSFER_AMOUNT: i64 = 10_000;

#[derive(Debug, Error)]
pub enum TransactionProcessError {
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("destination account not found")]
    DestinationNotFound,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("minimum transfer amount is {MIN_TRANSFER_AMOUNT}")]
    BelowMinimumTransfer,
    #[error("source and destination account must differ")]
    SameAccountTransfer,
    #[error(transparent)]
    UnknownTransactionType(#[from] UnknownTransactionType),
    #[error(transparent)]
    JournalErr(#[from] JournalError),
    /// A fault in the storage backend itself. The failed attempt had no
    /// partial effect, so this is the only class a caller may retry.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl TransactionProcessError {
    /// Business-rule rejections are definitive answers, not technical
    /// failures; callers report them and move on instead of retrying.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::StorageFailure(_))
    }
}

impl From<LedgerError> for TransactionProcessError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => Self::AccountNotFound(id),
            LedgerError::InsufficientFunds => Self::InsufficientFunds,
        }
    }
}

/// Validates and commits balance-affecting transactions.
///
/// Implementations must be safe for concurrent callers and must commit the
/// journal record and the balance effect as one unit: a result is either a
/// fully applied transaction or an error with no observable effect.
///
/// NOTE: The in-memory backend is the only implementation today, but the
/// trait is the integration point for swapping in a database-backed one.
pub trait TransactionProcessor {
    fn process(&self, request: TransactionRequest) -> Result<Transaction, TransactionProcessError>;

    fn transactions_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, TransactionProcessError>;

    fn all_transactions(&self) -> Result<Vec<Transaction>, TransactionProcessError>;
}
