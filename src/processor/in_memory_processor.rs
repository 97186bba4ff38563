use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;
use tracing::debug;

use crate::account::Account;
use crate::journal::Journal;
use crate::ledger::LedgerStore;
use crate::transaction::{AccountId, Transaction, TransactionKind, TransactionRequest};

use super::{MIN_TRANSFER_AMOUNT, TransactionProcessError, TransactionProcessor};

/// Ledger store and journal guarded by one lock. Holding the guard across
/// a whole commit is the transactional scope: validation, balance mutation
/// and journal append all happen under a single acquisition, so no caller
/// can ever observe a half-applied transaction or a stale balance check.
#[derive(Debug, Default)]
struct BankState {
    ledger: LedgerStore,
    journal: Journal,
}

impl BankState {
    fn commit(
        &mut self,
        request: &TransactionRequest,
    ) -> Result<Transaction, TransactionProcessError> {
        let source_balance = self
            .ledger
            .get(request.account_id)
            .map_err(|_| TransactionProcessError::AccountNotFound(request.account_id))?
            .balance();

        match request.kind {
            TransactionKind::Debit => {
                if source_balance < request.amount {
                    return Err(TransactionProcessError::InsufficientFunds);
                }
                self.ledger.debit(request.account_id, request.amount)?;
            }
            // credits have no balance precondition; the request schema keeps
            // amounts positive upstream
            TransactionKind::Credit => {
                self.ledger.credit(request.account_id, request.amount)?;
            }
            TransactionKind::Transfer => {
                let dest_id = request
                    .destination_account_id
                    .ok_or(TransactionProcessError::DestinationNotFound)?;
                self.ledger
                    .get(dest_id)
                    .map_err(|_| TransactionProcessError::DestinationNotFound)?;
                if dest_id == request.account_id {
                    return Err(TransactionProcessError::SameAccountTransfer);
                }
                if source_balance < request.amount {
                    return Err(TransactionProcessError::InsufficientFunds);
                }
                if request.amount < Decimal::from(MIN_TRANSFER_AMOUNT) {
                    return Err(TransactionProcessError::BelowMinimumTransfer);
                }
                self.ledger.transfer(request.account_id, dest_id, request.amount)?;
            }
        }

        // every rule above held under the same lock as the mutation, so the
        // append always pairs with an applied balance effect
        let transaction = self.journal.append(request);
        debug!(
            id = %transaction.id,
            kind = ?transaction.kind,
            amount = %transaction.amount,
            account = %transaction.account_id,
            "transaction committed"
        );
        Ok(transaction)
    }
}

/// In-memory [`TransactionProcessor`] backend.
///
/// Shared between callers behind an `Arc`; all balance state lives in the
/// inner [`BankState`] mutex, the processor itself is stateless.
#[derive(Debug, Default)]
pub struct InMemoryTransactionProcessor {
    state: Mutex<BankState>,
}

impl InMemoryTransactionProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut ledger = LedgerStore::default();
        for account in accounts {
            ledger.insert(account);
        }
        Self {
            state: Mutex::new(BankState {
                ledger,
                journal: Journal::default(),
            }),
        }
    }

    /// Snapshot of one account as of the last committed transaction.
    pub fn account(&self, id: AccountId) -> Result<Account, TransactionProcessError> {
        let state = self.lock_state()?;
        let account = state.ledger.get(id)?;
        Ok(account.clone())
    }

    /// Snapshot of every account, for reporting.
    pub fn accounts(&self) -> Result<Vec<Account>, TransactionProcessError> {
        Ok(self.lock_state()?.ledger.accounts().cloned().collect())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, BankState>, TransactionProcessError> {
        self.state
            .lock()
            .map_err(|_| TransactionProcessError::StorageFailure("bank state lock poisoned".into()))
    }
}

impl TransactionProcessor for InMemoryTransactionProcessor {
    fn process(&self, request: TransactionRequest) -> Result<Transaction, TransactionProcessError> {
        self.lock_state()?.commit(&request)
    }

    fn transactions_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, TransactionProcessError> {
        Ok(self.lock_state()?.journal.list_by_account(account_id)?)
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>, TransactionProcessError> {
        Ok(self.lock_state()?.journal.list_all()?)
    }
}
