use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::Account;
use crate::transaction::AccountId;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    NotFound(AccountId),
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Holds the current balance of every account.
///
/// Each operation is a complete check-and-mutate unit over `&mut self`, so a
/// caller that serializes access (the in-memory processor keeps the store
/// behind one lock) gets atomic conditional updates for free: a debit either
/// lands with a non-negative result or reports [`LedgerError::InsufficientFunds`]
/// without touching the balance.
///
/// Closed accounts are soft-deleted: every lookup treats them as absent.
#[derive(Debug, Default)]
pub struct LedgerStore {
    accounts: HashMap<AccountId, Account>,
}

impl LedgerStore {
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    pub fn get(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&id)
            .filter(|acc| acc.is_active())
            .ok_or(LedgerError::NotFound(id))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Decreases the balance of `id` by `amount`; the resulting balance is
    /// never allowed below zero.
    pub fn debit(&mut self, id: AccountId, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.get_active_mut(id)?
            .debit(amount)
            .ok_or(LedgerError::InsufficientFunds)
    }

    /// Increases the balance of `id` by `amount`.
    pub fn credit(&mut self, id: AccountId, amount: Decimal) -> Result<Decimal, LedgerError> {
        Ok(self.get_active_mut(id)?.credit(amount))
    }

    /// Moves `amount` from `source_id` to `dest_id` as one indivisible unit,
    /// returning both updated balances.
    pub fn transfer(
        &mut self,
        source_id: AccountId,
        dest_id: AccountId,
        amount: Decimal,
    ) -> Result<(Decimal, Decimal), LedgerError> {
        // resolve the destination before either balance moves, so a failed
        // transfer can never leave a half-applied state behind
        self.get(dest_id)?;
        let source_balance = self.debit(source_id, amount)?;
        let dest_balance = self.credit(dest_id, amount)?;
        Ok((source_balance, dest_balance))
    }

    fn get_active_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&id)
            .filter(|acc| acc.is_active())
            .ok_or(LedgerError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::account::AccountStatus;

    use super::*;

    fn seeded(balance: u32) -> (LedgerStore, AccountId) {
        let mut store = LedgerStore::default();
        let id = Uuid::new_v4();
        store.insert(Account::new(
            id,
            Uuid::new_v4(),
            Decimal::from(balance),
            "IDR",
            AccountStatus::Active,
        ));
        (store, id)
    }

    #[test]
    fn get_missing_account() {
        let store = LedgerStore::default();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id), Err(LedgerError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn closed_account_is_invisible() {
        let mut store = LedgerStore::default();
        let id = Uuid::new_v4();
        store.insert(Account::new(
            id,
            Uuid::new_v4(),
            Decimal::from(1_000),
            "IDR",
            AccountStatus::Closed,
        ));
        assert!(store.get(id).is_err());
        assert!(matches!(
            store.credit(id, Decimal::from(100)),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn debit_and_credit_move_balance() {
        let (mut store, id) = seeded(50_000);
        assert_eq!(store.debit(id, Decimal::from(20_000)).unwrap(), Decimal::from(30_000));
        assert_eq!(store.credit(id, Decimal::from(5_000)).unwrap(), Decimal::from(35_000));
    }

    #[test]
    fn overdraft_is_rejected() {
        let (mut store, id) = seeded(5_000);
        assert!(matches!(
            store.debit(id, Decimal::from(10_000)),
            Err(LedgerError::InsufficientFunds)
        ));
        assert_eq!(store.get(id).unwrap().balance(), Decimal::from(5_000));
    }

    #[test]
    fn transfer_moves_both_balances() {
        let (mut store, source) = seeded(50_000);
        let dest = Uuid::new_v4();
        store.insert(Account::new(
            dest,
            Uuid::new_v4(),
            Decimal::ZERO,
            "IDR",
            AccountStatus::Active,
        ));

        let (source_balance, dest_balance) =
            store.transfer(source, dest, Decimal::from(20_000)).unwrap();
        assert_eq!(source_balance, Decimal::from(30_000));
        assert_eq!(dest_balance, Decimal::from(20_000));
    }

    #[test]
    fn transfer_to_missing_destination_touches_nothing() {
        let (mut store, source) = seeded(50_000);
        let dest = Uuid::new_v4();
        assert!(matches!(
            store.transfer(source, dest, Decimal::from(20_000)),
            Err(LedgerError::NotFound(missing)) if missing == dest
        ));
        assert_eq!(store.get(source).unwrap().balance(), Decimal::from(50_000));
    }

    #[test]
    fn transfer_without_funds_touches_nothing() {
        let (mut store, source) = seeded(5_000);
        let dest = Uuid::new_v4();
        store.insert(Account::new(
            dest,
            Uuid::new_v4(),
            Decimal::ZERO,
            "IDR",
            AccountStatus::Active,
        ));
        assert!(matches!(
            store.transfer(source, dest, Decimal::from(20_000)),
            Err(LedgerError::InsufficientFunds)
        ));
        assert_eq!(store.get(source).unwrap().balance(), Decimal::from(5_000));
        assert_eq!(store.get(dest).unwrap().balance(), Decimal::ZERO);
    }
}
