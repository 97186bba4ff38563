use std::thread;

use rust_decimal::Decimal;
use uuid::Uuid;

use banking_ledger::account::{Account, AccountStatus};
use banking_ledger::processor::in_memory_processor::InMemoryTransactionProcessor;
use banking_ledger::processor::{TransactionProcessError, TransactionProcessor};
use banking_ledger::transaction::{AccountId, TransactionKind, TransactionRequest};

fn open_account(balance: i64) -> Account {
    Account::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Decimal::from(balance),
        "IDR",
        AccountStatus::Active,
    )
}

fn request(
    kind: TransactionKind,
    amount: i64,
    account_id: AccountId,
    destination_account_id: Option<AccountId>,
) -> TransactionRequest {
    TransactionRequest {
        kind,
        amount: Decimal::from(amount),
        account_id,
        destination_account_id,
        note: None,
    }
}

/// Ten concurrent 10k debits against a 50k balance: exactly five can land,
/// the rest must fail on funds, and the balance never goes negative.
#[test]
fn concurrent_debits_never_overdraw() {
    let account = open_account(50_000);
    let id = account.id;
    let processor = InMemoryTransactionProcessor::with_accounts([account]);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let processor = &processor;
                scope.spawn(move || processor.process(request(TransactionKind::Debit, 10_000, id, None)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 5);
    for result in results {
        if let Err(err) = result {
            assert!(matches!(err, TransactionProcessError::InsufficientFunds));
        }
    }

    assert_eq!(processor.account(id).unwrap().balance(), Decimal::ZERO);
    assert_eq!(processor.transactions_for_account(id).unwrap().len(), 5);
}

/// Transfers running in opposite directions between the same pair of
/// accounts must complete (no deadlock) and conserve the total.
#[test]
fn opposing_transfers_conserve_funds() {
    let a = open_account(100_000);
    let b = open_account(100_000);
    let (a_id, b_id) = (a.id, b.id);
    let processor = InMemoryTransactionProcessor::with_accounts([a, b]);

    thread::scope(|scope| {
        for (from, to) in [(a_id, b_id), (b_id, a_id)] {
            let processor = &processor;
            scope.spawn(move || {
                for _ in 0..20 {
                    // rejections are fine, partial application is not
                    let _ = processor.process(request(TransactionKind::Transfer, 10_000, from, Some(to)));
                }
            });
        }
    });

    let a_balance = processor.account(a_id).unwrap().balance();
    let b_balance = processor.account(b_id).unwrap().balance();
    assert!(a_balance >= Decimal::ZERO);
    assert!(b_balance >= Decimal::ZERO);
    assert_eq!(a_balance + b_balance, Decimal::from(200_000));
}

/// Credits have no precondition, so every concurrent credit must land and
/// each must leave exactly one journal record.
#[test]
fn concurrent_credits_all_land() {
    let account = open_account(0);
    let id = account.id;
    let processor = InMemoryTransactionProcessor::with_accounts([account]);

    thread::scope(|scope| {
        for _ in 0..8 {
            let processor = &processor;
            scope.spawn(move || {
                processor
                    .process(request(TransactionKind::Credit, 1_000, id, None))
                    .unwrap();
            });
        }
    });

    assert_eq!(processor.account(id).unwrap().balance(), Decimal::from(8_000));
    assert_eq!(processor.transactions_for_account(id).unwrap().len(), 8);
}
