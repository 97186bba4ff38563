/// Customer accounts and their balance arithmetic. A balance only moves
/// through the crate-internal debit/credit methods and never goes negative.
pub mod account;

/// Transaction requests, committed transaction records and the transaction
/// type vocabulary shared by the rest of the crate.
pub mod transaction;

/// The account ledger store: current balances, looked up and conditionally
/// mutated as single check-and-act units.
pub mod ledger;

/// The append-only journal of committed transactions.
pub mod journal;

/// Transaction processor interface plus the "in memory" implementation.
/// Coordinates business-rule validation and the atomic commit of journal
/// record + balance effect.
pub mod processor;

/// Ideally, this module should exist in its own crate, as a way to
/// bootstrap core logic. However, it is also used for integration tests
/// so it lives here.
pub mod bin_utils;
