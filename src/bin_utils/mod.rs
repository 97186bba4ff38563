//! This module could be a separate crate on its own, to bootstrap
//! [`banking_ledger`](crate) within a binary, but for simplicity purposes
//! it lives directly in the library.

use std::io::{Read, Write};

use anyhow::Result;
use thiserror::Error;

use crate::processor::{
    TransactionProcessError, TransactionProcessor,
    in_memory_processor::InMemoryTransactionProcessor,
};
use crate::transaction::UnknownTransactionType;
use csv_parser::{CsvRequestParser, read_accounts};
use csv_printer::{AccountBalance, print_accounts};
pub mod csv_parser;
pub mod csv_printer;

/// What can go wrong with one batch line: the row fails the request schema
/// here, or the processor rejects the transaction.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The schema rule the request boundary owns: amounts are positive.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error(transparent)]
    Process(#[from] TransactionProcessError),
}

impl BatchError {
    /// See [`TransactionProcessError::is_rejection`]; schema violations are
    /// rejections too.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::NonPositiveAmount => true,
            Self::Process(err) => err.is_rejection(),
        }
    }
}

impl From<UnknownTransactionType> for BatchError {
    fn from(err: UnknownTransactionType) -> Self {
        Self::Process(err.into())
    }
}

/// Batch runner: seeds accounts from one CSV, replays transaction requests
/// from another, reports per-line rejections through `error_printer` and
/// prints the final account state to `output`.
pub struct Service<'w, A, T, W: 'w> {
    pub accounts: A,
    pub transactions: T,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, BatchError)>,
}

impl<'w, A, T, W> Service<'w, A, T, W>
where
    A: Read,
    T: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let accounts = read_accounts(self.accounts)?;
        let processor = InMemoryTransactionProcessor::with_accounts(accounts);

        for (line, row) in CsvRequestParser::new(self.transactions) {
            let result = row
                .into_request()
                .and_then(|request| processor.process(request).map_err(BatchError::from));
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        // sorted so the report is stable across runs
        let mut accounts = processor.accounts()?;
        accounts.sort_by_key(|acc| acc.id);

        print_accounts(
            self.output,
            accounts.into_iter().map(|acc| AccountBalance {
                id: acc.id,
                customer_id: acc.customer_id,
                balance: acc.balance(),
                currency: acc.currency,
                status: acc.status,
            }),
        )
    }
}
