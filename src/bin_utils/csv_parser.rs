use std::io::Read;

use anyhow::{Context, Result};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::account::{Account, AccountStatus};
use crate::bin_utils::BatchError;
use crate::transaction::{AccountId, CustomerId, TransactionRequest};

#[derive(Debug, Deserialize)]
pub struct AccountRow {
    pub id: AccountId,
    pub customer_id: CustomerId,
    pub balance: Decimal,
    pub currency: String,
    pub status: AccountStatus,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account::new(row.id, row.customer_id, row.balance, row.currency, row.status)
    }
}

/// Reads the seed accounts for a batch run.
pub fn read_accounts(source: impl Read) -> Result<Vec<Account>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(source);
    let mut accounts = Vec::new();
    for row in reader.deserialize::<AccountRow>() {
        let row = row.context("Failed to parse account row")?;
        accounts.push(row.into());
    }
    Ok(accounts)
}

/// One transaction request row. The `type` column stays a raw string here so
/// an unknown name surfaces as a per-line rejection instead of aborting the
/// whole batch.
#[derive(Debug, Deserialize)]
pub struct RequestRow {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Decimal,
    pub account_id: AccountId,
    pub destination_account_id: Option<AccountId>,
    pub note: Option<String>,
}

impl RequestRow {
    /// Applies the request schema the processor relies on being enforced
    /// upstream: a known transaction type and a strictly positive amount.
    pub fn into_request(self) -> Result<TransactionRequest, BatchError> {
        if self.amount <= Decimal::ZERO {
            return Err(BatchError::NonPositiveAmount);
        }
        Ok(TransactionRequest {
            kind: self.kind.parse()?,
            amount: self.amount,
            account_id: self.account_id,
            destination_account_id: self.destination_account_id,
            note: self.note,
        })
    }
}

/// Parses a transaction request list in CSV format
///
/// # Panics
///
/// If a row cannot be parsed
pub struct CsvRequestParser<R> {
    iter: DeserializeRecordsIntoIter<R, RequestRow>,
}

impl<R> CsvRequestParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvRequestParser<R>
where
    R: Read,
{
    type Item = (u64, RequestRow);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row.unwrap()))
    }
}
