use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub type AccountId = Uuid;
pub type CustomerId = Uuid;
pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Debit,
    Credit,
    Transfer,
}

#[derive(Debug, Error)]
#[error("unknown transaction type: {0}")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionKind {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            "transfer" => Ok(Self::Transfer),
            other => Err(UnknownTransactionType(other.to_string())),
        }
    }
}

/// A balance-affecting request, already schema-validated by the caller:
/// the amount is positive and the note, when present, is at most 1000 chars.
/// `destination_account_id` is only meaningful for transfers.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub account_id: AccountId,
    pub destination_account_id: Option<AccountId>,
    pub note: Option<String>,
}

/// A committed transaction. Once journaled it is a fact: the record is never
/// updated or deleted, and id + date are assigned by the journal at commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub account_id: AccountId,
    pub destination_account_id: Option<AccountId>,
    pub note: Option<String>,
}
