use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::AccountId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid input: expected {expected}")]
    MalformedInput {
        expected: &'static str,
    },

    #[error("invalid date: {input} (expected yyyymmdd)")]
    InvalidDate {
        input: String,
    },

    #[error("invalid amount: {input} (must be positive with at most 2 decimal places)")]
    InvalidAmount {
        input: String,
    },

    #[error("amount out of range: {input} (amounts and balances are limited to {limit})")]
    AmountOutOfRange {
        input: String,
        limit: Money,
    },

    #[error("invalid transaction type: {input} (expected D or W)")]
    InvalidTransactionKind {
        input: String,
    },

    #[error("account {account} has a zero balance")]
    ZeroBalance {
        account: AccountId,
    },

    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Money,
        requested: Money,
    },

    #[error("invalid interest rate: {input} (must be greater than 0 and less than 100)")]
    InvalidRate {
        input: String,
    },

    #[error("unknown account: {account}")]
    UnknownAccount {
        account: AccountId,
    },

    #[error("no transactions found for account {account} in {period}")]
    NoTransactionsInPeriod {
        account: AccountId,
        period: String,
    },

    #[error("invalid year/month: {input} (expected yyyymm)")]
    InvalidPeriod {
        input: String,
    },

    #[error("transaction date {date} is earlier than the latest transaction {latest} on account {account}")]
    OutOfOrderTransaction {
        account: AccountId,
        date: NaiveDate,
        latest: NaiveDate,
    },

    #[error("account {account} already has {limit} transactions on {date}")]
    TooManyTransactionsForDate {
        account: AccountId,
        date: NaiveDate,
        limit: u32,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// whether the console can report this error and carry on
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LedgerError::Io(_) | LedgerError::InvalidConfiguration { .. })
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
