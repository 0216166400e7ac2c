use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{LedgerError, Result};

/// date format used for every operator-facing date
pub const DATE_FORMAT: &str = "%Y%m%d";

/// account identifier, free-form but unique within a bank
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        AccountId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        AccountId::new(s)
    }
}

/// deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// single-letter code used on input and in ledger tables
    pub fn code(&self) -> char {
        match self {
            TransactionKind::Deposit => 'D',
            TransactionKind::Withdrawal => 'W',
        }
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "D" | "d" => Ok(TransactionKind::Deposit),
            "W" | "w" => Ok(TransactionKind::Withdrawal),
            _ => Err(LedgerError::InvalidTransactionKind { input: s.to_string() }),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// transaction identifier: the value date plus a per-account, per-date sequence
///
/// Rendered as `YYYYMMDD-NN`. Ordering follows date first, then sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    pub date: NaiveDate,
    pub sequence: u32,
}

impl TransactionId {
    pub fn new(date: NaiveDate, sequence: u32) -> Self {
        Self { date, sequence }
    }

    /// first identifier handed out for a date
    pub fn first(date: NaiveDate) -> Self {
        Self::new(date, 1)
    }

    pub fn next(&self) -> Self {
        Self::new(self.date, self.sequence + 1)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.date.format(DATE_FORMAT), self.sequence)
    }
}

/// parse a `yyyymmdd` calendar date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || LedgerError::InvalidDate { input: input.to_string() };

    // chrono would otherwise accept short or signed years
    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// calendar month a statement covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatementPeriod {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl StatementPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1);
        let last_day = first_day
            .and_then(|d| d.checked_add_months(Months::new(1)))
            .and_then(|d| d.pred_opt());

        match (first_day, last_day) {
            (Some(first_day), Some(last_day)) => Ok(Self { first_day, last_day }),
            _ => Err(LedgerError::InvalidPeriod {
                input: format!("{:04}{:02}", year, month),
            }),
        }
    }

    /// parse a `yyyymm` period
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || LedgerError::InvalidPeriod { input: input.to_string() };

        if input.len() != 6 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = input[..4].parse().map_err(|_| invalid())?;
        let month: u32 = input[4..].parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    /// number of calendar days in the month
    pub fn days(&self) -> u32 {
        self.last_day.day()
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year(), self.month())
    }
}
