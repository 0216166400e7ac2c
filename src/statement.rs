use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::{Account, Transaction};
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::interest::{Accrual, AccrualEngine};
use crate::rules::RateSchedule;
use crate::types::{AccountId, StatementPeriod, TransactionId, TransactionKind};

/// type column of a statement line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Deposit,
    Withdrawal,
    /// synthetic month-end interest line
    Interest,
}

impl LineKind {
    pub fn code(&self) -> char {
        match self {
            LineKind::Deposit => 'D',
            LineKind::Withdrawal => 'W',
            LineKind::Interest => 'I',
        }
    }
}

impl From<TransactionKind> for LineKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => LineKind::Deposit,
            TransactionKind::Withdrawal => LineKind::Withdrawal,
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    pub date: NaiveDate,
    /// none for the interest line
    pub id: Option<TransactionId>,
    pub kind: LineKind,
    pub amount: Money,
    pub balance: Money,
}

impl From<&Transaction> for StatementLine {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.date,
            id: Some(t.id),
            kind: t.kind.into(),
            amount: t.amount,
            balance: t.balance,
        }
    }
}

/// monthly statement for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub account_id: AccountId,
    pub period: StatementPeriod,
    /// in-month transactions in recorded order
    pub transactions: Vec<StatementLine>,
    pub accrual: Accrual,
    /// month interest rounded to cents
    pub interest: Money,
    /// current account balance plus the rounded interest
    pub closing_balance: Money,
}

impl Statement {
    /// assemble the statement for `account` over `period`
    ///
    /// A month with no transactions of its own is rejected even when a balance was carried in.
    pub fn build(
        account: &Account,
        schedule: &RateSchedule,
        engine: &AccrualEngine,
        period: StatementPeriod,
    ) -> Result<Self> {
        let transactions: Vec<StatementLine> = account
            .transactions_in(period)
            .map(StatementLine::from)
            .collect();

        if transactions.is_empty() {
            return Err(LedgerError::NoTransactionsInPeriod {
                account: account.id().clone(),
                period: period.to_string(),
            });
        }

        let accrual = engine.accrue_month(account, schedule, period);
        let interest = accrual.interest.round_dp(Money::SCALE);
        let closing_balance = account.balance().round_dp(Money::SCALE) + interest;

        Ok(Self {
            account_id: account.id().clone(),
            period,
            transactions,
            accrual,
            interest,
            closing_balance,
        })
    }

    /// synthetic line dated the last day of the month
    pub fn interest_line(&self) -> StatementLine {
        StatementLine {
            date: self.period.last_day(),
            id: None,
            kind: LineKind::Interest,
            amount: self.interest,
            balance: self.closing_balance,
        }
    }

    /// transaction lines followed by the interest line
    pub fn lines(&self) -> impl Iterator<Item = StatementLine> + '_ {
        self.transactions
            .iter()
            .cloned()
            .chain(std::iter::once(self.interest_line()))
    }
}
