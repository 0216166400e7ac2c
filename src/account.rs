use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AccountId, StatementPeriod, TransactionId, TransactionKind};

/// a single accepted ledger entry; immutable once recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: Money,
    /// account balance immediately after this entry
    pub balance: Money,
}

/// account state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    balance: Money,
    // acceptance order, which is also non-decreasing date order
    transactions: Vec<Transaction>,
}

impl Account {
    /// create an empty account with a zero balance
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            balance: Money::ZERO,
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// current balance
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// date of the most recently accepted transaction
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.transactions.last().map(|t| t.date)
    }

    /// highest identifier already issued for `date`
    pub fn last_id_on(&self, date: NaiveDate) -> Option<TransactionId> {
        self.transactions
            .iter()
            .filter(|t| t.date == date)
            .map(|t| t.id)
            .max()
    }

    /// balance in effect at the end of `date`, zero before the first entry
    pub fn balance_on(&self, date: NaiveDate) -> Money {
        self.transactions
            .iter()
            .rev()
            .find(|t| t.date <= date)
            .map(|t| t.balance)
            .unwrap_or(Money::ZERO)
    }

    /// entries dated inside `period`, in the order they were recorded
    pub fn transactions_in(&self, period: StatementPeriod) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |t| period.contains(t.date))
    }

    /// append an entry and move the balance to the one it carries
    pub(crate) fn push(&mut self, transaction: Transaction) {
        self.balance = transaction.balance;
        self.transactions.push(transaction);
    }
}
