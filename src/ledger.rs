use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

use crate::account::{Account, Transaction};
use crate::config::MAX_DAILY_SEQUENCE;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{AccountId, TransactionId, TransactionKind};

/// every account the bank knows about, keyed by identifier
#[derive(Debug, Clone)]
pub struct Ledger {
    accounts: BTreeMap<AccountId, Account>,
    max_transactions_per_day: u32,
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_daily_limit(MAX_DAILY_SEQUENCE)
    }

    /// ledger that accepts at most `limit` entries per account per date (capped at 99)
    pub fn with_daily_limit(limit: u32) -> Self {
        Self {
            accounts: BTreeMap::new(),
            max_transactions_per_day: limit.min(MAX_DAILY_SEQUENCE),
        }
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// accounts in identifier order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// validate and append a deposit or withdrawal
    ///
    /// The account is created with a zero balance on first use. Nothing is mutated when
    /// validation fails, so a rejected entry never leaves an empty account behind.
    pub fn record(
        &mut self,
        account_id: &AccountId,
        date: NaiveDate,
        kind: TransactionKind,
        amount: Money,
    ) -> Result<Transaction> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount {
                input: amount.as_decimal().to_string(),
            });
        }

        let transaction = match self.accounts.get(account_id) {
            Some(account) => self.prepare(account, date, kind, amount)?,
            None => self.prepare(&Account::new(account_id.clone()), date, kind, amount)?,
        };

        self.accounts
            .entry(account_id.clone())
            .or_insert_with(|| Account::new(account_id.clone()))
            .push(transaction.clone());

        info!(
            account = %account_id,
            txn = %transaction.id,
            kind = %kind,
            amount = %amount,
            balance = %transaction.balance,
            "transaction recorded"
        );

        Ok(transaction)
    }

    /// build the entry `account` would receive, without applying it
    fn prepare(
        &self,
        account: &Account,
        date: NaiveDate,
        kind: TransactionKind,
        amount: Money,
    ) -> Result<Transaction> {
        if let Some(latest) = account.latest_date() {
            if date < latest {
                return Err(LedgerError::OutOfOrderTransaction {
                    account: account.id().clone(),
                    date,
                    latest,
                });
            }
        }

        let out_of_range = || LedgerError::AmountOutOfRange {
            input: amount.as_decimal().to_string(),
            limit: Money::MAX,
        };

        let balance = match kind {
            TransactionKind::Deposit => account
                .balance()
                .checked_add(amount)
                .ok_or_else(out_of_range)?,
            TransactionKind::Withdrawal => {
                if account.balance().is_zero() {
                    return Err(LedgerError::ZeroBalance {
                        account: account.id().clone(),
                    });
                }
                if amount > account.balance() {
                    return Err(LedgerError::InsufficientFunds {
                        available: account.balance(),
                        requested: amount,
                    });
                }
                account.balance().checked_sub(amount).ok_or_else(out_of_range)?
            }
        };

        let id = match account.last_id_on(date) {
            Some(last) => last.next(),
            None => TransactionId::first(date),
        };
        if id.sequence > self.max_transactions_per_day {
            return Err(LedgerError::TooManyTransactionsForDate {
                account: account.id().clone(),
                date,
                limit: self.max_transactions_per_day,
            });
        }

        Ok(Transaction {
            id,
            date,
            kind,
            amount,
            balance,
        })
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
