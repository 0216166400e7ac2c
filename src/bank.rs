use chrono::NaiveDate;
use tracing::info;

use crate::account::{Account, Transaction};
use crate::config::LedgerConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::interest::AccrualEngine;
use crate::ledger::Ledger;
use crate::rules::{InterestRule, RateSchedule};
use crate::statement::Statement;
use crate::types::{AccountId, StatementPeriod, TransactionKind};

/// session state for one operator: accounts, interest rules and settings
#[derive(Debug, Clone)]
pub struct Bank {
    pub config: LedgerConfig,
    ledger: Ledger,
    schedule: RateSchedule,
    engine: AccrualEngine,
}

impl Bank {
    pub fn new(config: LedgerConfig) -> Self {
        info!(
            bank = %config.bank_name,
            convention = ?config.day_count_convention,
            daily_limit = config.max_transactions_per_day,
            "session started"
        );

        Self {
            ledger: Ledger::with_daily_limit(config.max_transactions_per_day),
            schedule: RateSchedule::new(),
            engine: AccrualEngine::new(config.day_count_convention),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.bank_name
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.ledger.account(id)
    }

    /// record a deposit or withdrawal and return the stored entry
    pub fn record_transaction(
        &mut self,
        account_id: &AccountId,
        date: NaiveDate,
        kind: TransactionKind,
        amount: Money,
    ) -> Result<Transaction> {
        self.ledger.record(account_id, date, kind, amount)
    }

    pub fn define_rule(&mut self, date: NaiveDate, id: &str, rate: Rate) -> Result<InterestRule> {
        self.schedule.define_rule(date, id, rate)
    }

    /// monthly statement for an existing account
    pub fn statement(&self, account_id: &AccountId, period: StatementPeriod) -> Result<Statement> {
        let account = self
            .ledger
            .account(account_id)
            .ok_or_else(|| LedgerError::UnknownAccount {
                account: account_id.clone(),
            })?;

        Statement::build(account, &self.schedule, &self.engine, period)
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::DayCountConvention;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_statement_for_unknown_account() {
        let bank = Bank::default();
        let err = bank
            .statement(&AccountId::from("NOPE"), StatementPeriod::new(2024, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::UnknownAccount { .. }));
    }

    #[test]
    fn test_config_flows_into_ledger_and_engine() {
        let config = LedgerConfig {
            day_count_convention: DayCountConvention::Actual360,
            max_transactions_per_day: 1,
            ..LedgerConfig::default()
        };
        let mut bank = Bank::new(config);
        let id = AccountId::from("AC001");

        bank.record_transaction(&id, date(2024, 1, 1), TransactionKind::Deposit, Money::from_major(360))
            .unwrap();
        let err = bank
            .record_transaction(&id, date(2024, 1, 1), TransactionKind::Deposit, Money::from_major(1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::TooManyTransactionsForDate { limit: 1, .. }));

        bank.define_rule(date(2024, 1, 1), "RULE01", Rate::from_percentage(dec!(10))).unwrap();
        let statement = bank.statement(&id, StatementPeriod::new(2024, 1).unwrap()).unwrap();
        // 360 x 10% x 31 / 360
        assert_eq!(statement.interest, Money::from_decimal(dec!(3.10)));
        assert_eq!(statement.closing_balance, Money::from_decimal(dec!(363.10)));
    }

    #[test]
    fn test_rule_defined_after_transactions_applies_retroactively() {
        let mut bank = Bank::default();
        let id = AccountId::from("AC001");
        bank.record_transaction(&id, date(2024, 1, 15), TransactionKind::Deposit, Money::from_major(1000))
            .unwrap();

        let before = bank.statement(&id, StatementPeriod::new(2024, 1).unwrap()).unwrap();
        assert!(before.interest.is_zero());

        bank.define_rule(date(2024, 1, 1), "RULE01", Rate::from_percentage(dec!(5))).unwrap();
        let after = bank.statement(&id, StatementPeriod::new(2024, 1).unwrap()).unwrap();
        assert_eq!(after.interest.to_string(), "2.33");
        assert_eq!(after.closing_balance.to_string(), "1002.33");
    }
}
