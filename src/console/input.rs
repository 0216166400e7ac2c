use chrono::NaiveDate;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::{parse_date, AccountId, StatementPeriod, TransactionKind};

pub const TRANSACTION_FORMAT: &str = "<Date> <Account> <Type> <Amount>";
pub const RULE_FORMAT: &str = "<Date> <RuleId> <Rate in %>";
pub const STATEMENT_FORMAT: &str = "<Account> <Year><Month>";

/// top-level menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    InputTransaction,
    DefineRule,
    PrintStatement,
    Quit,
}

impl Command {
    /// single letter, any case, surrounding whitespace ignored
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_uppercase().as_str() {
            "T" => Some(Command::InputTransaction),
            "I" => Some(Command::DefineRule),
            "P" => Some(Command::PrintStatement),
            "Q" => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub date: NaiveDate,
    pub account: AccountId,
    pub kind: TransactionKind,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRequest {
    pub date: NaiveDate,
    pub rule_id: String,
    pub rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    pub account: AccountId,
    pub period: StatementPeriod,
}

fn tokens<'a, const N: usize>(line: &'a str, expected: &'static str) -> Result<[&'a str; N]> {
    let parts: Vec<&'a str> = line.split_whitespace().collect();
    parts
        .try_into()
        .map_err(|_| LedgerError::MalformedInput { expected })
}

/// `<yyyymmdd> <account> <D|W> <amount>`
pub fn parse_transaction(line: &str) -> Result<TransactionRequest> {
    let [date, account, kind, amount] = tokens::<4>(line, TRANSACTION_FORMAT)?;

    let date = parse_date(date)?;
    let amount = Money::parse_amount(amount)?;
    let kind: TransactionKind = kind.parse()?;

    Ok(TransactionRequest {
        date,
        account: AccountId::new(account),
        kind,
        amount,
    })
}

/// `<yyyymmdd> <rule id> <rate>`
pub fn parse_rule(line: &str) -> Result<RuleRequest> {
    let [date, rule_id, rate] = tokens::<3>(line, RULE_FORMAT)?;

    Ok(RuleRequest {
        date: parse_date(date)?,
        rule_id: rule_id.to_string(),
        rate: Rate::parse_percentage(rate)?,
    })
}

/// `<account> <yyyymm>`
pub fn parse_statement(line: &str) -> Result<StatementRequest> {
    let [account, period] = tokens::<2>(line, STATEMENT_FORMAT)?;

    Ok(StatementRequest {
        account: AccountId::new(account),
        period: StatementPeriod::parse(period)?,
    })
}
