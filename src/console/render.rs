use std::io::{self, Write};

use crate::account::Account;
use crate::errors::LedgerError;
use crate::rules::RateSchedule;
use crate::statement::Statement;
use crate::types::DATE_FORMAT;

// cells are stringified first so the width flags apply

/// `Account: <id>` followed by every entry on the account
pub fn write_account<W: Write>(out: &mut W, account: &Account) -> io::Result<()> {
    writeln!(out, "Account: {}", account.id())?;
    writeln!(out, "| {:<8} | {:<11} | {:<4} | {:>10} |", "Date", "Txn Id", "Type", "Amount")?;
    for t in account.transactions() {
        writeln!(
            out,
            "| {:<8} | {:<11} | {:<4} | {:>10} |",
            t.date.format(DATE_FORMAT).to_string(),
            t.id.to_string(),
            t.kind.to_string(),
            t.amount.to_string()
        )?;
    }
    Ok(())
}

/// the whole rule schedule, oldest effective date first
pub fn write_rules<W: Write>(out: &mut W, schedule: &RateSchedule) -> io::Result<()> {
    let id_width = schedule
        .iter()
        .map(|r| r.id.len())
        .chain(std::iter::once("RuleId".len()))
        .max()
        .unwrap_or(0);

    writeln!(out, "Interest rules:")?;
    writeln!(out, "| {:<8} | {:<id_width$} | {:>8} |", "Date", "RuleId", "Rate (%)")?;
    for rule in schedule.iter() {
        writeln!(
            out,
            "| {:<8} | {:<id_width$} | {:>8} |",
            rule.date.format(DATE_FORMAT).to_string(),
            rule.id,
            rule.rate.to_string()
        )?;
    }
    Ok(())
}

pub fn write_statement<W: Write>(out: &mut W, statement: &Statement) -> io::Result<()> {
    writeln!(out, "Account: {}", statement.account_id)?;
    writeln!(
        out,
        "| {:<8} | {:<11} | {:<4} | {:>10} | {:>10} |",
        "Date", "Txn Id", "Type", "Amount", "Balance"
    )?;
    for line in statement.lines() {
        let id = line.id.map(|id| id.to_string()).unwrap_or_default();
        writeln!(
            out,
            "| {:<8} | {:<11} | {:<4} | {:>10} | {:>10} |",
            line.date.format(DATE_FORMAT).to_string(),
            id,
            line.kind.to_string(),
            line.amount.to_string(),
            line.balance.to_string()
        )?;
    }
    Ok(())
}

/// operator-facing wording for a rejected command
pub fn error_message(err: &LedgerError) -> String {
    match err {
        LedgerError::MalformedInput { expected } => {
            format!("Invalid input. Please enter details in {expected} format.")
        }
        LedgerError::InvalidDate { input } => {
            format!("Invalid date '{input}'. Please enter a valid date in YYYYMMdd format.")
        }
        LedgerError::InvalidAmount { input } => format!(
            "Invalid amount '{input}'. Amount must be greater than zero with up to 2 decimal places."
        ),
        LedgerError::AmountOutOfRange { limit, .. } => {
            format!("Amount out of range. Amounts and balances may not exceed {limit}.")
        }
        LedgerError::InvalidTransactionKind { input } => {
            format!("Invalid transaction type '{input}'. Use D for deposit or W for withdrawal.")
        }
        LedgerError::ZeroBalance { .. } => "Your account balance is zero.".to_string(),
        LedgerError::InsufficientFunds { available, .. } => {
            format!("Insufficient balance. Available balance is {available}.")
        }
        LedgerError::InvalidRate { input } => {
            format!("Invalid rate '{input}'. Rate must be greater than 0 and less than 100.")
        }
        LedgerError::UnknownAccount { account } => format!("Invalid account {account}."),
        LedgerError::NoTransactionsInPeriod { period, .. } => {
            format!("No transactions found for {period}.")
        }
        LedgerError::InvalidPeriod { input } => {
            format!("Invalid <Year><Month> '{input}'. Please enter it in YYYYMM format.")
        }
        LedgerError::OutOfOrderTransaction { latest, .. } => format!(
            "Transactions must be entered in date order; the latest is on {}.",
            latest.format(DATE_FORMAT)
        ),
        LedgerError::TooManyTransactionsForDate { date, limit, .. } => format!(
            "No more than {limit} transactions are allowed on {}.",
            date.format(DATE_FORMAT)
        ),
        other => other.to_string(),
    }
}
