pub mod account;
pub mod bank;
pub mod cli;
pub mod config;
pub mod console;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod ledger;
pub mod rules;
pub mod statement;
pub mod types;

// re-export key types
pub use account::{Account, Transaction};
pub use bank::Bank;
pub use config::LedgerConfig;
pub use console::Console;
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use interest::{Accrual, AccrualEngine, AccrualSegment, DayCountConvention};
pub use ledger::Ledger;
pub use rules::{InterestRule, RateSchedule};
pub use statement::{LineKind, Statement, StatementLine};
pub use types::{AccountId, StatementPeriod, TransactionId, TransactionKind};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
