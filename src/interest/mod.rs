pub mod accrual;

use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};

pub use accrual::{Accrual, AccrualEngine, AccrualSegment, DayCountConvention};

/// balance x annual rate x days, before division by the year basis
///
/// Balances stay within `Money::MAX` and rates below 100%, so the product always fits a `Decimal`.
pub fn weighted_balance(balance: Money, annual_rate: Rate, days: u32) -> Decimal {
    balance.as_decimal() * annual_rate.as_decimal() * Decimal::from(days)
}
