use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{LedgerError, Result};

/// currency amount, kept exact; operator input carries at most two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// decimal places accepted on input and shown on output
    pub const SCALE: u32 = 2;

    /// ceiling for any amount or balance (10^15); keeps balance x rate x days far inside `Decimal`
    pub const MAX: Money = Money(Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// parse a transaction amount: numeric, strictly positive, at most two decimal places
    pub fn parse_amount(s: &str) -> Result<Self> {
        let invalid = || LedgerError::InvalidAmount { input: s.to_string() };

        let d = Decimal::from_str(s).map_err(|_| invalid())?;
        if d <= Decimal::ZERO || d.normalize().scale() > Self::SCALE {
            return Err(invalid());
        }

        let amount = Money(d.normalize());
        if amount > Self::MAX {
            return Err(LedgerError::AmountOutOfRange {
                input: s.to_string(),
                limit: Self::MAX,
            });
        }

        Ok(amount)
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half away from zero, the way amounts are printed
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// sum, or `None` past `Money::MAX` or on decimal overflow
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .filter(|sum| *sum <= Self::MAX)
    }

    /// difference, or `None` on decimal overflow
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_dp(Self::SCALE).0;
        write!(f, "{:.2}", rounded)
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Money::parse_amount(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

/// annual interest rate held as a percentage, so 1.95 means 1.95% per year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: Decimal) -> Self {
        Rate(p.normalize())
    }

    /// parse an operator-supplied rate; must lie strictly between 0 and 100
    pub fn parse_percentage(s: &str) -> Result<Self> {
        let invalid = || LedgerError::InvalidRate { input: s.to_string() };

        let p = Decimal::from_str(s).map_err(|_| invalid())?;
        if p <= Decimal::ZERO || p >= Decimal::ONE_HUNDRED {
            return Err(invalid());
        }

        Ok(Rate::from_percentage(p))
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0
    }

    /// get as fraction (e.g., 0.05 for 5%)
    pub fn as_decimal(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_parsing() {
        assert_eq!(Money::parse_amount("100").unwrap(), Money::from_major(100));
        assert_eq!(Money::parse_amount("100.25").unwrap().as_decimal(), dec!(100.25));
        // trailing zeros do not count against the scale
        assert_eq!(Money::parse_amount("100.100").unwrap().as_decimal(), dec!(100.1));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_decimal(dec!(12.50)));
    }

    #[test]
    fn test_amount_rejects_bad_input() {
        for input in ["0", "-5", "1.234", "abc", "", "0.00"] {
            let err = Money::parse_amount(input).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount { .. }), "{input}");
        }
    }

    #[test]
    fn test_amount_ceiling() {
        assert_eq!(Money::parse_amount("1000000000000000").unwrap(), Money::MAX);
        for input in ["1000000000000000.01", "79228162514264337593543950335", "70000000000000000000000000000"] {
            let err = Money::parse_amount(input).unwrap_err();
            assert!(matches!(err, LedgerError::AmountOutOfRange { .. }), "{input}");
        }
    }

    #[test]
    fn test_checked_arithmetic() {
        let balance = Money::from_major(100);
        assert_eq!(balance.checked_add(Money::from_major(5)), Some(Money::from_major(105)));
        assert_eq!(Money::MAX.checked_add(Money::ZERO), Some(Money::MAX));
        assert_eq!(Money::MAX.checked_add(Money::from_decimal(dec!(0.01))), None);
        assert_eq!(
            Money::from_decimal(Decimal::MAX).checked_add(Money::from_major(1)),
            None
        );
        assert_eq!(balance.checked_sub(Money::from_major(40)), Some(Money::from_major(60)));
        assert_eq!(
            Money::from_decimal(Decimal::MIN).checked_sub(Money::from_major(1)),
            None
        );
    }

    #[test]
    fn test_money_display_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(0.625)).to_string(), "0.63");
        assert_eq!(Money::from_decimal(dec!(0.3871)).to_string(), "0.39");
        assert_eq!(Money::from_major(250).to_string(), "250.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let mut balance = Money::from_major(250);
        balance -= Money::from_decimal(dec!(20.50));
        assert_eq!(balance, Money::from_decimal(dec!(229.50)));
        balance += Money::from_major(1);
        assert_eq!(balance + Money::ZERO, Money::from_decimal(dec!(230.5)));
        assert!((Money::ZERO - balance) < Money::ZERO);
    }

    #[test]
    fn test_rate_bounds() {
        assert_eq!(Rate::parse_percentage("1.95").unwrap().as_percentage(), dec!(1.95));
        assert_eq!(Rate::parse_percentage("99.99").unwrap().as_decimal(), dec!(0.9999));

        for input in ["0", "100", "-1", "150", "x"] {
            let err = Rate::parse_percentage(input).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidRate { .. }), "{input}");
        }
    }

    #[test]
    fn test_rate_display_is_normalised() {
        assert_eq!(Rate::from_percentage(dec!(2.20)).to_string(), "2.2");
        assert_eq!(Rate::from_percentage(dec!(5)).to_string(), "5");
    }
}
