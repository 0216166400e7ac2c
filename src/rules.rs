use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound;
use tracing::info;

use crate::decimal::Rate;
use crate::errors::{LedgerError, Result};

/// annual rate that applies from `date` until a later rule supersedes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRule {
    pub date: NaiveDate,
    /// display label only
    pub id: String,
    pub rate: Rate,
}

/// interest rule schedule, at most one rule per effective date
///
/// Viewed as a step function: the rate on any date is the rate of the rule with the latest
/// effective date on or before it, and zero when no such rule exists.
#[derive(Debug, Clone, Default)]
pub struct RateSchedule {
    rules: BTreeMap<NaiveDate, InterestRule>,
}

impl RateSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// insert a rule, replacing whatever rule already held that effective date
    pub fn define_rule(&mut self, date: NaiveDate, id: &str, rate: Rate) -> Result<InterestRule> {
        if id.trim().is_empty() {
            return Err(LedgerError::MalformedInput {
                expected: "<Date> <RuleId> <Rate in %>",
            });
        }
        if rate <= Rate::ZERO || rate.as_percentage() >= Decimal::ONE_HUNDRED {
            return Err(LedgerError::InvalidRate {
                input: rate.to_string(),
            });
        }

        let rule = InterestRule {
            date,
            id: id.to_string(),
            rate,
        };

        match self.rules.insert(date, rule.clone()) {
            Some(previous) => info!(
                date = %date,
                rule = %rule.id,
                rate = %rate,
                replaced = %previous.id,
                "interest rule replaced"
            ),
            None => info!(date = %date, rule = %rule.id, rate = %rate, "interest rule defined"),
        }

        Ok(rule)
    }

    /// rate in effect on `date`
    pub fn rate_on(&self, date: NaiveDate) -> Rate {
        self.rules
            .range(..=date)
            .next_back()
            .map(|(_, rule)| rule.rate)
            .unwrap_or(Rate::ZERO)
    }

    /// rules taking effect strictly after `after` and on or before `through`
    pub fn changes_within(
        &self,
        after: NaiveDate,
        through: NaiveDate,
    ) -> impl Iterator<Item = &InterestRule> {
        // an inverted range would make BTreeMap::range panic
        let through = through.max(after);
        self.rules
            .range((Bound::Excluded(after), Bound::Included(through)))
            .map(|(_, rule)| rule)
    }

    /// rules ascending by effective date
    pub fn iter(&self) -> impl Iterator<Item = &InterestRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pct(p: Decimal) -> Rate {
        Rate::from_percentage(p)
    }

    fn sample_schedule() -> RateSchedule {
        let mut schedule = RateSchedule::new();
        schedule.define_rule(date(2023, 6, 15), "RULE03", pct(dec!(2.20))).unwrap();
        schedule.define_rule(date(2023, 1, 1), "RULE01", pct(dec!(1.95))).unwrap();
        schedule.define_rule(date(2023, 5, 20), "RULE02", pct(dec!(1.90))).unwrap();
        schedule
    }

    #[test]
    fn test_iteration_is_chronological() {
        let schedule = sample_schedule();
        let ids: Vec<&str> = schedule.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["RULE01", "RULE02", "RULE03"]);
    }

    #[test]
    fn test_same_date_replaces_rule() {
        let mut schedule = sample_schedule();
        schedule.define_rule(date(2023, 5, 20), "RULE09", pct(dec!(3))).unwrap();

        assert_eq!(schedule.len(), 3);
        let rule = schedule.iter().find(|r| r.date == date(2023, 5, 20)).unwrap();
        assert_eq!(rule.id, "RULE09");
        assert_eq!(rule.rate, pct(dec!(3)));
    }

    #[test]
    fn test_rate_step_function() {
        let schedule = sample_schedule();
        assert_eq!(schedule.rate_on(date(2022, 12, 31)), Rate::ZERO);
        assert_eq!(schedule.rate_on(date(2023, 1, 1)), pct(dec!(1.95)));
        assert_eq!(schedule.rate_on(date(2023, 5, 19)), pct(dec!(1.95)));
        assert_eq!(schedule.rate_on(date(2023, 5, 20)), pct(dec!(1.90)));
        assert_eq!(schedule.rate_on(date(2023, 6, 14)), pct(dec!(1.90)));
        assert_eq!(schedule.rate_on(date(2023, 6, 15)), pct(dec!(2.20)));
        assert_eq!(schedule.rate_on(date(2030, 1, 1)), pct(dec!(2.20)));
    }

    #[test]
    fn test_changes_within_excludes_start() {
        let schedule = sample_schedule();
        let changes: Vec<&str> = schedule
            .changes_within(date(2023, 5, 20), date(2023, 6, 30))
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(changes, ["RULE03"]);

        assert_eq!(schedule.changes_within(date(2023, 7, 1), date(2023, 6, 1)).count(), 0);
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let mut schedule = RateSchedule::new();
        let err = schedule.define_rule(date(2023, 1, 1), "R", pct(dec!(100))).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRate { .. }));
        let err = schedule.define_rule(date(2023, 1, 1), "R", Rate::ZERO).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRate { .. }));
        let err = schedule.define_rule(date(2023, 1, 1), " ", pct(dec!(1))).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedInput { .. }));
        assert!(schedule.is_empty());
    }
}
