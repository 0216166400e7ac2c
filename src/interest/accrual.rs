use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::account::Account;
use crate::decimal::{Money, Rate};
use crate::interest::weighted_balance;
use crate::rules::RateSchedule;
use crate::types::StatementPeriod;

/// day count convention for interest calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// actual days / 365, leap years included
    #[default]
    Actual365,
    /// actual days / 360
    Actual360,
}

impl DayCountConvention {
    /// divisor applied once to the summed weighted balances
    pub fn year_basis(&self) -> u32 {
        match self {
            DayCountConvention::Actual365 => 365,
            DayCountConvention::Actual360 => 360,
        }
    }
}

/// span of days over which both balance and rate stay constant; both ends inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualSegment {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub balance: Money,
    pub rate: Rate,
}

impl AccrualSegment {
    pub fn days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1).max(0) as u32
    }

    /// balance x rate x days for this segment, undivided
    pub fn weighted_amount(&self) -> Decimal {
        weighted_balance(self.balance, self.rate, self.days())
    }
}

/// accrual over a date range, with the segment breakdown it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accrual {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub segments: Vec<AccrualSegment>,
    pub year_basis: u32,
    /// unrounded; round for display only
    pub interest: Money,
}

impl Accrual {
    /// sum of the segment weighted amounts, before the year-basis division
    pub fn weighted_total(&self) -> Decimal {
        self.segments.iter().map(AccrualSegment::weighted_amount).sum()
    }
}

/// engine for accruing simple daily interest on a ledger balance
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualEngine {
    pub convention: DayCountConvention,
}

impl AccrualEngine {
    pub fn new(convention: DayCountConvention) -> Self {
        Self { convention }
    }

    /// interest earned by `account` over one calendar month
    pub fn accrue_month(
        &self,
        account: &Account,
        schedule: &RateSchedule,
        period: StatementPeriod,
    ) -> Accrual {
        self.accrue_between(account, schedule, period.first_day(), period.last_day())
    }

    /// interest earned by `account` from `start` through `end`, both inclusive
    ///
    /// The range is cut wherever a transaction lands (balance change) or a rule takes
    /// effect (rate change). Both apply from their own date onwards, so the segment ending
    /// the day before still carries the prior balance and rate. Weighted amounts are summed
    /// across segments and divided by the year basis exactly once.
    pub fn accrue_between(
        &self,
        account: &Account,
        schedule: &RateSchedule,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Accrual {
        let year_basis = self.convention.year_basis();

        if end < start {
            return Accrual {
                start,
                end,
                segments: Vec::new(),
                year_basis,
                interest: Money::ZERO,
            };
        }

        let mut boundaries: BTreeSet<NaiveDate> = account
            .transactions()
            .iter()
            .map(|t| t.date)
            .filter(|d| start < *d && *d <= end)
            .collect();
        boundaries.extend(schedule.changes_within(start, end).map(|rule| rule.date));
        boundaries.insert(start);

        let points: Vec<NaiveDate> = boundaries.into_iter().collect();
        let segments: Vec<AccrualSegment> = points
            .iter()
            .enumerate()
            .map(|(i, &segment_start)| {
                let segment_end = points
                    .get(i + 1)
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(end);
                AccrualSegment {
                    start: segment_start,
                    end: segment_end,
                    balance: account.balance_on(segment_start),
                    rate: schedule.rate_on(segment_start),
                }
            })
            .collect();

        for segment in &segments {
            debug!(
                account = %account.id(),
                start = %segment.start,
                end = %segment.end,
                days = segment.days(),
                balance = %segment.balance,
                rate = %segment.rate,
                "accrual segment"
            );
        }

        let weighted: Decimal = segments.iter().map(AccrualSegment::weighted_amount).sum();
        let interest = Money::from_decimal(weighted / Decimal::from(year_basis));

        debug!(account = %account.id(), %start, %end, interest = %interest, "interest accrued");

        Accrual {
            start,
            end,
            segments,
            year_basis,
            interest,
        }
    }
}
