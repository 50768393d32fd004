//! Calendar arithmetic shared by savings cadences and loan schedules.
//!
//! Month arithmetic clamps to the last day of the target month, so
//! 31 January plus one month lands on the last day of February. The
//! half-month used by two-part repayments is one calendar month followed by
//! fifteen days. Time of day is preserved throughout.

use chrono::{DateTime, Duration, Months, Utc};

pub const HALF_MONTH_DAYS: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("date arithmetic out of range starting from {from}")]
pub struct CalendarError {
    pub from: DateTime<Utc>,
}

pub fn add_months(from: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, CalendarError> {
    from.checked_add_months(Months::new(months))
        .ok_or(CalendarError { from })
}

pub fn add_days(from: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, CalendarError> {
    from.checked_add_signed(Duration::days(days))
        .ok_or(CalendarError { from })
}

/// One and a half calendar months: `+1 month`, then `+15 days`.
pub fn add_month_and_a_half(from: DateTime<Utc>) -> Result<DateTime<Utc>, CalendarError> {
    add_months(from, 1).and_then(|date| add_days(date, HALF_MONTH_DAYS))
}
