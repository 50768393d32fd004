use chrono::{DateTime, Utc};

use super::domain::{Installment, InstallmentStatus, RepaymentMethod};
use crate::calendar::{self, CalendarError};
use crate::money::round_to_kobo;

/// Term of every loan, in calendar months.
pub const LOAN_TERM_MONTHS: u32 = 3;

pub fn loan_due_date(applied_at: DateTime<Utc>) -> Result<DateTime<Utc>, CalendarError> {
    calendar::add_months(applied_at, LOAN_TERM_MONTHS)
}

/// Due dates for each installment of `method`, in order.
pub fn installment_due_dates(
    method: RepaymentMethod,
    applied_at: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, CalendarError> {
    match method {
        RepaymentMethod::OneTime => Ok(vec![loan_due_date(applied_at)?]),
        RepaymentMethod::TwoPart => Ok(vec![
            calendar::add_month_and_a_half(applied_at)?,
            loan_due_date(applied_at)?,
        ]),
        RepaymentMethod::Installmental => (1..=LOAN_TERM_MONTHS)
            .map(|month| calendar::add_months(applied_at, month))
            .collect(),
    }
}

/// Build the pending repayment schedule for `total_repayment`.
pub fn build_schedule(
    method: RepaymentMethod,
    total_repayment: f64,
    applied_at: DateTime<Utc>,
) -> Result<Vec<Installment>, CalendarError> {
    let due_dates = installment_due_dates(method, applied_at)?;
    let amounts = split_evenly(total_repayment, method.installment_count());

    Ok(amounts
        .into_iter()
        .zip(due_dates)
        .map(|(amount, due_date)| Installment {
            amount,
            due_date,
            paid_date: None,
            status: InstallmentStatus::Pending,
        })
        .collect())
}

/// Equal kobo-rounded parts; the final part absorbs the rounding remainder.
fn split_evenly(total: f64, parts: u32) -> Vec<f64> {
    let parts = parts.max(1);
    let share = round_to_kobo(total / f64::from(parts));
    let leading = share * f64::from(parts - 1);

    let mut amounts = vec![share; (parts - 1) as usize];
    amounts.push(round_to_kobo(total - leading));
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn applied() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 14, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn one_time_pays_everything_at_term_end() {
        let schedule = build_schedule(RepaymentMethod::OneTime, 55_000.0, applied()).expect("ok");
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].amount, 55_000.0);
        assert_eq!(schedule[0].due_date, date(2025, 6, 10));
        assert_eq!(schedule[0].status, InstallmentStatus::Pending);
    }

    #[test]
    fn two_part_splits_at_month_and_a_half() {
        let schedule = build_schedule(RepaymentMethod::TwoPart, 69_000.0, applied()).expect("ok");
        let amounts: Vec<f64> = schedule.iter().map(|item| item.amount).collect();
        assert_eq!(amounts, vec![34_500.0, 34_500.0]);
        assert_eq!(schedule[0].due_date, date(2025, 4, 25));
        assert_eq!(schedule[1].due_date, date(2025, 6, 10));
    }

    #[test]
    fn installmental_is_monthly_thirds() {
        let schedule =
            build_schedule(RepaymentMethod::Installmental, 90_000.0, applied()).expect("ok");
        let amounts: Vec<f64> = schedule.iter().map(|item| item.amount).collect();
        assert_eq!(amounts, vec![30_000.0, 30_000.0, 30_000.0]);
        let due: Vec<_> = schedule.iter().map(|item| item.due_date).collect();
        assert_eq!(due, vec![date(2025, 4, 10), date(2025, 5, 10), date(2025, 6, 10)]);
        assert!(schedule
            .iter()
            .all(|item| item.status == InstallmentStatus::Pending && item.paid_date.is_none()));
    }

    #[test]
    fn uneven_totals_still_sum_exactly() {
        for method in RepaymentMethod::ALL {
            for total in [100_000.0, 71_500.0, 12_345.67, 1.0, 33_333.34] {
                let schedule = build_schedule(method, total, applied()).expect("ok");
                let sum: f64 = schedule.iter().map(|item| item.amount).sum();
                assert!(
                    (sum - total).abs() < 0.01,
                    "{method} schedule for {total} sums to {sum}"
                );
                assert_eq!(schedule.len() as u32, method.installment_count());
            }
        }
    }

    #[test]
    fn month_end_applications_clamp() {
        let applied = date(2025, 11, 30);
        let due = loan_due_date(applied).expect("ok");
        assert_eq!(due, date(2026, 2, 28));

        let dates =
            installment_due_dates(RepaymentMethod::Installmental, applied).expect("ok");
        assert_eq!(dates, vec![date(2025, 12, 30), date(2026, 1, 30), date(2026, 2, 28)]);
    }
}
