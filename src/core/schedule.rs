//! Amortization logic - Splits a loan's principal into monthly installments.
//!
//! The principal is divided evenly across `terms` installments. Whatever does not
//! divide evenly is spread one unit at a time over the trailing installments, so
//! the schedule always sums to the principal exactly. Installment `i` falls due
//! `i` calendar months after the loan's processing date.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};

/// A single planned installment, before it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Installment {
    /// 1-based position in the schedule
    pub sequence: i32,
    /// Installment size in minor currency units
    pub amount: i64,
    /// Date the installment falls due
    pub due_date: NaiveDate,
}

/// Splits `amount` into `terms` installment sizes.
///
/// Every installment gets `amount / terms`; the last `amount % terms`
/// installments get one extra unit each.
///
/// # Errors
/// Returns `InvalidAmount` for a non-positive amount and `InvalidTerms` for a
/// non-positive installment count.
pub fn split_installments(amount: i64, terms: i32) -> Result<Vec<i64>> {
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }
    if terms <= 0 {
        return Err(Error::InvalidTerms { terms });
    }

    let count = i64::from(terms);
    let base = amount / count;
    let remainder = amount % count;
    let first_bumped = count - remainder + 1;

    Ok((1..=count)
        .map(|i| if i >= first_bumped { base + 1 } else { base })
        .collect())
}

/// Advances `processed_at` by `offset_months` whole calendar months.
///
/// The day of month is kept; when the target month is shorter, the date is
/// clamped to that month's last day (Jan 31 + 1 month is Feb 28/29).
pub fn due_date(processed_at: NaiveDate, offset_months: u32) -> Result<NaiveDate> {
    // Months counted from year 0 so the rollover is a plain div/mod
    let month_index = i64::from(processed_at.month0()) + i64::from(offset_months);
    let year = i64::from(processed_at.year()) + month_index / 12;
    let month = u32::try_from(month_index % 12).unwrap_or_default() + 1;

    let year = i32::try_from(year).map_err(|_| Error::InvalidDate {
        message: format!("year {year} is out of range"),
    })?;

    let last_day = last_day_of_month(year, month)?;
    let day = processed_at.day().min(last_day);

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::InvalidDate {
        message: format!("{year:04}-{month:02}-{day:02} is not a valid date"),
    })
}

fn last_day_of_month(year: i32, month: u32) -> Result<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .ok_or_else(|| Error::InvalidDate {
            message: format!("{year:04}-{month:02} is out of range"),
        })
}

/// Builds the full installment plan for a loan.
///
/// # Errors
/// Fails on the same inputs as [`split_installments`], or if a due date would
/// fall outside the supported calendar range.
pub fn build_schedule(amount: i64, terms: i32, processed_at: NaiveDate) -> Result<Vec<Installment>> {
    split_installments(amount, terms)?
        .into_iter()
        .zip(1..=terms)
        .map(|(amount, sequence)| {
            let offset = u32::try_from(sequence).map_err(|_| Error::InvalidTerms { terms })?;
            Ok(Installment {
                sequence,
                amount,
                due_date: due_date(processed_at, offset)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_split_pushes_remainder_to_tail() {
        assert_eq!(split_installments(5000, 3).unwrap(), vec![1666, 1667, 1667]);
        assert_eq!(split_installments(10, 4).unwrap(), vec![2, 2, 3, 3]);
        assert_eq!(split_installments(9, 3).unwrap(), vec![3, 3, 3]);
    }

    #[test]
    fn test_split_sums_to_amount() {
        for amount in [1_i64, 7, 99, 1000, 5000, 123_457] {
            for terms in 1..=24 {
                let parts = split_installments(amount, terms).unwrap();
                assert_eq!(parts.len(), usize::try_from(terms).unwrap());
                assert_eq!(parts.iter().sum::<i64>(), amount);

                // Only the trailing `amount % terms` installments carry the extra unit
                let base = amount / i64::from(terms);
                let bumped = usize::try_from(amount % i64::from(terms)).unwrap();
                let split_at = parts.len() - bumped;
                assert!(parts[..split_at].iter().all(|&p| p == base));
                assert!(parts[split_at..].iter().all(|&p| p == base + 1));
            }
        }
    }

    #[test]
    fn test_split_more_terms_than_amount() {
        // 2 units over 5 installments leaves the first three at zero
        assert_eq!(split_installments(2, 5).unwrap(), vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_split_rejects_invalid_input() {
        assert!(matches!(
            split_installments(0, 3),
            Err(Error::InvalidAmount { amount: 0 })
        ));
        assert!(matches!(
            split_installments(-10, 3),
            Err(Error::InvalidAmount { amount: -10 })
        ));
        assert!(matches!(
            split_installments(5000, 0),
            Err(Error::InvalidTerms { terms: 0 })
        ));
        assert!(matches!(
            split_installments(5000, -2),
            Err(Error::InvalidTerms { terms: -2 })
        ));
    }

    #[test]
    fn test_due_date_rolls_over_year() {
        assert_eq!(due_date(date(2020, 12, 5), 1).unwrap(), date(2021, 1, 5));
        assert_eq!(due_date(date(2020, 11, 5), 2).unwrap(), date(2021, 1, 5));
        assert_eq!(due_date(date(2020, 1, 20), 12).unwrap(), date(2021, 1, 20));
        assert_eq!(due_date(date(2020, 1, 20), 25).unwrap(), date(2022, 2, 20));
    }

    #[test]
    fn test_due_date_clamps_to_month_end() {
        assert_eq!(due_date(date(2020, 1, 31), 1).unwrap(), date(2020, 2, 29));
        assert_eq!(due_date(date(2021, 1, 31), 1).unwrap(), date(2021, 2, 28));
        assert_eq!(due_date(date(2021, 1, 31), 3).unwrap(), date(2021, 4, 30));
        // Clamping does not carry into later installments
        assert_eq!(due_date(date(2021, 1, 31), 2).unwrap(), date(2021, 3, 31));
    }

    #[test]
    fn test_build_schedule_example() {
        let schedule = build_schedule(5000, 3, date(2020, 1, 20)).unwrap();

        assert_eq!(
            schedule,
            vec![
                Installment {
                    sequence: 1,
                    amount: 1666,
                    due_date: date(2020, 2, 20)
                },
                Installment {
                    sequence: 2,
                    amount: 1667,
                    due_date: date(2020, 3, 20)
                },
                Installment {
                    sequence: 3,
                    amount: 1667,
                    due_date: date(2020, 4, 20)
                },
            ]
        );
    }

    #[test]
    fn test_build_schedule_due_dates_strictly_increase() {
        let schedule = build_schedule(120_000, 36, date(2019, 10, 31)).unwrap();
        assert_eq!(schedule.len(), 36);
        for pair in schedule.windows(2) {
            assert!(pair[0].due_date < pair[1].due_date);
        }
        assert_eq!(schedule[35].due_date, date(2022, 10, 31));
    }
}
