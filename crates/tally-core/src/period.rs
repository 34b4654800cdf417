//! Period keys and date ranges
//!
//! A period key is the canonical string for the calendar bucket a date falls
//! into: "2024-03-15" (daily), "2024-W11" (weekly, ISO-8601), "2024-03"
//! (monthly), "2024-Q1" (quarterly), "2024" (yearly).

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Granularity, Transaction};

/// Window used when no granularity was given
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Format a date as its period key
pub fn period_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => date.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => {
            // ISO week: the week containing the year's first Thursday is week 1,
            // so early-January dates can belong to the previous ISO year
            let week = date.iso_week();
            format!("{:04}-W{:02}", week.year(), week.week())
        }
        Granularity::Monthly => date.format("%Y-%m").to_string(),
        Granularity::Quarterly => format!("{:04}-Q{}", date.year(), quarter_of(date)),
        Granularity::Yearly => format!("{:04}", date.year()),
    }
}

/// First calendar day of the period containing `date`
pub fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Weekly => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        Granularity::Monthly => first_of_month(date.year(), date.month()),
        Granularity::Quarterly => {
            let first_month = (quarter_of(date) - 1) * 3 + 1;
            first_of_month(date.year(), first_month)
        }
        Granularity::Yearly => first_of_month(date.year(), 1),
    }
}

/// Quarter number 1-4
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// A closed date-time interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Whole days from `start` 00:00:00 to `end` 23:59:59
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end_of_day(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = end_of_day(date);
        day_end >= self.start && day_start <= self.end
    }

    /// Number of calendar days touched by the range (at least 1)
    pub fn days(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days() + 1
    }
}

/// Resolve a period against the local clock
///
/// When both `start` and `end` are given they are used verbatim; otherwise
/// the range is derived from `granularity`. `None` means the trailing 30 days.
pub fn resolve_range(
    granularity: Option<Granularity>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange> {
    resolve_range_at(Local::now().naive_local(), granularity, start, end)
}

/// Resolve a period against an explicit "now"
pub fn resolve_range_at(
    now: NaiveDateTime,
    granularity: Option<Granularity>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(Error::Validation(format!(
                "Range start {} is after end {}",
                start, end
            )));
        }
        return Ok(DateRange::from_dates(start, end));
    }

    let today = now.date();

    let range = match granularity {
        Some(Granularity::Daily) => DateRange::from_dates(today, today),
        Some(Granularity::Weekly) => DateRange {
            start: now - Duration::days(7),
            end: now,
        },
        Some(Granularity::Monthly) => {
            let first = first_of_month(today.year(), today.month());
            DateRange::from_dates(first, last_of_month(first))
        }
        Some(Granularity::Quarterly) => {
            let first = period_start(today, Granularity::Quarterly);
            let last_month_first = first_of_month(first.year(), first.month() + 2);
            DateRange::from_dates(first, last_of_month(last_month_first))
        }
        Some(Granularity::Yearly) => DateRange::from_dates(
            first_of_month(today.year(), 1),
            NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
        ),
        None => DateRange {
            start: now - Duration::days(DEFAULT_WINDOW_DAYS),
            end: now,
        },
    };

    Ok(range)
}

/// Keep only transactions dated inside the range
pub fn filter_by_range(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| range.contains(tx.date))
        .cloned()
        .collect()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // month is always 1-12 here, and day 1 exists in every month
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let next = if first.month() == 12 {
        first_of_month(first.year() + 1, 1)
    } else {
        first_of_month(first.year(), first.month() + 1)
    };
    next.pred_opt().unwrap_or(first)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_period_key_formats() {
        let d = date(2024, 3, 15);
        assert_eq!(period_key(d, Granularity::Daily), "2024-03-15");
        assert_eq!(period_key(d, Granularity::Weekly), "2024-W11");
        assert_eq!(period_key(d, Granularity::Monthly), "2024-03");
        assert_eq!(period_key(d, Granularity::Quarterly), "2024-Q1");
        assert_eq!(period_key(d, Granularity::Yearly), "2024");
    }

    #[test]
    fn test_iso_week_jan_first_2024() {
        // Jan 1, 2024 is a Monday, so it opens ISO week 1
        assert_eq!(period_key(date(2024, 1, 1), Granularity::Weekly), "2024-W01");
    }

    #[test]
    fn test_iso_week_year_boundaries() {
        // Jan 1, 2021 is a Friday: still in week 53 of 2020
        assert_eq!(period_key(date(2021, 1, 1), Granularity::Weekly), "2020-W53");
        // Dec 30, 2024 is a Monday whose Thursday is in 2025
        assert_eq!(period_key(date(2024, 12, 30), Granularity::Weekly), "2025-W01");
    }

    #[test]
    fn test_quarter_keys() {
        assert_eq!(period_key(date(2024, 4, 1), Granularity::Quarterly), "2024-Q2");
        assert_eq!(period_key(date(2024, 9, 30), Granularity::Quarterly), "2024-Q3");
        assert_eq!(period_key(date(2024, 12, 31), Granularity::Quarterly), "2024-Q4");
    }

    #[test]
    fn test_period_start() {
        let d = date(2024, 8, 15); // Thursday
        assert_eq!(period_start(d, Granularity::Weekly), date(2024, 8, 12));
        assert_eq!(period_start(d, Granularity::Monthly), date(2024, 8, 1));
        assert_eq!(period_start(d, Granularity::Quarterly), date(2024, 7, 1));
        assert_eq!(period_start(d, Granularity::Yearly), date(2024, 1, 1));
    }

    #[test]
    fn test_explicit_range_is_closed() {
        let range = resolve_range_at(
            noon(2024, 6, 1),
            Some(Granularity::Monthly),
            Some(date(2024, 1, 10)),
            Some(date(2024, 1, 20)),
        )
        .unwrap();

        assert_eq!(range.start, date(2024, 1, 10).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.end, date(2024, 1, 20).and_hms_opt(23, 59, 59).unwrap());
        assert!(range.contains(date(2024, 1, 20)));
        assert!(!range.contains(date(2024, 1, 21)));
        assert_eq!(range.days(), 11);
    }

    #[test]
    fn test_explicit_range_reversed_is_error() {
        let result = resolve_range_at(
            noon(2024, 6, 1),
            None,
            Some(date(2024, 2, 1)),
            Some(date(2024, 1, 1)),
        );
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_monthly_range() {
        let range = resolve_range_at(noon(2024, 2, 10), Some(Granularity::Monthly), None, None)
            .unwrap();
        assert_eq!(range.start.date(), date(2024, 2, 1));
        assert_eq!(range.end.date(), date(2024, 2, 29));
    }

    #[test]
    fn test_quarterly_range() {
        let range = resolve_range_at(noon(2024, 11, 3), Some(Granularity::Quarterly), None, None)
            .unwrap();
        assert_eq!(range.start.date(), date(2024, 10, 1));
        assert_eq!(range.end.date(), date(2024, 12, 31));
    }

    #[test]
    fn test_weekly_and_daily_ranges() {
        let now = noon(2024, 5, 20);
        let weekly = resolve_range_at(now, Some(Granularity::Weekly), None, None).unwrap();
        assert_eq!(weekly.end, now);
        assert_eq!(weekly.start, now - Duration::days(7));

        let daily = resolve_range_at(now, Some(Granularity::Daily), None, None).unwrap();
        assert_eq!(daily.start.date(), date(2024, 5, 20));
        assert_eq!(daily.end.date(), date(2024, 5, 20));
    }

    #[test]
    fn test_yearly_range() {
        let range = resolve_range_at(noon(2023, 7, 4), Some(Granularity::Yearly), None, None)
            .unwrap();
        assert_eq!(range.start.date(), date(2023, 1, 1));
        assert_eq!(range.end.date(), date(2023, 12, 31));
    }

    #[test]
    fn test_missing_granularity_defaults_to_30_days() {
        let now = noon(2024, 5, 20);
        let range = resolve_range_at(now, None, Some(date(2024, 1, 1)), None).unwrap();
        assert_eq!(range.start, now - Duration::days(30));
        assert_eq!(range.end, now);
    }

    #[test]
    fn test_filter_by_range() {
        let txs = vec![
            Transaction::expense(date(2024, 1, 5), 10.0, "Food"),
            Transaction::expense(date(2024, 2, 5), 20.0, "Food"),
        ];
        let range = DateRange::from_dates(date(2024, 1, 1), date(2024, 1, 31));
        let filtered = filter_by_range(&txs, &range);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].amount, 10.0);
    }
}
