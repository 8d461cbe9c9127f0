//! Dashboard periods and their date ranges.

use crate::errors::{AppError, AppResult};
use crate::utils::date::{first_of_month, last_of_month, weekday_index, year_bounds};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPeriod {
    Today,
    Week,
    Month,
    Year,
    FourWeeks,
    Custom,
}

impl DashboardPeriod {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "today" | "day" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "four_weeks" | "4weeks" | "4w" => Ok(Self::FourWeeks),
            "custom" => Ok(Self::Custom),
            other => Err(AppError::Validation(format!(
                "Unknown period '{other}' (today, week, month, year, four-weeks, custom)"
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
            Self::FourWeeks => "4 Weeks",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for DashboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} → {}", self.start, self.end)
        }
    }
}

fn minus_days(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(date)
}

fn plus_days(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(date)
}

/// First day of the week containing `date`; `week_start` uses Sunday = 0.
pub fn start_of_week(date: NaiveDate, week_start: u32) -> NaiveDate {
    let back = (weekday_index(date) + 7 - week_start % 7) % 7;
    minus_days(date, back as u64)
}

pub fn date_range(period: DashboardPeriod, today: NaiveDate, week_start: u32) -> DateRange {
    match period {
        DashboardPeriod::Today => DateRange::new(today, today),
        DashboardPeriod::Week => {
            let start = start_of_week(today, week_start);
            DateRange::new(start, plus_days(start, 6))
        }
        DashboardPeriod::Month | DashboardPeriod::Custom => {
            DateRange::new(first_of_month(today), last_of_month(today))
        }
        DashboardPeriod::Year => match year_bounds(today.year()) {
            Ok((start, end)) => DateRange::new(start, end),
            Err(_) => DateRange::new(today, today),
        },
        DashboardPeriod::FourWeeks => {
            let week = start_of_week(today, week_start);
            DateRange::new(minus_days(week, 21), plus_days(week, 6))
        }
    }
}

/// The range immediately before `current` for the same period kind.
pub fn previous_range(period: DashboardPeriod, current: DateRange) -> DateRange {
    match period {
        DashboardPeriod::Today => {
            let d = minus_days(current.start, 1);
            DateRange::new(d, d)
        }
        DashboardPeriod::Week => {
            DateRange::new(minus_days(current.start, 7), minus_days(current.end, 7))
        }
        DashboardPeriod::FourWeeks => {
            DateRange::new(minus_days(current.start, 28), minus_days(current.end, 28))
        }
        DashboardPeriod::Month => {
            let prev = current
                .start
                .checked_sub_months(Months::new(1))
                .unwrap_or(current.start);
            DateRange::new(first_of_month(prev), last_of_month(prev))
        }
        DashboardPeriod::Year => match year_bounds(current.start.year() - 1) {
            Ok((start, end)) => DateRange::new(start, end),
            Err(_) => current,
        },
        DashboardPeriod::Custom => {
            let len = current.days() as u64;
            DateRange::new(minus_days(current.start, len), minus_days(current.start, 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_start_is_respected() {
        // Wednesday 2025-03-05
        let wed = d(2025, 3, 5);
        assert_eq!(start_of_week(wed, 0), d(2025, 3, 2));
        assert_eq!(start_of_week(wed, 1), d(2025, 3, 3));
        assert_eq!(start_of_week(wed, 3), wed);
        assert_eq!(start_of_week(wed, 4), d(2025, 2, 27));
    }

    #[test]
    fn ranges_for_each_period() {
        let today = d(2025, 3, 5);
        assert_eq!(
            date_range(DashboardPeriod::Today, today, 0),
            DateRange::new(today, today)
        );
        assert_eq!(
            date_range(DashboardPeriod::Week, today, 1),
            DateRange::new(d(2025, 3, 3), d(2025, 3, 9))
        );
        assert_eq!(
            date_range(DashboardPeriod::Month, today, 0),
            DateRange::new(d(2025, 3, 1), d(2025, 3, 31))
        );
        assert_eq!(
            date_range(DashboardPeriod::Year, today, 0),
            DateRange::new(d(2025, 1, 1), d(2025, 12, 31))
        );
        let four = date_range(DashboardPeriod::FourWeeks, today, 0);
        assert_eq!(four, DateRange::new(d(2025, 2, 9), d(2025, 3, 8)));
        assert_eq!(four.days(), 28);
    }

    #[test]
    fn previous_ranges() {
        let today = d(2025, 3, 31);
        let month = date_range(DashboardPeriod::Month, today, 0);
        assert_eq!(
            previous_range(DashboardPeriod::Month, month),
            DateRange::new(d(2025, 2, 1), d(2025, 2, 28))
        );
        let day = date_range(DashboardPeriod::Today, today, 0);
        assert_eq!(
            previous_range(DashboardPeriod::Today, day),
            DateRange::new(d(2025, 3, 30), d(2025, 3, 30))
        );
        let custom = DateRange::new(d(2025, 3, 10), d(2025, 3, 14));
        assert_eq!(
            previous_range(DashboardPeriod::Custom, custom),
            DateRange::new(d(2025, 3, 5), d(2025, 3, 9))
        );
    }

    #[test]
    fn period_names_parse() {
        assert_eq!(
            DashboardPeriod::parse("four-weeks").unwrap(),
            DashboardPeriod::FourWeeks
        );
        assert_eq!(DashboardPeriod::parse("Week").unwrap(), DashboardPeriod::Week);
        assert!(DashboardPeriod::parse("decade").is_err());
    }
}
