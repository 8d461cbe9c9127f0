//! Date helpers: parsing, month/year bounds and `--range` expressions.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, Months, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.into()))
}

pub fn parse_optional_date(input: Option<&str>) -> AppResult<Option<NaiveDate>> {
    input.map(parse_date).transpose()
}

/// Sunday = 0 … Saturday = 6
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year:04}-{month:02}")))?;
    Ok((first, last_of_month(first)))
}

pub fn year_bounds(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first =
        NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| AppError::InvalidDate(year.to_string()))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| AppError::InvalidDate(year.to_string()))?;
    Ok((first, last))
}

/// Bounds of a single period token: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn token_bounds(token: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let t = token.trim();
    match t.len() {
        4 => {
            let y: i32 = t.parse().map_err(|_| AppError::InvalidDate(t.into()))?;
            year_bounds(y)
        }
        7 => {
            let (y, m) = t.split_once('-').ok_or_else(|| AppError::InvalidDate(t.into()))?;
            let y: i32 = y.parse().map_err(|_| AppError::InvalidDate(t.into()))?;
            let m: u32 = m.parse().map_err(|_| AppError::InvalidDate(t.into()))?;
            month_bounds(y, m)
        }
        10 => {
            let d = parse_date(t)?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidDate(format!(
            "unsupported range '{t}' (use YYYY, YYYY-MM or YYYY-MM-DD)"
        ))),
    }
}

/// Parse a `--range` value.
///
/// Accepts a single period (`2025`, `2025-03`, `2025-03-14`) or an interval
/// of two periods in the same format (`2025-01:2025-03`). The result is an
/// inclusive `(start, end)` pair.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((a, b)) => {
            if a.trim().len() != b.trim().len() {
                return Err(AppError::InvalidDate(format!(
                    "start and end of '{r}' must have the same format"
                )));
            }
            (token_bounds(a)?.0, token_bounds(b)?.1)
        }
        None => token_bounds(r)?,
    };
    if end < start {
        return Err(AppError::InvalidDate(format!("range '{r}' ends before it starts")));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2025-02").unwrap(), (d(2025, 2, 1), d(2025, 2, 28)));
        assert_eq!(parse_range("2025-06-15").unwrap(), (d(2025, 6, 15), d(2025, 6, 15)));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2025-01:2025-03").unwrap(),
            (d(2025, 1, 1), d(2025, 3, 31))
        );
        assert_eq!(
            parse_range("2025-01-10:2025-01-20").unwrap(),
            (d(2025, 1, 10), d(2025, 1, 20))
        );
    }

    #[test]
    fn bad_ranges() {
        assert!(parse_range("2025-01:2025").is_err());
        assert!(parse_range("2025-13").is_err());
        assert!(parse_range("2025-03:2025-01").is_err());
        assert!(parse_range("tomorrow").is_err());
    }

    #[test]
    fn weekday_index_starts_on_sunday() {
        // 2025-03-02 is a Sunday
        assert_eq!(weekday_index(d(2025, 3, 2)), 0);
        assert_eq!(weekday_index(d(2025, 3, 8)), 6);
    }
}
