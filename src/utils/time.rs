//! Time utilities: parsing HH:MM, formatting hours.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time(t: &str) -> AppResult<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .map_err(|_| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&str>) -> AppResult<Option<NaiveTime>> {
    input.map(parse_time).transpose()
}

/// Decimal hours as `HH:MM`.
pub fn format_hours_hm(hours: f64) -> String {
    let mins = (hours * 60.0).round() as i64;
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_time_formats_parse() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("23:15:00").unwrap(),
            NaiveTime::from_hms_opt(23, 15, 0).unwrap()
        );
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn hours_as_clock() {
        assert_eq!(format_hours_hm(7.5), "07:30");
        assert_eq!(format_hours_hm(-0.25), "-00:15");
    }
}
