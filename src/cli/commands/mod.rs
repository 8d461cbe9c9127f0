pub mod achievements;
pub mod alerts;
pub mod backup;
pub mod calc;
pub mod config;
pub mod db;
pub mod employer;
pub mod entry;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod pin;
pub mod profile;
pub mod shift;
pub mod stats;
pub mod subscription;
pub mod targets;

use crate::core::calculator::period::DateRange;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{parse_optional_date, parse_range, today};
use chrono::NaiveDate;
use uuid::Uuid;

pub(crate) fn parse_id(s: &str) -> AppResult<Uuid> {
    Uuid::parse_str(s.trim()).map_err(|_| AppError::InvalidId(s.to_string()))
}

pub(crate) fn parse_optional_id(s: Option<&str>) -> AppResult<Option<Uuid>> {
    s.map(parse_id).transpose()
}

pub(crate) fn parse_optional_range(r: Option<&str>) -> AppResult<Option<DateRange>> {
    match r {
        None => Ok(None),
        Some(r) if r.eq_ignore_ascii_case("all") => Ok(None),
        Some(r) => {
            let (start, end) = parse_range(r)?;
            Ok(Some(DateRange::new(start, end)))
        }
    }
}

/// `--date` when given, otherwise the local today.
pub(crate) fn reference_day(date: Option<&str>) -> AppResult<NaiveDate> {
    Ok(parse_optional_date(date)?.unwrap_or_else(today))
}
