//! Row mapping and SQL for each table.
//!
//! Ids are stored as TEXT UUIDs, dates as `YYYY-MM-DD`, times as `HH:MM:SS`,
//! instants as RFC 3339 and booleans as 0/1.

pub mod achievements;
pub mod alerts;
pub mod employers;
pub mod entries;
pub mod profile;
pub mod shifts;
pub mod subscriptions;

use crate::errors::AppError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::Row;
use rusqlite::types::Type;
use uuid::Uuid;

pub(crate) const DATE_FMT: &str = "%Y-%m-%d";
pub(crate) const TIME_FMT: &str = "%H:%M:%S";

fn conversion_error(col: &str, err: AppError) -> rusqlite::Error {
    tracing::warn!(column = col, error = %err, "bad value in database row");
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub(crate) fn get_uuid(row: &Row, col: &str) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(col)?;
    Uuid::parse_str(&raw).map_err(|_| conversion_error(col, AppError::InvalidId(raw)))
}

pub(crate) fn get_opt_uuid(row: &Row, col: &str) -> rusqlite::Result<Option<Uuid>> {
    let raw: Option<String> = row.get(col)?;
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(|_| conversion_error(col, AppError::InvalidId(s))),
        None => Ok(None),
    }
}

pub(crate) fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, DATE_FMT)
        .map_err(|_| conversion_error(col, AppError::InvalidDate(raw)))
}

pub(crate) fn get_time(row: &Row, col: &str) -> rusqlite::Result<NaiveTime> {
    let raw: String = row.get(col)?;
    NaiveTime::parse_from_str(&raw, TIME_FMT)
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
        .map_err(|_| conversion_error(col, AppError::InvalidTime(raw)))
}

pub(crate) fn get_opt_instant(row: &Row, col: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| conversion_error(col, AppError::InvalidDate(s))),
        None => Ok(None),
    }
}

pub(crate) fn get_opt_json(row: &Row, col: &str) -> rusqlite::Result<Option<serde_json::Value>> {
    let raw: Option<String> = row.get(col)?;
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => serde_json::from_str(&s)
            .map(Some)
            .map_err(|e| conversion_error(col, AppError::Json(e))),
        None => Ok(None),
    }
}

/// Map a stored enum name through its `from_db_str`.
pub(crate) fn get_enum<T>(
    row: &Row,
    col: &str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(col)?;
    parse(&raw).ok_or_else(|| {
        conversion_error(col, AppError::Validation(format!("unknown {col} '{raw}'")))
    })
}

pub(crate) fn get_opt_enum<T>(
    row: &Row,
    col: &str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(col)?;
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => parse(&s).map(Some).ok_or_else(|| {
            conversion_error(col, AppError::Validation(format!("unknown {col} '{s}'")))
        }),
        None => Ok(None),
    }
}

pub(crate) fn date_str(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub(crate) fn time_str(t: NaiveTime) -> String {
    t.format(TIME_FMT).to_string()
}

pub(crate) fn instant_str(dt: Option<DateTime<Utc>>) -> Option<String> {
    dt.map(|d| d.to_rfc3339())
}

pub(crate) fn json_str(v: &Option<serde_json::Value>) -> Option<String> {
    v.as_ref().map(|v| v.to_string())
}
