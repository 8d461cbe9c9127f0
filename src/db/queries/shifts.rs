use super::{
    date_str, get_date, get_enum, get_opt_instant, get_opt_uuid, get_time, get_uuid,
    instant_str, time_str,
};
use crate::core::calculator::period::DateRange;
use crate::errors::AppResult;
use crate::models::{ExpectedShift, ShiftStatus};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use uuid::Uuid;

pub fn map_row(row: &Row) -> rusqlite::Result<ExpectedShift> {
    Ok(ExpectedShift {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        employer_id: get_opt_uuid(row, "employer_id")?,
        shift_date: get_date(row, "shift_date")?,
        start_time: get_time(row, "start_time")?,
        end_time: get_time(row, "end_time")?,
        expected_hours: row.get("expected_hours")?,
        hourly_rate: row.get("hourly_rate")?,
        lunch_break_minutes: row.get("lunch_break_minutes")?,
        sales_target: row.get("sales_target")?,
        status: get_enum(row, "status", ShiftStatus::from_db_str)?,
        alert_minutes: row.get("alert_minutes")?,
        notes: row.get("notes")?,
        created_at: get_opt_instant(row, "created_at")?,
        updated_at: get_opt_instant(row, "updated_at")?,
    })
}

pub fn list(
    conn: &Connection,
    user_id: Uuid,
    range: Option<DateRange>,
    status: Option<ShiftStatus>,
) -> AppResult<Vec<ExpectedShift>> {
    let mut sql = String::from("SELECT * FROM expected_shifts WHERE user_id = ?");
    let mut args: Vec<Value> = vec![Value::Text(user_id.to_string())];

    if let Some(r) = range {
        sql.push_str(" AND shift_date >= ? AND shift_date <= ?");
        args.push(Value::Text(date_str(r.start)));
        args.push(Value::Text(date_str(r.end)));
    }
    if let Some(s) = status {
        sql.push_str(" AND status = ?");
        args.push(Value::Text(s.as_str().to_string()));
    }
    sql.push_str(" ORDER BY shift_date ASC, start_time ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, user_id: Uuid, id: Uuid) -> AppResult<Option<ExpectedShift>> {
    Ok(conn
        .query_row(
            "SELECT * FROM expected_shifts WHERE user_id = ?1 AND id = ?2",
            [user_id.to_string(), id.to_string()],
            map_row,
        )
        .optional()?)
}

pub fn insert(conn: &Connection, s: &ExpectedShift) -> AppResult<()> {
    conn.execute(
        "INSERT INTO expected_shifts (
            id, user_id, employer_id, shift_date, start_time, end_time, expected_hours,
            hourly_rate, lunch_break_minutes, sales_target, status, alert_minutes, notes,
            created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            s.id.to_string(),
            s.user_id.to_string(),
            s.employer_id.map(|id| id.to_string()),
            date_str(s.shift_date),
            time_str(s.start_time),
            time_str(s.end_time),
            s.expected_hours,
            s.hourly_rate,
            s.lunch_break_minutes,
            s.sales_target,
            s.status.as_str(),
            s.alert_minutes,
            s.notes,
            instant_str(s.created_at),
            instant_str(s.updated_at),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, s: &ExpectedShift) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE expected_shifts SET
            employer_id = ?1, shift_date = ?2, start_time = ?3, end_time = ?4,
            expected_hours = ?5, hourly_rate = ?6, lunch_break_minutes = ?7,
            sales_target = ?8, status = ?9, alert_minutes = ?10, notes = ?11,
            updated_at = ?12
         WHERE id = ?13 AND user_id = ?14",
        params![
            s.employer_id.map(|id| id.to_string()),
            date_str(s.shift_date),
            time_str(s.start_time),
            time_str(s.end_time),
            s.expected_hours,
            s.hourly_rate,
            s.lunch_break_minutes,
            s.sales_target,
            s.status.as_str(),
            s.alert_minutes,
            s.notes,
            instant_str(s.updated_at),
            s.id.to_string(),
            s.user_id.to_string(),
        ],
    )?)
}

/// The entry goes with it (ON DELETE CASCADE).
pub fn delete(conn: &Connection, user_id: Uuid, id: Uuid) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM expected_shifts WHERE id = ?1 AND user_id = ?2",
        [id.to_string(), user_id.to_string()],
    )?)
}
