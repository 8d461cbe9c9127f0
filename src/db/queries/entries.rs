use super::{date_str, get_opt_instant, get_time, get_uuid, instant_str, time_str};
use crate::core::calculator::period::DateRange;
use crate::errors::AppResult;
use crate::models::ShiftEntry;
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

pub fn map_row(row: &Row) -> rusqlite::Result<ShiftEntry> {
    Ok(ShiftEntry {
        id: get_uuid(row, "id")?,
        shift_id: get_uuid(row, "shift_id")?,
        user_id: get_uuid(row, "user_id")?,
        actual_start_time: get_time(row, "actual_start_time")?,
        actual_end_time: get_time(row, "actual_end_time")?,
        actual_hours: row.get("actual_hours")?,
        sales: row.get("sales")?,
        tips: row.get("tips")?,
        cash_out: row.get("cash_out")?,
        other: row.get("other")?,
        notes: row.get("notes")?,
        hourly_rate: row.get("hourly_rate")?,
        gross_income: row.get("gross_income")?,
        total_income: row.get("total_income")?,
        net_income: row.get("net_income")?,
        deduction_percentage: row.get("deduction_percentage")?,
        created_at: get_opt_instant(row, "created_at")?,
        updated_at: get_opt_instant(row, "updated_at")?,
    })
}

/// Entries joined to their shift so the range applies to `shift_date`.
pub fn list(conn: &Connection, user_id: Uuid, range: Option<DateRange>) -> AppResult<Vec<ShiftEntry>> {
    let (start, end) = match range {
        Some(r) => (date_str(r.start), date_str(r.end)),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };
    let mut stmt = conn.prepare(
        "SELECT e.* FROM shift_entries e
         JOIN expected_shifts s ON s.id = e.shift_id
         WHERE e.user_id = ?1 AND s.shift_date >= ?2 AND s.shift_date <= ?3
         ORDER BY s.shift_date ASC, e.actual_start_time ASC",
    )?;
    let rows = stmt.query_map(params![user_id.to_string(), start, end], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, user_id: Uuid, id: Uuid) -> AppResult<Option<ShiftEntry>> {
    Ok(conn
        .query_row(
            "SELECT * FROM shift_entries WHERE user_id = ?1 AND id = ?2",
            [user_id.to_string(), id.to_string()],
            map_row,
        )
        .optional()?)
}

pub fn get_for_shift(conn: &Connection, user_id: Uuid, shift_id: Uuid) -> AppResult<Option<ShiftEntry>> {
    Ok(conn
        .query_row(
            "SELECT * FROM shift_entries WHERE user_id = ?1 AND shift_id = ?2",
            [user_id.to_string(), shift_id.to_string()],
            map_row,
        )
        .optional()?)
}

pub fn insert(conn: &Connection, e: &ShiftEntry) -> AppResult<()> {
    conn.execute(
        "INSERT INTO shift_entries (
            id, shift_id, user_id, actual_start_time, actual_end_time, actual_hours,
            sales, tips, cash_out, other, notes, hourly_rate, gross_income, total_income,
            net_income, deduction_percentage, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
        params![
            e.id.to_string(),
            e.shift_id.to_string(),
            e.user_id.to_string(),
            time_str(e.actual_start_time),
            time_str(e.actual_end_time),
            e.actual_hours,
            e.sales,
            e.tips,
            e.cash_out,
            e.other,
            e.notes,
            e.hourly_rate,
            e.gross_income,
            e.total_income,
            e.net_income,
            e.deduction_percentage,
            instant_str(e.created_at),
            instant_str(e.updated_at),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, e: &ShiftEntry) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE shift_entries SET
            actual_start_time = ?1, actual_end_time = ?2, actual_hours = ?3,
            sales = ?4, tips = ?5, cash_out = ?6, other = ?7, notes = ?8,
            hourly_rate = ?9, gross_income = ?10, total_income = ?11, net_income = ?12,
            deduction_percentage = ?13, updated_at = ?14
         WHERE id = ?15 AND user_id = ?16",
        params![
            time_str(e.actual_start_time),
            time_str(e.actual_end_time),
            e.actual_hours,
            e.sales,
            e.tips,
            e.cash_out,
            e.other,
            e.notes,
            e.hourly_rate,
            e.gross_income,
            e.total_income,
            e.net_income,
            e.deduction_percentage,
            instant_str(e.updated_at),
            e.id.to_string(),
            e.user_id.to_string(),
        ],
    )?)
}

pub fn delete(conn: &Connection, user_id: Uuid, id: Uuid) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM shift_entries WHERE id = ?1 AND user_id = ?2",
        [id.to_string(), user_id.to_string()],
    )?)
}
