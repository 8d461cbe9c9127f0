use super::{get_enum, get_opt_instant, get_opt_json, get_uuid, instant_str, json_str};
use crate::errors::AppResult;
use crate::models::{Alert, AlertType};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use uuid::Uuid;

pub fn map_row(row: &Row) -> rusqlite::Result<Alert> {
    Ok(Alert {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        alert_type: get_enum(row, "alert_type", AlertType::from_db_str)?,
        title: row.get("title")?,
        message: row.get("message")?,
        is_read: row.get::<_, i64>("is_read")? == 1,
        action: row.get("action")?,
        data: get_opt_json(row, "data")?,
        created_at: get_opt_instant(row, "created_at")?,
        read_at: get_opt_instant(row, "read_at")?,
    })
}

pub fn list(conn: &Connection, user_id: Uuid, unread_only: bool) -> AppResult<Vec<Alert>> {
    let sql = if unread_only {
        "SELECT * FROM alerts WHERE user_id = ?1 AND is_read = 0 ORDER BY created_at DESC"
    } else {
        "SELECT * FROM alerts WHERE user_id = ?1 ORDER BY created_at DESC"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([user_id.to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert(conn: &Connection, a: &Alert) -> AppResult<()> {
    conn.execute(
        "INSERT INTO alerts (id, user_id, alert_type, title, message, is_read, action, data,
                             created_at, read_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            a.id.to_string(),
            a.user_id.to_string(),
            a.alert_type.as_str(),
            a.title,
            a.message,
            a.is_read as i64,
            a.action,
            json_str(&a.data),
            instant_str(a.created_at),
            instant_str(a.read_at),
        ],
    )?;
    Ok(())
}

pub fn mark_read(
    conn: &Connection,
    user_id: Uuid,
    id: Option<Uuid>,
    at: DateTime<Utc>,
) -> AppResult<usize> {
    let at = at.to_rfc3339();
    let changed = match id {
        Some(id) => conn.execute(
            "UPDATE alerts SET is_read = 1, read_at = ?1 WHERE user_id = ?2 AND id = ?3",
            params![at, user_id.to_string(), id.to_string()],
        )?,
        None => conn.execute(
            "UPDATE alerts SET is_read = 1, read_at = ?1 WHERE user_id = ?2 AND is_read = 0",
            params![at, user_id.to_string()],
        )?,
    };
    Ok(changed)
}

pub fn delete(conn: &Connection, user_id: Uuid, id: Uuid) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM alerts WHERE id = ?1 AND user_id = ?2",
        [id.to_string(), user_id.to_string()],
    )?)
}

pub fn delete_created_before(conn: &Connection, user_id: Uuid, cutoff: DateTime<Utc>) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM alerts WHERE user_id = ?1 AND created_at < ?2",
        [user_id.to_string(), cutoff.to_rfc3339()],
    )?)
}
