use super::{get_opt_instant, get_uuid, instant_str};
use crate::errors::AppResult;
use crate::models::Employer;
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

pub fn map_row(row: &Row) -> rusqlite::Result<Employer> {
    Ok(Employer {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        name: row.get("name")?,
        hourly_rate: row.get("hourly_rate")?,
        active: row.get::<_, i64>("active")? == 1,
        color: row.get("color")?,
        created_at: get_opt_instant(row, "created_at")?,
    })
}

pub fn list(conn: &Connection, user_id: Uuid, active_only: bool) -> AppResult<Vec<Employer>> {
    let sql = if active_only {
        "SELECT * FROM employers WHERE user_id = ?1 AND active = 1 ORDER BY name COLLATE NOCASE"
    } else {
        "SELECT * FROM employers WHERE user_id = ?1 ORDER BY name COLLATE NOCASE"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([user_id.to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, user_id: Uuid, id: Uuid) -> AppResult<Option<Employer>> {
    Ok(conn
        .query_row(
            "SELECT * FROM employers WHERE user_id = ?1 AND id = ?2",
            [user_id.to_string(), id.to_string()],
            map_row,
        )
        .optional()?)
}

pub fn insert(conn: &Connection, e: &Employer) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employers (id, user_id, name, hourly_rate, active, color, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            e.id.to_string(),
            e.user_id.to_string(),
            e.name,
            e.hourly_rate,
            e.active as i64,
            e.color,
            instant_str(e.created_at),
        ],
    )?;
    Ok(())
}

/// Returns the number of rows changed (0 when the employer does not exist).
pub fn update(conn: &Connection, e: &Employer) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE employers SET name = ?1, hourly_rate = ?2, active = ?3, color = ?4
         WHERE id = ?5 AND user_id = ?6",
        params![
            e.name,
            e.hourly_rate,
            e.active as i64,
            e.color,
            e.id.to_string(),
            e.user_id.to_string(),
        ],
    )?)
}

pub fn delete(conn: &Connection, user_id: Uuid, id: Uuid) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM employers WHERE id = ?1 AND user_id = ?2",
        [id.to_string(), user_id.to_string()],
    )?)
}
