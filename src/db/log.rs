use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// One row of the `log` audit table.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Newest lines first; `limit` of `None` returns everything.
pub fn load_log(conn: &Connection, limit: Option<usize>) -> AppResult<Vec<LogLine>> {
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let mut stmt = conn.prepare(
        "SELECT id, date, operation, IFNULL(target, ''), message
         FROM log ORDER BY id DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit], |row| {
        Ok(LogLine {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
