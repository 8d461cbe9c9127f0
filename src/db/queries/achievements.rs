use super::{get_enum, get_opt_instant, get_opt_json, get_uuid, instant_str, json_str};
use crate::errors::AppResult;
use crate::models::{Achievement, AchievementType};
use rusqlite::{Connection, Row, params};
use uuid::Uuid;

pub fn map_row(row: &Row) -> rusqlite::Result<Achievement> {
    Ok(Achievement {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        achievement_type: get_enum(row, "achievement_type", AchievementType::from_db_str)?,
        unlocked_at: get_opt_instant(row, "unlocked_at")?,
        data: get_opt_json(row, "data")?,
    })
}

pub fn list(conn: &Connection, user_id: Uuid) -> AppResult<Vec<Achievement>> {
    let mut stmt =
        conn.prepare("SELECT * FROM achievements WHERE user_id = ?1 ORDER BY unlocked_at ASC")?;
    let rows = stmt.query_map([user_id.to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Unlocking twice is a no-op; returns whether a row was added.
pub fn insert(conn: &Connection, a: &Achievement) -> AppResult<bool> {
    let added = conn.execute(
        "INSERT OR IGNORE INTO achievements (id, user_id, achievement_type, unlocked_at, data)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            a.id.to_string(),
            a.user_id.to_string(),
            a.achievement_type.as_str(),
            instant_str(a.unlocked_at),
            json_str(&a.data),
        ],
    )?;
    Ok(added == 1)
}
