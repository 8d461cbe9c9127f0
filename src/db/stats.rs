use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Connection;
use std::fs;

/// Tables reported by `db --info`, in display order.
pub const TABLES: [&str; 7] = [
    "employers",
    "expected_shifts",
    "shift_entries",
    "users_profile",
    "alerts",
    "achievements",
    "user_subscriptions",
];

#[derive(Debug, Clone, PartialEq)]
pub struct DbInfo {
    pub size_bytes: u64,
    pub counts: Vec<(&'static str, i64)>,
    pub first_shift: Option<String>,
    pub last_shift: Option<String>,
}

pub fn collect(conn: &Connection, db_path: &str) -> AppResult<DbInfo> {
    let size_bytes = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let mut counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
        counts.push((table, n));
    }

    let (first_shift, last_shift): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(shift_date), MAX(shift_date) FROM expected_shifts",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;

    Ok(DbInfo {
        size_bytes,
        counts,
        first_shift,
        last_shift,
    })
}

pub fn print_db_info(pool: &DbPool) -> AppResult<()> {
    let info = collect(&pool.conn, &pool.path)?;
    let file_mb = (info.size_bytes as f64) / (1024.0 * 1024.0);

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, pool.path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    println!("{}• Rows:{}", CYAN, RESET);
    for (table, n) in &info.counts {
        println!("    {:<20} {}{}{}", table, GREEN, n, RESET);
    }

    let dash = format!("{GREY}--{RESET}");
    println!("{}• Shift date range:{}", CYAN, RESET);
    println!("    from: {}", info.first_shift.unwrap_or_else(|| dash.clone()));
    println!("    to:   {}", info.last_shift.unwrap_or(dash));
    println!();
    Ok(())
}
