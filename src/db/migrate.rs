//! Versioned schema migrations.
//!
//! Each migration runs once; applied versions are recorded in the `log`
//! table as `migration_applied` rows.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

struct Migration {
    version: &'static str,
    description: &'static str,
    apply: fn(&Connection) -> AppResult<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_core_tables",
        description: "Created employers, expected_shifts, shift_entries, users_profile, alerts, achievements, user_subscriptions",
        apply: create_core_tables,
    },
    Migration {
        version: "20250301_0002_create_indexes",
        description: "Added date and user indexes",
        apply: create_indexes,
    },
    Migration {
        version: "20250915_0003_add_entry_income_snapshot",
        description: "Added income snapshot columns to shift_entries",
        apply: add_entry_income_snapshot,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, description: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, description],
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> AppResult<bool> {
    let exists: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_core_tables(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employers (
            id           TEXT PRIMARY KEY,
            user_id      TEXT NOT NULL,
            name         TEXT NOT NULL,
            hourly_rate  REAL NOT NULL DEFAULT 15.0,
            active       INTEGER NOT NULL DEFAULT 1,
            color        TEXT NOT NULL DEFAULT '#4F46E5',
            created_at   TEXT
        );

        CREATE TABLE IF NOT EXISTS expected_shifts (
            id                  TEXT PRIMARY KEY,
            user_id             TEXT NOT NULL,
            employer_id         TEXT REFERENCES employers(id) ON DELETE SET NULL,
            shift_date          TEXT NOT NULL,
            start_time          TEXT NOT NULL,
            end_time            TEXT NOT NULL,
            expected_hours      REAL NOT NULL DEFAULT 0,
            hourly_rate         REAL NOT NULL DEFAULT 0,
            lunch_break_minutes INTEGER NOT NULL DEFAULT 0,
            sales_target        REAL,
            status              TEXT NOT NULL DEFAULT 'planned'
                                CHECK(status IN ('planned','completed','missed')),
            alert_minutes       INTEGER,
            notes               TEXT,
            created_at          TEXT,
            updated_at          TEXT
        );

        CREATE TABLE IF NOT EXISTS shift_entries (
            id                TEXT PRIMARY KEY,
            shift_id          TEXT NOT NULL UNIQUE
                              REFERENCES expected_shifts(id) ON DELETE CASCADE,
            user_id           TEXT NOT NULL,
            actual_start_time TEXT NOT NULL,
            actual_end_time   TEXT NOT NULL,
            actual_hours      REAL NOT NULL DEFAULT 0,
            sales             REAL NOT NULL DEFAULT 0,
            tips              REAL NOT NULL DEFAULT 0,
            cash_out          REAL NOT NULL DEFAULT 0,
            other             REAL NOT NULL DEFAULT 0,
            notes             TEXT,
            created_at        TEXT,
            updated_at        TEXT
        );

        CREATE TABLE IF NOT EXISTS users_profile (
            user_id                      TEXT PRIMARY KEY,
            name                         TEXT,
            default_hourly_rate          REAL NOT NULL DEFAULT 15.0,
            week_start                   INTEGER NOT NULL DEFAULT 0
                                         CHECK(week_start BETWEEN 0 AND 6),
            target_tip_daily             REAL NOT NULL DEFAULT 0,
            target_tip_weekly            REAL NOT NULL DEFAULT 0,
            target_tip_monthly           REAL NOT NULL DEFAULT 0,
            target_sales_daily           REAL NOT NULL DEFAULT 0,
            target_sales_weekly          REAL NOT NULL DEFAULT 0,
            target_sales_monthly         REAL NOT NULL DEFAULT 0,
            target_hours_daily           REAL NOT NULL DEFAULT 0,
            target_hours_weekly          REAL NOT NULL DEFAULT 0,
            target_hours_monthly         REAL NOT NULL DEFAULT 0,
            tip_target_percentage        REAL NOT NULL DEFAULT 0,
            average_deduction_percentage REAL NOT NULL DEFAULT 30,
            preferred_language           TEXT NOT NULL DEFAULT 'en',
            default_alert_minutes        INTEGER,
            use_multiple_employers       INTEGER NOT NULL DEFAULT 0,
            default_employer_id          TEXT,
            subscription_tier            TEXT NOT NULL DEFAULT 'none',
            subscription_status          TEXT NOT NULL DEFAULT 'active',
            subscription_expires_at      TEXT,
            security_type                TEXT NOT NULL DEFAULT 'none',
            pin_code_hash                TEXT,
            auto_lock_minutes            INTEGER NOT NULL DEFAULT 5,
            created_at                   TEXT,
            updated_at                   TEXT
        );

        CREATE TABLE IF NOT EXISTS alerts (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            alert_type  TEXT NOT NULL,
            title       TEXT NOT NULL,
            message     TEXT NOT NULL,
            is_read     INTEGER NOT NULL DEFAULT 0,
            action      TEXT,
            data        TEXT,
            created_at  TEXT,
            read_at     TEXT
        );

        CREATE TABLE IF NOT EXISTS achievements (
            id               TEXT PRIMARY KEY,
            user_id          TEXT NOT NULL,
            achievement_type TEXT NOT NULL,
            unlocked_at      TEXT,
            data             TEXT,
            UNIQUE(user_id, achievement_type)
        );

        CREATE TABLE IF NOT EXISTS user_subscriptions (
            id             TEXT PRIMARY KEY,
            user_id        TEXT NOT NULL,
            product_id     TEXT,
            status         TEXT,
            expires_at     TEXT,
            transaction_id TEXT,
            purchase_date  TEXT,
            environment    TEXT,
            created_at     TEXT,
            updated_at     TEXT
        );
        "#,
    )?;
    Ok(())
}

fn create_indexes(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_expected_shifts_user_date
            ON expected_shifts(user_id, shift_date, start_time);
        CREATE INDEX IF NOT EXISTS idx_shift_entries_shift ON shift_entries(shift_id);
        CREATE INDEX IF NOT EXISTS idx_employers_user ON employers(user_id);
        CREATE INDEX IF NOT EXISTS idx_alerts_user_created ON alerts(user_id, created_at);
        "#,
    )?;
    Ok(())
}

fn add_entry_income_snapshot(conn: &Connection) -> AppResult<()> {
    for column in [
        "hourly_rate",
        "gross_income",
        "total_income",
        "net_income",
        "deduction_percentage",
    ] {
        if !column_exists(conn, "shift_entries", column)? {
            conn.execute(
                &format!("ALTER TABLE shift_entries ADD COLUMN {column} REAL"),
                [],
            )
            .map_err(|e| AppError::Migration(format!("Failed to add '{column}': {e}")))?;
        }
    }
    Ok(())
}

/// Zip the database file next to itself before an upgrade touches data.
fn backup_before_migration(db_path: &str) -> AppResult<()> {
    let source = Path::new(db_path);
    let dir = source.parent().unwrap_or_else(|| Path::new("."));
    let backup_path = dir.join(format!(
        "{}-backup_db_pre_migration.zip",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| AppError::Migration(format!("Backup failed (start_file): {e}")))?;
    zip.write_all(&fs::read(source)?)?;
    zip.finish()
        .map_err(|e| AppError::Migration(format!("Backup failed (finish): {e}")))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Versions not yet recorded in `log`.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        return Ok(());
    }

    // Existing data gets a safety copy before an upgrade.
    if table_exists(conn, "expected_shifts")? {
        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();
        if db_path.is_empty() {
            warning("Could not determine DB path; backup skipped.");
        } else {
            backup_before_migration(&db_path)?;
        }
    }

    for m in MIGRATIONS.iter().filter(|m| pending.contains(&m.version)) {
        tracing::debug!(version = m.version, "applying migration");
        (m.apply)(conn).map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;
        mark_applied(conn, m.version, m.description)?;
        tracing::info!(version = m.version, "migration applied");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(pending_migrations(&conn).unwrap().is_empty());
        assert!(column_exists(&conn, "shift_entries", "net_income").unwrap());
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied as usize, MIGRATIONS.len());
    }
}
