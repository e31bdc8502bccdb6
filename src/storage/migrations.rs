//! Database migrations for pomo.
//!
//! Each migration upgrades the schema by one version. Migrations run
//! automatically when the database is opened.

use rusqlite::Connection;

use crate::error::PomoError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, PomoError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| PomoError::Database(format!("Failed to get schema version: {e}")))
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), PomoError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| PomoError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), PomoError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        log::debug!("running migration v{version}");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), PomoError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(PomoError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: pomodoro session table.
fn migrate_v1(conn: &Connection) -> Result<(), PomoError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS pomodoro_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT,
            name TEXT NOT NULL DEFAULT 'Focus task',
            planned_duration INTEGER NOT NULL DEFAULT 25 CHECK (planned_duration > 0),
            status TEXT NOT NULL DEFAULT 'planned'
                CHECK (status IN ('planned', 'working', 'paused', 'completed', 'abandoned')),
            work_start_at TEXT,
            work_end_at TEXT,
            leave_start_at TEXT,
            leave_end_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pomodoro_sessions_owner_created
        ON pomodoro_sessions(owner, created_at);
        ",
    )
    .map_err(|e| PomoError::Database(format!("Migration v1 failed: {e}")))
}
