use crate::db::settings::DEFAULT_SETTINGS;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
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

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            teacher     TEXT DEFAULT '',
            location    TEXT DEFAULT '',
            color       TEXT DEFAULT '#4ECDC4',
            created_at  TEXT DEFAULT (datetime('now', 'localtime'))
        );

        CREATE TABLE IF NOT EXISTS schedule (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id   INTEGER NOT NULL,
            day_of_week INTEGER NOT NULL CHECK(day_of_week BETWEEN 1 AND 7),
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            weeks       TEXT DEFAULT '[]',
            note        TEXT DEFAULT '',
            FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_schedule_day_start ON schedule(day_of_week, start_time);

        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS course_sessions (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id         INTEGER NOT NULL,
            schedule_entry_id INTEGER NOT NULL,
            date              TEXT NOT NULL,
            start_time        TEXT NOT NULL,
            end_time          TEXT NOT NULL,
            attended          INTEGER DEFAULT 0,
            notes             TEXT DEFAULT '',
            created_at        TEXT DEFAULT (datetime('now', 'localtime')),
            FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE,
            FOREIGN KEY (schedule_entry_id) REFERENCES schedule(id) ON DELETE CASCADE
        );
        "#,
    )?;
    Ok(())
}

/// Insert every default setting that is not present yet.
fn seed_default_settings(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)")?;
    for (key, value) in DEFAULT_SETTINGS {
        stmt.execute([key, value])?;
    }
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Early databases had no per-slot note.
fn migrate_add_note_to_schedule(conn: &Connection) -> Result<()> {
    if table_has_column(conn, "schedule", "note")? {
        return Ok(());
    }

    warning("Adding 'note' column to schedule table...");
    conn.execute_batch("ALTER TABLE schedule ADD COLUMN note TEXT DEFAULT '';")?;
    success("'note' column added.");
    Ok(())
}

/// One attendance row per slot and day. Older databases may hold duplicates:
/// keep the newest row of each group before creating the unique index.
fn migrate_unique_attendance(conn: &Connection) -> Result<()> {
    let version = "20250901_0001_unique_session_per_day";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        DELETE FROM course_sessions
        WHERE id NOT IN (
            SELECT MAX(id) FROM course_sessions GROUP BY schedule_entry_id, date
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_entry_date
            ON course_sessions(schedule_entry_id, date);
        "#,
    )?;

    mark_migration(conn, version, "Unique attendance per schedule entry and date")?;

    success(format!(
        "Migration applied: {} → unique (schedule_entry_id, date) on course_sessions",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(); safe to run on every start.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create missing tables
    let fresh = !table_exists(conn, "schedule")?;
    create_core_tables(conn)?;
    if fresh {
        success("Created courses, schedule, settings and course_sessions tables.");
    }

    // 3) Column-level upgrades
    migrate_add_note_to_schedule(conn)?;

    // 4) Index-level upgrades
    migrate_unique_attendance(conn)?;

    // 5) Defaults for any settings key introduced since the last run
    seed_default_settings(conn)?;

    Ok(())
}
