use crate::core::week::week_info;
use crate::errors::AppResult;
use crate::models::week_info::WeekInfo;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};

pub const SEMESTER_START_DATE: &str = "semester_start_date";
pub const TOTAL_WEEKS: &str = "total_weeks";
pub const NOTIFICATION_ENABLED: &str = "notification_enabled";
pub const NOTIFICATION_MINUTES: &str = "notification_minutes";
pub const NOTIFICATION_SOUND: &str = "notification_sound";

/// Settings every fresh (or reset) database starts with.
pub const DEFAULT_SETTINGS: [(&str, &str); 9] = [
    ("theme_mode", "auto"),
    ("theme_color", "#4ECDC4"),
    ("font_size", "16"),
    ("topbar_height", "3"),
    (SEMESTER_START_DATE, ""),
    (TOTAL_WEEKS, "20"),
    (NOTIFICATION_ENABLED, "true"),
    (NOTIFICATION_MINUTES, "10"),
    (NOTIFICATION_SOUND, "true"),
];

pub fn get_all_settings(conn: &Connection) -> AppResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key ASC")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Value of `key`, or an empty string when it was never set.
pub fn get_setting(conn: &Connection, key: &str) -> AppResult<String> {
    let value: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value.unwrap_or_default())
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        [key, value],
    )?;
    Ok(())
}

/// Drop every stored value (including unknown keys) and restore the defaults.
pub fn reset_settings(conn: &mut Connection) -> AppResult<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM settings", [])?;
    {
        let mut stmt = tx.prepare("INSERT INTO settings (key, value) VALUES (?1, ?2)")?;
        for (key, value) in DEFAULT_SETTINGS {
            stmt.execute([key, value])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Semester week for `today`, derived from the stored start date.
pub fn get_current_week(conn: &Connection, today: NaiveDate) -> AppResult<WeekInfo> {
    let start = get_setting(conn, SEMESTER_START_DATE)?;
    Ok(week_info(&start, today))
}

/// Store the semester start date; `None` clears it (week 1 from then on).
pub fn set_semester_start(conn: &Connection, date: Option<NaiveDate>) -> AppResult<()> {
    let value = date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    set_setting(conn, SEMESTER_START_DATE, &value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    #[test]
    fn defaults_are_seeded() {
        let conn = memory_db();
        assert_eq!(get_setting(&conn, TOTAL_WEEKS).unwrap(), "20");
        assert_eq!(get_setting(&conn, NOTIFICATION_MINUTES).unwrap(), "10");
        assert_eq!(get_setting(&conn, "no_such_key").unwrap(), "");
        assert_eq!(get_all_settings(&conn).unwrap().len(), DEFAULT_SETTINGS.len());
    }

    #[test]
    fn reset_drops_custom_keys() {
        let mut conn = memory_db();
        set_setting(&conn, "custom", "x").unwrap();
        set_setting(&conn, TOTAL_WEEKS, "18").unwrap();

        reset_settings(&mut conn).unwrap();

        assert_eq!(get_setting(&conn, "custom").unwrap(), "");
        assert_eq!(get_setting(&conn, TOTAL_WEEKS).unwrap(), "20");
    }

    #[test]
    fn semester_start_drives_the_week() {
        let conn = memory_db();
        let today = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();

        assert_eq!(get_current_week(&conn, today).unwrap().week, 1);

        set_semester_start(&conn, NaiveDate::from_ymd_opt(2025, 9, 1)).unwrap();
        let info = get_current_week(&conn, today).unwrap();
        assert_eq!(info.week, 3);
        assert!(info.is_calculated);

        set_semester_start(&conn, None).unwrap();
        assert!(!get_current_week(&conn, today).unwrap().is_calculated);
    }
}
