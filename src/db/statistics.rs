use crate::core::statistics::build_statistics;
use crate::db::schedule::map_entry;
use crate::db::settings::{TOTAL_WEEKS, get_setting};
use crate::errors::AppResult;
use crate::models::attendance::{AttendanceMark, AttendanceRecord};
use crate::models::statistics::Statistics;
use rusqlite::types::Value;
use rusqlite::{Connection, params, params_from_iter};

fn count(conn: &Connection, sql: &str) -> AppResult<i64> {
    Ok(conn.query_row(sql, [], |row| row.get(0))?)
}

pub fn calculate_all_statistics(conn: &Connection) -> AppResult<Statistics> {
    let total_courses = count(conn, "SELECT COUNT(*) FROM courses")?;

    let slots = {
        let mut stmt = conn.prepare("SELECT * FROM schedule ORDER BY day_of_week, start_time")?;
        let rows = stmt.query_map([], map_entry)?;
        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    let total_sessions = count(conn, "SELECT COUNT(*) FROM course_sessions")?;
    let attended_sessions = count(
        conn,
        "SELECT COUNT(*) FROM course_sessions WHERE attended = 1",
    )?;

    let total_weeks = get_setting(conn, TOTAL_WEEKS)?
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|w| *w > 0)
        .unwrap_or(20);

    Ok(build_statistics(
        total_courses,
        &slots,
        total_sessions,
        attended_sessions,
        total_weeks,
    ))
}

/// Upsert keyed by `(schedule_entry_id, date)`: an existing row only gets its
/// attended flag and notes replaced.
pub fn mark_attendance(conn: &Connection, data: &AttendanceMark) -> AppResult<()> {
    let date = data.date.format("%Y-%m-%d").to_string();
    let attended = if data.attended { 1 } else { 0 };

    conn.execute(
        "INSERT INTO course_sessions
             (course_id, schedule_entry_id, date, start_time, end_time, attended, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(schedule_entry_id, date)
         DO UPDATE SET attended = excluded.attended, notes = excluded.notes",
        params![
            data.course_id,
            data.schedule_entry_id,
            date,
            data.start_time,
            data.end_time,
            attended,
            data.notes,
        ],
    )?;
    Ok(())
}

/// Attendance rows, newest first, optionally for one course and capped.
pub fn get_attendance_history(
    conn: &Connection,
    course_id: Option<i64>,
    limit: Option<u32>,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut sql = String::from(
        "SELECT cs.*, c.name AS course_name, c.color
         FROM course_sessions cs
         JOIN courses c ON cs.course_id = c.id",
    );
    let mut args: Vec<Value> = Vec::new();

    if let Some(id) = course_id {
        sql.push_str(" WHERE cs.course_id = ?");
        args.push(Value::Integer(id));
    }

    sql.push_str(" ORDER BY cs.date DESC, cs.start_time DESC");

    if let Some(n) = limit {
        sql.push_str(" LIMIT ?");
        args.push(Value::Integer(n as i64));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), |row| {
        Ok(AttendanceRecord {
            id: row.get("id")?,
            course_id: row.get("course_id")?,
            schedule_entry_id: row.get("schedule_entry_id")?,
            date: row.get("date")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            attended: row.get::<_, i64>("attended")? == 1,
            notes: row.get::<_, Option<String>>("notes")?.unwrap_or_default(),
            created_at: row.get::<_, Option<String>>("created_at")?.unwrap_or_default(),
            course_name: row.get("course_name")?,
            color: row.get::<_, Option<String>>("color")?.unwrap_or_default(),
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
