use crate::db::log::ttlog_soft;
use crate::db::schedule::get_entry;
use crate::db::statistics::mark_attendance;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceMark;
use crate::models::schedule::ScheduleWithCourse;
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Record (or overwrite) attendance of one slot on `date`.
    pub fn mark(
        conn: &Connection,
        schedule_entry_id: i64,
        date: NaiveDate,
        attended: bool,
        notes: &str,
    ) -> AppResult<ScheduleWithCourse> {
        let entry = get_entry(conn, schedule_entry_id)?;

        mark_attendance(
            conn,
            &AttendanceMark {
                course_id: entry.course_id,
                schedule_entry_id,
                date,
                start_time: entry.start_str(),
                end_time: entry.end_str(),
                attended,
                notes: notes.to_string(),
            },
        )?;

        ttlog_soft(
            conn,
            "attendance",
            &format!("#{} {}", schedule_entry_id, date.format("%Y-%m-%d")),
            &format!(
                "{} {}",
                entry.course_name,
                if attended { "attended" } else { "absent" }
            ),
        );

        Ok(entry)
    }
}
