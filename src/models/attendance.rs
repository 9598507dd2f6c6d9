use chrono::NaiveDate;
use serde::Serialize;

/// A course_sessions row joined with course name and color.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub course_id: i64,
    pub schedule_entry_id: i64,
    pub date: String,       // ⇔ course_sessions.date ("YYYY-MM-DD")
    pub start_time: String, // ⇔ course_sessions.start_time ("HH:MM")
    pub end_time: String,
    pub attended: bool,
    pub notes: String,
    pub created_at: String,
    pub course_name: String,
    pub color: String,
}

/// Input of an attendance upsert. Keyed by `(schedule_entry_id, date)`.
#[derive(Debug, Clone)]
pub struct AttendanceMark {
    pub course_id: i64,
    pub schedule_entry_id: i64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub attended: bool,
    pub notes: String,
}
