// src/export/model.rs

use crate::core::week::weekday_name;
use crate::models::schedule::ScheduleWithCourse;
use serde::Serialize;

/// Flat row of the exported timetable.
#[derive(Serialize, Clone, Debug)]
pub struct ScheduleExport {
    pub id: i64,
    pub course: String,
    pub teacher: String,
    pub location: String,
    pub day_of_week: u8,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    /// Compact week list ("1-8,10"); empty for every week.
    pub weeks: String,
    pub note: String,
}

impl From<&ScheduleWithCourse> for ScheduleExport {
    fn from(e: &ScheduleWithCourse) -> Self {
        Self {
            id: e.id,
            course: e.course_name.clone(),
            teacher: e.teacher.clone(),
            location: e.location.clone(),
            day_of_week: e.day_of_week,
            day: weekday_name(e.day_of_week).to_string(),
            start_time: e.start_str(),
            end_time: e.end_str(),
            weeks: e.weeks.to_string(),
            note: e.note.clone(),
        }
    }
}
