use super::weeks::WeekSet;
use crate::utils::time::hhmm;
use chrono::NaiveTime;
use serde::Serialize;

/// One weekly time slot of a course.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub id: i64,
    pub course_id: i64,
    pub day_of_week: u8, // ⇔ schedule.day_of_week (1 = Monday … 7 = Sunday)
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime, // ⇔ schedule.start_time (TEXT "HH:MM")
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime, // ⇔ schedule.end_time (TEXT "HH:MM")
    pub weeks: WeekSet,      // ⇔ schedule.weeks (JSON array, [] = every week)
    pub note: String,
}

/// A schedule entry joined with the display fields of its course.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleWithCourse {
    pub id: i64,
    pub course_id: i64,
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub weeks: WeekSet,
    pub note: String,
    pub course_name: String,
    pub teacher: String,
    pub location: String,
    pub color: String,
}

impl ScheduleWithCourse {
    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_time.format("%H:%M").to_string()
    }

    /// `name @ location`, or just the name when no location is set.
    pub fn title(&self) -> String {
        if self.location.is_empty() {
            self.course_name.clone()
        } else {
            format!("{} @ {}", self.course_name, self.location)
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewScheduleEntry {
    pub course_id: i64,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub weeks: WeekSet,
    pub note: String,
}

/// Partial update of an existing slot. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ScheduleUpdate {
    pub course_id: Option<i64>,
    pub day_of_week: Option<u8>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub weeks: Option<WeekSet>,
    pub note: Option<String>,
}

impl ScheduleUpdate {
    /// Overlay this update on a stored entry.
    pub fn apply_to(&self, entry: &ScheduleEntry) -> ScheduleEntry {
        ScheduleEntry {
            id: entry.id,
            course_id: self.course_id.unwrap_or(entry.course_id),
            day_of_week: self.day_of_week.unwrap_or(entry.day_of_week),
            start_time: self.start_time.unwrap_or(entry.start_time),
            end_time: self.end_time.unwrap_or(entry.end_time),
            weeks: self.weeks.clone().unwrap_or_else(|| entry.weeks.clone()),
            note: self.note.clone().unwrap_or_else(|| entry.note.clone()),
        }
    }
}

/// Outcome of an advisory overlap check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConflictResult {
    pub has_conflict: bool,
    pub conflicts: Vec<ScheduleWithCourse>,
}
