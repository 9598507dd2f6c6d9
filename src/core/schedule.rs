use crate::core::conflict::Candidate;
use crate::core::week::weekday_name;
use crate::db::courses::get_course;
use crate::db::log::ttlog_soft;
use crate::db::schedule::{
    add_schedule_entry, check_conflicts, delete_schedule_entry, get_entry, update_schedule_entry,
};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{
    ConflictResult, NewScheduleEntry, ScheduleEntry, ScheduleUpdate, ScheduleWithCourse,
};
use crate::models::weeks::{MAX_WEEK, WeekSet};
use chrono::NaiveTime;
use rusqlite::Connection;

/// Outcome of a schedule write. Conflicts never block the write.
#[derive(Debug)]
pub struct Saved {
    pub entry: ScheduleEntry,
    pub conflicts: ConflictResult,
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    pub fn validate_day(day: u8) -> AppResult<u8> {
        if (1..=7).contains(&day) {
            Ok(day)
        } else {
            Err(AppError::InvalidDay(day.to_string()))
        }
    }

    pub fn validate_range(start: NaiveTime, end: NaiveTime) -> AppResult<()> {
        if start < end {
            Ok(())
        } else {
            Err(AppError::InvalidTime(format!(
                "{}-{} (end must be after start)",
                start.format("%H:%M"),
                end.format("%H:%M")
            )))
        }
    }

    /// Week list typed by the user. Unlike [`WeekSet::parse`], weeks past
    /// [`MAX_WEEK`] are an error rather than silently dropped.
    pub fn parse_weeks(raw: &str) -> AppResult<WeekSet> {
        match WeekSet::out_of_range(raw) {
            Some(week) => Err(AppError::InvalidWeeks(format!(
                "{} (week {} is above {})",
                raw, week, MAX_WEEK
            ))),
            None => Ok(WeekSet::parse(raw)),
        }
    }

    pub fn add(conn: &Connection, data: &NewScheduleEntry) -> AppResult<Saved> {
        Self::validate_day(data.day_of_week)?;
        Self::validate_range(data.start_time, data.end_time)?;
        let course = get_course(conn, data.course_id)?;

        let conflicts = check_conflicts(
            conn,
            &Candidate {
                day_of_week: data.day_of_week,
                start_time: data.start_time,
                end_time: data.end_time,
                weeks: data.weeks.clone(),
                exclude_id: None,
            },
        )?;

        let entry = add_schedule_entry(conn, data)?;

        ttlog_soft(
            conn,
            "schedule_add",
            &format!("#{}", entry.id),
            &format!(
                "{} {} {}-{}",
                course.name,
                weekday_name(entry.day_of_week),
                entry.start_time.format("%H:%M"),
                entry.end_time.format("%H:%M")
            ),
        );

        Ok(Saved { entry, conflicts })
    }

    /// Partial edit. Validation and the conflict check run on the merged slot.
    pub fn edit(conn: &Connection, id: i64, update: &ScheduleUpdate) -> AppResult<Saved> {
        let stored = get_entry(conn, id)?;
        let current = ScheduleEntry {
            id: stored.id,
            course_id: stored.course_id,
            day_of_week: stored.day_of_week,
            start_time: stored.start_time,
            end_time: stored.end_time,
            weeks: stored.weeks.clone(),
            note: stored.note.clone(),
        };
        let merged = update.apply_to(&current);

        Self::validate_day(merged.day_of_week)?;
        Self::validate_range(merged.start_time, merged.end_time)?;
        if update.course_id.is_some() {
            get_course(conn, merged.course_id)?;
        }

        let conflicts = check_conflicts(
            conn,
            &Candidate {
                day_of_week: merged.day_of_week,
                start_time: merged.start_time,
                end_time: merged.end_time,
                weeks: merged.weeks.clone(),
                exclude_id: Some(id),
            },
        )?;

        let entry = update_schedule_entry(conn, id, update)?;

        ttlog_soft(
            conn,
            "schedule_edit",
            &format!("#{}", id),
            &format!(
                "{} {}-{}",
                weekday_name(entry.day_of_week),
                entry.start_time.format("%H:%M"),
                entry.end_time.format("%H:%M")
            ),
        );

        Ok(Saved { entry, conflicts })
    }

    pub fn delete(conn: &Connection, id: i64) -> AppResult<ScheduleWithCourse> {
        let entry = get_entry(conn, id)?;
        delete_schedule_entry(conn, id)?;

        ttlog_soft(
            conn,
            "schedule_del",
            &format!("#{}", id),
            &format!(
                "{} {} {}-{}",
                entry.course_name,
                weekday_name(entry.day_of_week),
                entry.start_str(),
                entry.end_str()
            ),
        );

        Ok(entry)
    }
}
