use crate::core::resolver;
use crate::errors::AppResult;
use crate::models::display::DisplayState;
use crate::models::schedule::ScheduleWithCourse;
use crate::models::week_info::WeekInfo;
use crate::services::source::ScheduleSource;
use crate::utils::date::weekday_number;
use chrono::{NaiveDate, NaiveTime};

/// Week-filtered timetable data the topbar renders from between reloads.
#[derive(Debug, Clone)]
pub struct ScheduleSnapshot {
    pub date: NaiveDate,
    pub weekday: u8,
    pub week: WeekInfo,
    pub today: Vec<ScheduleWithCourse>,
    pub week_entries: Vec<ScheduleWithCourse>,
}

impl ScheduleSnapshot {
    /// Placeholder until the first load succeeds.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: weekday_number(date),
            week: WeekInfo {
                week: 1,
                semester_start_date: String::new(),
                is_calculated: false,
            },
            today: Vec::new(),
            week_entries: Vec::new(),
        }
    }

    pub fn load(source: &dyn ScheduleSource, date: NaiveDate) -> AppResult<Self> {
        let week = source.current_week(date)?;
        let weekday = weekday_number(date);
        let today = source.schedule_by_day(weekday, Some(week.week))?;
        let week_entries = source.schedule_for_week(Some(week.week))?;

        Ok(Self {
            date,
            weekday,
            week,
            today,
            week_entries,
        })
    }

    pub fn resolve(&self, now: NaiveTime) -> DisplayState {
        resolver::resolve(now, &self.today, &self.week_entries, self.weekday)
    }
}
