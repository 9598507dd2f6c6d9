use crate::db::pool::DbPool;
use crate::db::{schedule, settings};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::ScheduleWithCourse;
use crate::models::week_info::WeekInfo;
use chrono::NaiveDate;
use std::sync::{Mutex, MutexGuard};

/// Read-only view of the stored timetable used by the services.
pub trait ScheduleSource: Send + Sync {
    fn current_week(&self, today: NaiveDate) -> AppResult<WeekInfo>;

    /// Slots of one weekday ordered by start time, week filtered when `week`
    /// is given.
    fn schedule_by_day(&self, day_of_week: u8, week: Option<u32>)
    -> AppResult<Vec<ScheduleWithCourse>>;

    /// Whole timetable ordered by day and start time.
    fn schedule_for_week(&self, week: Option<u32>) -> AppResult<Vec<ScheduleWithCourse>>;

    /// Setting value, `""` when missing.
    fn setting(&self, key: &str) -> AppResult<String>;
}

pub struct SqliteSource {
    pool: Mutex<DbPool>,
}

impl SqliteSource {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool: Mutex::new(pool),
        }
    }

    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self::new(DbPool::open_initialized(path)?))
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, DbPool>> {
        self.pool
            .lock()
            .map_err(|_| AppError::Other("database connection lock poisoned".to_string()))
    }
}

impl ScheduleSource for SqliteSource {
    fn current_week(&self, today: NaiveDate) -> AppResult<WeekInfo> {
        settings::get_current_week(&self.lock()?.conn, today)
    }

    fn schedule_by_day(
        &self,
        day_of_week: u8,
        week: Option<u32>,
    ) -> AppResult<Vec<ScheduleWithCourse>> {
        schedule::get_schedule_by_day(&self.lock()?.conn, day_of_week, week)
    }

    fn schedule_for_week(&self, week: Option<u32>) -> AppResult<Vec<ScheduleWithCourse>> {
        schedule::get_schedule_for_week(&self.lock()?.conn, week)
    }

    fn setting(&self, key: &str) -> AppResult<String> {
        settings::get_setting(&self.lock()?.conn, key)
    }
}
