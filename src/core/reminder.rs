//! Class-start reminders: which of today's slots are about to begin.

use crate::models::schedule::ScheduleWithCourse;
use crate::utils::time::seconds_of_day;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

pub const DEFAULT_REMINDER_MINUTES: i64 = 10;
pub const REMINDER_TITLE: &str = "课程提醒";

/// Reminder window in minutes from the stored setting; unreadable or zero
/// values fall back to ten minutes.
pub fn reminder_minutes(raw: &str) -> i64 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|m| *m != 0)
        .unwrap_or(DEFAULT_REMINDER_MINUTES)
}

/// Only an explicit "false" disables reminders.
pub fn reminders_enabled(raw: &str) -> bool {
    raw != "false"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReminder {
    pub entry_id: i64,
    pub title: String,
    pub body: String,
}

/// Slots already announced, keyed by slot and calendar day.
#[derive(Debug, Default)]
pub struct NotifiedSet {
    seen: HashSet<(i64, NaiveDate)>,
}

impl NotifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the key; false when it was already present.
    pub fn insert(&mut self, entry_id: i64, date: NaiveDate) -> bool {
        self.seen.insert((entry_id, date))
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

fn reminder_body(entry: &ScheduleWithCourse, diff_secs: i64) -> String {
    let minutes = (diff_secs + 59) / 60;
    let location = if entry.location.is_empty() {
        String::new()
    } else {
        format!(" ({})", entry.location)
    };
    format!("{} 将在 {} 分钟后开始{}", entry.course_name, minutes, location)
}

/// Slots starting within `(0, minutes_before]` minutes of `now` that have not
/// been announced today. Each returned slot is marked in `notified`.
pub fn collect_due(
    today_classes: &[ScheduleWithCourse],
    now: NaiveDateTime,
    minutes_before: i64,
    notified: &mut NotifiedSet,
) -> Vec<DueReminder> {
    let now_secs = seconds_of_day(now.time());
    let window = minutes_before * 60;
    let date = now.date();

    today_classes
        .iter()
        .filter_map(|entry| {
            let diff = seconds_of_day(entry.start_time) - now_secs;
            if diff <= 0 || diff > window {
                return None;
            }
            if !notified.insert(entry.id, date) {
                return None;
            }
            Some(DueReminder {
                entry_id: entry.id,
                title: REMINDER_TITLE.to_string(),
                body: reminder_body(entry, diff),
            })
        })
        .collect()
}
